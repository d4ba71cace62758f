use std::path::PathBuf;

use super::StorageError;

/// URI scheme marking an episode audio file kept in object storage.
pub const REMOTE_SCHEME: &str = "s3://";

/// Where an episode's audio bytes live. Resolved once when the locator is
/// read from the store; at most one scheme applies to a given episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioLocator {
    /// Object-storage URI, `s3://bucket/key/parts`.
    Remote { bucket: String, key: String },
    /// Anything else is a path on the local filesystem.
    Local(PathBuf),
}

impl AudioLocator {
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(StorageError::InvalidLocator("empty locator".to_string()));
        }

        let Some(rest) = raw.strip_prefix(REMOTE_SCHEME) else {
            return Ok(Self::Local(PathBuf::from(raw)));
        };

        match rest.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => Ok(Self::Remote {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            _ => Err(StorageError::InvalidLocator(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_uri_splits_bucket_and_key() {
        let locator = AudioLocator::parse("s3://practiceeph/episodes/u1/e1/out.mp3").unwrap();
        assert_eq!(
            locator,
            AudioLocator::Remote {
                bucket: "practiceeph".to_string(),
                key: "episodes/u1/e1/out.mp3".to_string(),
            }
        );
    }

    #[test]
    fn plain_path_is_local() {
        let locator = AudioLocator::parse("./data/podcasts/e1/out.mp3").unwrap();
        assert_eq!(
            locator,
            AudioLocator::Local(PathBuf::from("./data/podcasts/e1/out.mp3"))
        );
    }

    #[test]
    fn key_may_contain_spaces() {
        let locator = AudioLocator::parse("s3://b/episodes/My Episode.mp3").unwrap();
        assert_eq!(
            locator,
            AudioLocator::Remote {
                bucket: "b".to_string(),
                key: "episodes/My Episode.mp3".to_string(),
            }
        );
    }

    #[test]
    fn remote_uri_without_key_is_rejected() {
        assert!(AudioLocator::parse("s3://bucket").is_err());
        assert!(AudioLocator::parse("s3://bucket/").is_err());
        assert!(AudioLocator::parse("s3:///key").is_err());
        assert!(AudioLocator::parse("").is_err());
    }
}
