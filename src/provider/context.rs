//! Per-call provider credentials.
//!
//! A tenant's provider API keys are stored encrypted in
//! `user_provider_secret`. They are materialized into a [`ProviderContext`]
//! value that is threaded through the call chain of the operation that needs
//! them. The process environment is never touched: two concurrent requests
//! for different tenants each carry their own context and cannot race on a
//! shared slot.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal, engine::any::Any};
use thiserror::Error;
use tracing::debug;

lazy_static! {
    /// Which configuration variable each provider's SDK reads its key from.
    static ref PROVIDER_VAR_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("openai", "OPENAI_API_KEY");
        m.insert("anthropic", "ANTHROPIC_API_KEY");
        m.insert("gemini", "GOOGLE_API_KEY");
        m.insert("google", "GOOGLE_API_KEY");
        m.insert("google-vertex", "GOOGLE_API_KEY");
        m.insert("vertexai", "GOOGLE_API_KEY");
        m.insert("mistral", "MISTRAL_API_KEY");
        m.insert("deepseek", "DEEPSEEK_API_KEY");
        m.insert("xai", "XAI_API_KEY");
        m.insert("groq", "GROQ_API_KEY");
        m.insert("voyage", "VOYAGE_API_KEY");
        m.insert("elevenlabs", "ELEVENLABS_API_KEY");
        m.insert("cohere", "COHERE_API_KEY");
        m.insert("openrouter", "OPENROUTER_API_KEY");
        m
    };
}

pub fn provider_var_name(provider: &str) -> Option<&'static str> {
    PROVIDER_VAR_NAMES.get(provider).copied()
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to decrypt secret for provider {0}")]
    Decrypt(String),
    #[error("database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for ProviderError {
    fn from(e: surrealdb::Error) -> Self {
        ProviderError::Database(e.to_string())
    }
}

/// Decryption seam for stored secrets. The crypto itself lives outside this
/// crate; callers hand in whatever implementation their deployment uses.
pub trait SecretCipher: Send + Sync {
    fn decrypt(&self, ciphertext: &str) -> Result<String, ProviderError>;
}

#[derive(Deserialize)]
struct SecretRow {
    provider: String,
    encrypted_value: String,
}

/// Provider credentials for one tenant, resolved for the duration of a
/// single operation.
#[derive(Debug, Default, Clone)]
pub struct ProviderContext {
    values: HashMap<&'static str, String>,
}

impl ProviderContext {
    pub async fn load_for_user(
        db: &Surreal<Any>,
        cipher: &dyn SecretCipher,
        owner: &RecordId,
    ) -> Result<Self, ProviderError> {
        let mut response = db
            .query("SELECT provider, encrypted_value FROM user_provider_secret WHERE user = $owner")
            .bind(("owner", owner.clone()))
            .await?;
        let rows: Vec<SecretRow> = response.take(0)?;

        let mut values = HashMap::new();
        for row in rows {
            let Some(var) = provider_var_name(&row.provider) else {
                debug!("no variable mapping for provider {}", row.provider);
                continue;
            };
            values.insert(var, cipher.decrypt(&row.encrypted_value)?);
        }

        Ok(Self { values })
    }

    pub fn get(&self, var: &str) -> Option<&str> {
        self.values.get(var).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_providers_map_to_their_variables() {
        assert_eq!(provider_var_name("openai"), Some("OPENAI_API_KEY"));
        assert_eq!(provider_var_name("gemini"), Some("GOOGLE_API_KEY"));
        assert_eq!(provider_var_name("vertexai"), Some("GOOGLE_API_KEY"));
        assert_eq!(provider_var_name("made-up"), None);
    }
}
