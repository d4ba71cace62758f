use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use thiserror::Error;
use tracing::info;

use crate::core::config::LorebookConfig;

#[derive(Debug, Error)]
pub enum RepoClientError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("database error: {0}")]
    Database(#[from] surrealdb::Error),
}

/// Thin wrapper around the SurrealDB handle.
///
/// Created unconnected; `connect` dials the configured endpoint, signs in
/// when credentials are present and selects namespace/database. The `mem://`
/// endpoint gives an embedded in-memory store, which is what the tests use.
pub struct RepoClient {
    inner: Surreal<Any>,
    endpoint: String,
    namespace: String,
    database: String,
    username: Option<String>,
    password: Option<String>,
}

impl RepoClient {
    pub fn new(config: &LorebookConfig) -> Self {
        Self {
            inner: Surreal::init(),
            endpoint: config.db_url.clone(),
            namespace: config.db_namespace.clone(),
            database: config.db_database.clone(),
            username: config.db_username.clone(),
            password: config.db_password.clone(),
        }
    }

    pub async fn connect(&self) -> Result<(), RepoClientError> {
        self.inner
            .connect(self.endpoint.as_str())
            .await
            .map_err(|e| RepoClientError::Connection(e.to_string()))?;

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            self.inner
                .signin(Root {
                    username: username.as_str(),
                    password: password.as_str(),
                })
                .await?;
        }

        self.inner
            .use_ns(self.namespace.as_str())
            .use_db(self.database.as_str())
            .await?;

        info!("repo client connected to {}", self.endpoint);
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), RepoClientError> {
        self.inner.health().await?;
        Ok(())
    }

    /// The underlying store handle. Query text and bindings live with the
    /// callers; this client only owns the connection lifecycle.
    pub fn db(&self) -> &Surreal<Any> {
        &self.inner
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
