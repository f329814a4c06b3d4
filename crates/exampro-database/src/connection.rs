//! The PostgreSQL pool behind the notification and audit repositories.

use std::fmt;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use exampro_core::config::DatabaseConfig;
use exampro_core::error::{AppError, ErrorKind};
use exampro_core::result::AppResult;

use crate::migration::run_migrations;

/// URL schemes accepted for PostgreSQL.
const POSTGRES_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

/// Connection pool for the notification database.
///
/// Only the redacted form of the URL is kept, so it is safe to log.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
    url: String,
}

impl DatabasePool {
    /// Opens the pool and, if `run_migrations` is set, brings the schema up
    /// to date before any repository touches it.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        let url = redact_url(&config.url);
        if !POSTGRES_SCHEMES.iter().any(|s| config.url.starts_with(s)) {
            return Err(AppError::configuration(format!(
                "Unsupported database URL: {url}"
            )));
        }

        info!(
            url = %url,
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Opening notification database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Cannot reach notification database at {url}"),
                    e,
                )
            })?;

        if config.run_migrations {
            run_migrations(&pool).await?;
        }

        info!(url = %url, "Notification database ready");
        Ok(Self { pool, url })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The database URL with any password masked.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Round-trips a trivial query; failures are logged, not returned.
    pub async fn health(&self) -> DatabaseHealth {
        match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => DatabaseHealth::Connected,
            Err(e) => {
                warn!(url = %self.url, error = %e, "Notification database health check failed");
                DatabaseHealth::Unavailable
            }
        }
    }

    /// Waits for in-flight queries and closes every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!(url = %self.url, "Notification database closed");
    }
}

/// State of the storage backend as reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseHealth {
    /// In-process stores; nothing to reach.
    Memory,
    /// PostgreSQL answered.
    Connected,
    /// PostgreSQL did not answer.
    Unavailable,
}

impl DatabaseHealth {
    /// Checks `pool`, or reports [`DatabaseHealth::Memory`] when there is none.
    pub async fn check(pool: Option<&DatabasePool>) -> Self {
        match pool {
            None => Self::Memory,
            Some(pool) => pool.health().await,
        }
    }

    /// Wire name used in the health response.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Connected => "connected",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for DatabaseHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Masks the password in the userinfo part of a connection URL.
pub(crate) fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://").map(|p| p + 3) else {
        return url.to_string();
    };
    let authority_end = url[scheme_end..]
        .find('/')
        .map_or(url.len(), |p| scheme_end + p);
    let authority = &url[scheme_end..authority_end];

    match authority.rfind('@') {
        Some(at) => match authority[..at].find(':') {
            Some(colon) => format!(
                "{}{}:****{}",
                &url[..scheme_end],
                &authority[..colon],
                &url[scheme_end + at..]
            ),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}
