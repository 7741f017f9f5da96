use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;

use super::pool::create_lazy_pool;

pub const MAX_COLLECTIONS: usize = 10;

const LIST_TABLES: &str = "SELECT table_name::text FROM information_schema.tables \
     WHERE table_schema NOT IN ('pg_catalog', 'information_schema') \
     ORDER BY table_name \
     LIMIT $1";

/// Point-in-time result of a database check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// No database is configured for this process.
    Unavailable,
    Connected {
        database_name: String,
        collections: Vec<String>,
    },
    ConnectedWithError {
        error: String,
    },
}

#[async_trait::async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn probe(&self) -> ProbeOutcome;
}

pub struct NoDatabase;

#[async_trait::async_trait]
impl DatabaseProbe for NoDatabase {
    async fn probe(&self) -> ProbeOutcome {
        ProbeOutcome::Unavailable
    }
}

pub struct PostgresProbe {
    pool: PgPool,
}

impl PostgresProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DatabaseProbe for PostgresProbe {
    #[tracing::instrument(name = "db probe", skip(self), fields(db.system = "postgresql"))]
    async fn probe(&self) -> ProbeOutcome {
        let database_name = match sqlx::query_scalar::<_, String>("SELECT current_database()::text")
            .fetch_one(&self.pool)
            .await
        {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(error = %e, "Database probe failed");
                return ProbeOutcome::ConnectedWithError {
                    error: e.to_string(),
                };
            }
        };

        match sqlx::query_scalar::<_, String>(LIST_TABLES)
            .bind(MAX_COLLECTIONS as i64)
            .fetch_all(&self.pool)
            .await
        {
            Ok(collections) => ProbeOutcome::Connected {
                database_name,
                collections,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Listing tables failed");
                ProbeOutcome::ConnectedWithError {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Resolves the probe once at startup. A malformed `DATABASE_URL` is logged
/// and treated as no database.
pub fn probe_from_config(config: &Config) -> Arc<dyn DatabaseProbe> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set, database probe disabled");
        return Arc::new(NoDatabase);
    };

    match create_lazy_pool(database_url) {
        Ok(pool) => Arc::new(PostgresProbe::new(pool)),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid DATABASE_URL, database probe disabled");
            Arc::new(NoDatabase)
        }
    }
}
