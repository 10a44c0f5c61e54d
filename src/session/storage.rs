//! Durable storage backends for the session.

use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use super::Session;
use crate::errors::ClientError;
use crate::models::User;

/// Where the session is kept between runs.
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    /// Read the stored session, if any.
    async fn load(&self) -> Result<Option<Session>, ClientError>;

    /// Overwrite the stored session.
    async fn save(&self, session: &Session) -> Result<(), ClientError>;

    /// Remove the stored session.
    async fn clear(&self) -> Result<(), ClientError>;
}

/// Ephemeral storage; survives store re-creation but not the process.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<Session>>,
}

#[async_trait]
impl SessionPersistence for MemorySessionStorage {
    async fn load(&self) -> Result<Option<Session>, ClientError> {
        Ok(self.slot.lock().unwrap_or_else(|p| p.into_inner()).clone())
    }

    async fn save(&self, session: &Session) -> Result<(), ClientError> {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }
}

/// SQLite-backed storage; the file outlives the process.
#[derive(Clone)]
pub struct SqliteSessionStorage {
    pool: SqlitePool,
}

impl SqliteSessionStorage {
    /// Open (creating if needed) the session database at `db_path`.
    pub async fn open(db_path: &Path) -> Result<Self, ClientError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let options = SqliteConnectOptions::from_str(&db_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;

        Ok(Self { pool })
    }
}

/// Create the single-row session table.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS session (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            token TEXT NOT NULL,
            user_json TEXT,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl SessionPersistence for SqliteSessionStorage {
    async fn load(&self) -> Result<Option<Session>, ClientError> {
        let row = sqlx::query("SELECT token, user_json FROM session WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let token: String = row.get("token");
        let user_json: Option<String> = row.get("user_json");
        let user = match user_json {
            Some(json) => Some(serde_json::from_str::<User>(&json)?),
            None => None,
        };

        Ok(Some(Session::authenticated(token, user)))
    }

    async fn save(&self, session: &Session) -> Result<(), ClientError> {
        let Some(token) = session.token() else {
            return self.clear().await;
        };
        let user_json = session.user().map(serde_json::to_string).transpose()?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO session (id, token, user_json, updated_at) VALUES (1, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                user_json = excluded.user_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(token)
        .bind(&user_json)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        sqlx::query("DELETE FROM session WHERE id = 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
