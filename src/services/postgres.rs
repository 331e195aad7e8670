use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::models::Profile;
use crate::services::store::{assemble_profiles, ChipAssignment, ProfileStore, StoreError};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

const PROFILES_QUERY: &str = r#"
    SELECT id::text AS id, bio
    FROM profiles
    WHERE id::text = ANY($1)
"#;

const INTERESTS_QUERY: &str = r#"
    SELECT pic.profile_id::text AS profile_id, ic.label
    FROM profile_interest_chips pic
    JOIN interest_chips ic ON ic.id = pic.chip_id
    WHERE pic.profile_id::text = ANY($1)
    ORDER BY pic.created_at
"#;

const LIFESTYLE_QUERY: &str = r#"
    SELECT plc.profile_id::text AS profile_id, lc.label
    FROM profile_lifestyle_chips plc
    JOIN lifestyle_chips lc ON lc.id = plc.chip_id
    WHERE plc.profile_id::text = ANY($1)
    ORDER BY plc.created_at
"#;

/// PostgreSQL profile reader
///
/// Reads the same profile / chip tables the Supabase REST API exposes, but
/// over a direct connection pool.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        if max_connections == 0 || min_connections > max_connections {
            return Err(PostgresError::InvalidInput(format!(
                "invalid pool size: min {} / max {}",
                min_connections, max_connections
            )));
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Fetch profiles with their interest and lifestyle labels
    pub async fn get_profiles(&self, ids: &[String]) -> Result<HashMap<String, Profile>, PostgresError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let base = sqlx::query(PROFILES_QUERY)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(base_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let interests = self.fetch_chips(INTERESTS_QUERY, ids).await?;
        let lifestyle = self.fetch_chips(LIFESTYLE_QUERY, ids).await?;

        let profiles = assemble_profiles(base, interests, lifestyle);

        tracing::debug!("Fetched {} of {} requested profiles", profiles.len(), ids.len());

        Ok(profiles)
    }

    async fn fetch_chips(&self, query: &str, ids: &[String]) -> Result<Vec<ChipAssignment>, PostgresError> {
        let rows = sqlx::query(query).bind(ids).fetch_all(&self.pool).await?;

        rows.iter()
            .map(chip_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }

    /// Health check for the database connection
    pub async fn ping(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn base_from_row(row: &PgRow) -> Result<(String, Option<String>), sqlx::Error> {
    Ok((row.try_get("id")?, row.try_get("bio")?))
}

fn chip_from_row(row: &PgRow) -> Result<ChipAssignment, sqlx::Error> {
    Ok(ChipAssignment {
        profile_id: row.try_get("profile_id")?,
        label: row.try_get("label")?,
    })
}

#[async_trait]
impl ProfileStore for PostgresClient {
    async fn fetch_profiles(&self, ids: &[String]) -> Result<HashMap<String, Profile>, StoreError> {
        Ok(self.get_profiles(ids).await?)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(self.ping().await?)
    }
}
