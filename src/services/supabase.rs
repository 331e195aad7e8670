use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::models::Profile;
use crate::services::store::{assemble_profiles, ChipAssignment, ProfileStore, StoreError};

/// Errors that can occur when talking to the Supabase REST API
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the Supabase schema
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub profiles: String,
    pub profile_interests: String,
    pub profile_lifestyle: String,
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            profiles: "profiles".to_string(),
            profile_interests: "profile_interest_chips".to_string(),
            profile_lifestyle: "profile_lifestyle_chips".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: String,
    #[serde(default)]
    bio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChipRow {
    profile_id: String,
    #[serde(alias = "interest_chips", alias = "lifestyle_chips")]
    chip: Option<ChipLabel>,
}

#[derive(Debug, Deserialize)]
struct ChipLabel {
    label: String,
}

impl ChipRow {
    fn into_assignment(self) -> Option<ChipAssignment> {
        let label = self.chip?.label;
        Some(ChipAssignment {
            profile_id: self.profile_id,
            label,
        })
    }
}

/// Supabase (PostgREST) profile client
///
/// Fetches a batch of profiles with three reads: base rows, interest chips
/// and lifestyle chips, each filtered with `in.(...)` on the requested ids.
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        api_key: String,
        tables: SupabaseTables,
        timeout: Duration,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    /// GET a table with a `select` projection and an `in.(...)` filter
    async fn select_in<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        column: &str,
        ids: &[String],
    ) -> Result<Vec<T>, SupabaseError> {
        let url = format!(
            "{}?select={}&{}={}",
            self.table_url(table),
            urlencoding::encode(select),
            column,
            urlencoding::encode(&in_filter(ids))
        );

        tracing::debug!("Querying {} for {} ids", table, ids.len());

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Supabase query on {} failed: {} - {}", table, status, body);
            return Err(SupabaseError::ApiError(format!(
                "Failed to query {}: {}",
                table, status
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            SupabaseError::InvalidResponse(format!("Failed to parse {} rows: {}", table, e))
        })
    }

    /// Fetch profiles with their interest and lifestyle labels
    pub async fn get_profiles(&self, ids: &[String]) -> Result<HashMap<String, Profile>, SupabaseError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let base: Vec<ProfileRow> = self
            .select_in(&self.tables.profiles, "id,bio", "id", ids)
            .await?;

        let interests: Vec<ChipRow> = self
            .select_in(
                &self.tables.profile_interests,
                "profile_id,interest_chips(label)",
                "profile_id",
                ids,
            )
            .await?;

        let lifestyle: Vec<ChipRow> = self
            .select_in(
                &self.tables.profile_lifestyle,
                "profile_id,lifestyle_chips(label)",
                "profile_id",
                ids,
            )
            .await?;

        let profiles = assemble_profiles(
            base.into_iter().map(|row| (row.id, row.bio)).collect(),
            interests.into_iter().filter_map(ChipRow::into_assignment).collect(),
            lifestyle.into_iter().filter_map(ChipRow::into_assignment).collect(),
        );

        tracing::debug!("Fetched {} of {} requested profiles", profiles.len(), ids.len());

        Ok(profiles)
    }

    /// Cheap reachability check: a one-row select on the profiles table
    pub async fn ping(&self) -> Result<bool, SupabaseError> {
        let url = format!("{}?select=id&limit=1", self.table_url(&self.tables.profiles));

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

/// PostgREST list literal: `("a","b")` with quotes and backslashes escaped
fn in_filter(ids: &[String]) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn fetch_profiles(&self, ids: &[String]) -> Result<HashMap<String, Profile>, StoreError> {
        Ok(self.get_profiles(ids).await?)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(self.ping().await?)
    }
}
