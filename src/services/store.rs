use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::models::Profile;
use crate::services::postgres::PostgresError;
use crate::services::supabase::SupabaseError;

/// Errors raised by a profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Supabase error: {0}")]
    Supabase(#[from] SupabaseError),

    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] PostgresError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Source of profile records
///
/// `fetch_profiles` returns an entry for every requested id that exists.
/// Ids without a record are simply absent from the map; only transport or
/// backend failures are errors.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profiles(&self, ids: &[String]) -> Result<HashMap<String, Profile>, StoreError>;

    /// Whether the backing store is reachable
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[async_trait]
impl<T: ProfileStore + ?Sized> ProfileStore for Arc<T> {
    async fn fetch_profiles(&self, ids: &[String]) -> Result<HashMap<String, Profile>, StoreError> {
        (**self).fetch_profiles(ids).await
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        (**self).health_check().await
    }
}

/// A chip label attached to a profile (interest or lifestyle)
#[derive(Debug, Clone)]
pub struct ChipAssignment {
    pub profile_id: String,
    pub label: String,
}

/// Join base profile rows with their interest and lifestyle chips
///
/// Chips pointing at a profile that was not returned are dropped.
pub fn assemble_profiles(
    base: Vec<(String, Option<String>)>,
    interests: Vec<ChipAssignment>,
    lifestyle: Vec<ChipAssignment>,
) -> HashMap<String, Profile> {
    let mut profiles: HashMap<String, Profile> = base
        .into_iter()
        .map(|(id, bio)| {
            let profile = Profile::new(id.clone()).with_bio(bio.unwrap_or_default());
            (id, profile)
        })
        .collect();

    for chip in interests {
        if let Some(profile) = profiles.get_mut(&chip.profile_id) {
            profile.push_interest(&chip.label);
        }
    }

    for chip in lifestyle {
        if let Some(profile) = profiles.get_mut(&chip.profile_id) {
            profile.lifestyle.apply_label(&chip.label);
        }
    }

    profiles
}

/// Profile store backed by an in-process map
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    profiles: HashMap<String, Profile>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_profiles<I: IntoIterator<Item = Profile>>(profiles: I) -> Self {
        Self {
            profiles: profiles.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    pub fn insert(&mut self, profile: Profile) {
        self.profiles.insert(profile.id.clone(), profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn fetch_profiles(&self, ids: &[String]) -> Result<HashMap<String, Profile>, StoreError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.profiles.get(id).map(|p| (id.clone(), p.clone())))
            .collect())
    }
}
