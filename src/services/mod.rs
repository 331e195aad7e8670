// Service exports
pub mod cache;
pub mod postgres;
pub mod sentiment;
pub mod store;
pub mod supabase;

pub use cache::{CacheError, CacheKey, CacheManager, CachedStore};
pub use postgres::{PostgresClient, PostgresError};
pub use sentiment::{LexiconSentiment, SentimentAnalyzer, SentimentError};
pub use store::{InMemoryStore, ProfileStore, StoreError};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
