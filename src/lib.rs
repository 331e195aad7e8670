//! Affinity Engine - compatibility scoring service
//!
//! Scores a target profile against a list of candidates on shared interests,
//! lifestyle fit, bio tone and (optionally) activity rhythm, then calibrates,
//! explains and ranks the results.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{calibrate, combine_scores, MatchError, Matcher};
pub use self::models::{
    Profile, ScoreCandidatesRequest, ScoreCandidatesResponse, ScoreResult, ScoringWeights,
};
pub use self::services::{InMemoryStore, LexiconSentiment, ProfileStore, SentimentAnalyzer};
