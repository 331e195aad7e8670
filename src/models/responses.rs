use serde::{Deserialize, Serialize};
use crate::models::domain::ScoreResult;

/// Ranked compatibility results for one target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreCandidatesResponse {
    pub target_user_id: String,
    /// Sorted by score, descending
    pub results: Vec<ScoreResult>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
