// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    normalize_tags, ActivitySignals, Diet, EducationTier, FactorScores, LifestyleAttributes, Profile,
    ScoreResult, ScoringWeights,
};
pub use requests::ScoreCandidatesRequest;
pub use responses::{ErrorResponse, HealthResponse, ScoreCandidatesResponse};
