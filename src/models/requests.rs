use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to score candidates against a target profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreCandidatesRequest {
    #[validate(length(min = 1))]
    pub target_user_id: String,
    #[serde(default)]
    pub candidate_user_ids: Vec<String>,
}

impl ScoreCandidatesRequest {
    pub fn new<I, S>(target_user_id: impl Into<String>, candidate_user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_user_id: target_user_id.into(),
            candidate_user_ids: candidate_user_ids.into_iter().map(Into::into).collect(),
        }
    }
}
