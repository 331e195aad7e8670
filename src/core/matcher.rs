use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::core::{
    activity::activity_score,
    explanation::build_explanation,
    interests::{interest_score, shared_interests},
    lifestyle::lifestyle_score,
    personality::personality_score,
    scoring::{calibrate, combine_scores, DEFAULT_CALIBRATION_EXPONENT},
};
use crate::models::{FactorScores, Profile, ScoreCandidatesRequest, ScoreCandidatesResponse, ScoreResult, ScoringWeights};
use crate::services::sentiment::{LexiconSentiment, SentimentAnalyzer, SentimentError};
use crate::services::store::{ProfileStore, StoreError};

/// Request-level failures. Missing candidates are never an error.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Profile store failed: {0}")]
    Store(#[from] StoreError),

    #[error("Sentiment analysis failed: {0}")]
    Sentiment(#[from] SentimentError),

    #[error("Target profile not found: {0}")]
    TargetNotFound(String),
}

/// Compatibility scoring orchestrator
///
/// # Pipeline Stages
/// 1. Feature extraction (interests, lifestyle, personality, optional activity)
/// 2. Weighted combination into a raw score
/// 3. Power-curve calibration
/// 4. Explanation selection
/// 5. Ranking
///
/// Each candidate is scored independently against the target.
#[derive(Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    calibration_exponent: f64,
    sentiment: Arc<dyn SentimentAnalyzer>,
}

impl Matcher {
    pub fn new(
        weights: ScoringWeights,
        calibration_exponent: f64,
        sentiment: Arc<dyn SentimentAnalyzer>,
    ) -> Self {
        Self {
            weights,
            calibration_exponent,
            sentiment,
        }
    }

    /// Default weights, default calibration and the shared lexicon analyzer
    pub fn with_default_weights() -> Self {
        Self::new(
            ScoringWeights::default(),
            DEFAULT_CALIBRATION_EXPONENT,
            LexiconSentiment::shared(),
        )
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn calibration_exponent(&self) -> f64 {
        self.calibration_exponent
    }

    /// Score one candidate against the target
    pub fn score_candidate(&self, target: &Profile, candidate: &Profile) -> Result<ScoreResult, SentimentError> {
        let interest = interest_score(&target.interests, &candidate.interests);
        let lifestyle = lifestyle_score(&target.lifestyle, &candidate.lifestyle);
        let personality = personality_score(&target.bio, &candidate.bio, self.sentiment.as_ref())?;

        // Only computed when it carries weight
        let activity = (self.weights.activity > 0.0)
            .then(|| activity_score(target.activity.as_ref(), candidate.activity.as_ref()));

        let factors = FactorScores {
            interest,
            lifestyle,
            personality,
            activity,
        };

        let raw_score = combine_scores(&factors, &self.weights);
        let score = calibrate(raw_score, self.calibration_exponent);

        let shared = shared_interests(&target.interests, &candidate.interests);
        let explanation = build_explanation(&shared, lifestyle, activity.unwrap_or(0.0), personality);

        Ok(ScoreResult {
            candidate_id: candidate.id.clone(),
            score,
            raw_score,
            explanation,
            factors,
        })
    }

    /// Score every candidate and sort by score, descending
    ///
    /// Sorting uses the unrounded raw score, which orders identically to the
    /// calibrated score. The sort is stable, so exact ties keep input order.
    pub fn rank(&self, target: &Profile, candidates: &[Profile]) -> Result<Vec<ScoreResult>, SentimentError> {
        let mut results = candidates
            .iter()
            .map(|candidate| self.score_candidate(target, candidate))
            .collect::<Result<Vec<_>, _>>()?;

        sort_results(&mut results);
        Ok(results)
    }

    /// Fetch profiles for a request, then score and rank the candidates
    ///
    /// Candidates are scored exactly as listed, repeats and the target's own
    /// id included. Ids the store has no record for are skipped. A store or
    /// sentiment failure aborts the whole request.
    pub async fn score_request(
        &self,
        store: &dyn ProfileStore,
        request: &ScoreCandidatesRequest,
    ) -> Result<ScoreCandidatesResponse, MatchError> {
        let target_id = &request.target_user_id;

        // One fetch for the distinct ids; the listing order is applied below
        let mut seen = HashSet::new();
        let mut all_ids = Vec::with_capacity(request.candidate_user_ids.len() + 1);
        for id in std::iter::once(target_id).chain(&request.candidate_user_ids) {
            if seen.insert(id.as_str()) {
                all_ids.push(id.clone());
            }
        }

        let profiles = store.fetch_profiles(&all_ids).await?;

        let target = profiles
            .get(target_id)
            .ok_or_else(|| MatchError::TargetNotFound(target_id.clone()))?;

        let mut candidates = Vec::with_capacity(request.candidate_user_ids.len());
        for id in &request.candidate_user_ids {
            match profiles.get(id) {
                Some(profile) => candidates.push(profile.clone()),
                None => tracing::debug!("Candidate {} has no profile, skipping", id),
            }
        }

        let results = self.rank(target, &candidates)?;

        tracing::info!(
            "Scored {} candidates for {} ({} requested)",
            results.len(),
            target_id,
            request.candidate_user_ids.len()
        );

        Ok(ScoreCandidatesResponse {
            target_user_id: target_id.clone(),
            results,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("weights", &self.weights)
            .field("calibration_exponent", &self.calibration_exponent)
            .finish_non_exhaustive()
    }
}

/// Stable descending sort on the raw score
pub fn sort_results(results: &mut [ScoreResult]) {
    results.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));
}
