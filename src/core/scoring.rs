use crate::models::{FactorScores, ScoringWeights};

/// Default exponent of the calibration power curve
pub const DEFAULT_CALIBRATION_EXPONENT: f64 = 1.35;

/// Combine sub-scores into a raw score (0-100)
///
/// Scoring formula:
/// raw = 100 * (
///     interest * 0.4 +       # Jaccard overlap of interest tags
///     lifestyle * 0.3 +      # Diet / education compatibility
///     personality * 0.3 +    # Bio tone and keyword affinity
///     activity * 0.0         # Disabled unless configured
/// )
pub fn combine_scores(factors: &FactorScores, weights: &ScoringWeights) -> f64 {
    let total = (factors.interest * weights.interest
        + factors.lifestyle * weights.lifestyle
        + factors.personality * weights.personality
        + factors.activity.unwrap_or(0.0) * weights.activity)
        * 100.0;

    total.clamp(0.0, 100.0)
}

/// Calibrated score (0-100) from a raw score
///
/// Normalizes to [0, 1], applies `x^exponent` and rescales. With an exponent
/// above 1 low scores are compressed and high scores stretched; the curve is
/// strictly increasing on [0, 1] so ranking order never changes.
#[inline]
pub fn calibrate(raw_score: f64, exponent: f64) -> f64 {
    let x = (raw_score / 100.0).clamp(0.0, 1.0);
    round_to(x.powf(exponent) * 100.0, 2)
}

/// Round to a fixed number of decimal places
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
