//! Activity / responsiveness similarity.
//!
//! Compares when two people are active, how quickly they reply and how
//! engaged they are. The factor carries zero weight by default and is only
//! computed when the configured activity weight is positive.

use crate::models::ActivitySignals;

const HOURS_IN_DAY: usize = 24;
const DEFAULT_RESPONSE_HOURS: f64 = 24.0;
const DEFAULT_ENGAGEMENT: f64 = 0.5;

const HOURS_WEIGHT: f64 = 0.5;
const RESPONSE_WEIGHT: f64 = 0.3;
const ENGAGEMENT_WEIGHT: f64 = 0.2;

/// Histogram padded or truncated to 24 buckets and scaled to sum to 1
pub fn normalize_hours(hist: Option<&[f64]>) -> [f64; HOURS_IN_DAY] {
    let mut buckets = [0.0; HOURS_IN_DAY];
    if let Some(hist) = hist {
        for (slot, value) in buckets.iter_mut().zip(hist.iter()) {
            *slot = if value.is_finite() { *value } else { 0.0 };
        }
    }

    let sum: f64 = buckets.iter().sum();
    if sum > 0.0 {
        for slot in buckets.iter_mut() {
            *slot /= sum;
        }
    }
    buckets
}

/// Cosine similarity, 0.0 if either vector has zero norm
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Response-latency closeness on a log scale
#[inline]
pub fn response_closeness(hours_a: f64, hours_b: f64) -> f64 {
    let a = (hours_a.max(0.0) + 1.0).ln();
    let b = (hours_b.max(0.0) + 1.0).ln();
    (1.0 - (a - b).abs() / 3.0).clamp(0.0, 1.0)
}

/// Activity similarity (0-1). Missing signals fall back to 24h latency and 0.5 engagement.
pub fn activity_score(target: Option<&ActivitySignals>, candidate: Option<&ActivitySignals>) -> f64 {
    let default = ActivitySignals::default();
    let a = target.unwrap_or(&default);
    let b = candidate.unwrap_or(&default);

    let hours = cosine_similarity(
        &normalize_hours(a.hours_hist.as_deref()),
        &normalize_hours(b.hours_hist.as_deref()),
    );

    let response = response_closeness(
        a.med_resp_time_hours.unwrap_or(DEFAULT_RESPONSE_HOURS),
        b.med_resp_time_hours.unwrap_or(DEFAULT_RESPONSE_HOURS),
    );

    let engagement = 1.0
        - (a.engagement_level.unwrap_or(DEFAULT_ENGAGEMENT)
            - b.engagement_level.unwrap_or(DEFAULT_ENGAGEMENT))
        .abs();

    (HOURS_WEIGHT * hours + RESPONSE_WEIGHT * response + ENGAGEMENT_WEIGHT * engagement)
        .clamp(0.0, 1.0)
}
