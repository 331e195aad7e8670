/// Maximum number of reasons returned per candidate
pub const MAX_REASONS: usize = 3;

/// Shared tags named in the interest reason
const MAX_NAMED_INTERESTS: usize = 3;

pub const LIFESTYLE_THRESHOLD: f64 = 0.75;
pub const ACTIVITY_THRESHOLD: f64 = 0.70;
pub const PERSONALITY_THRESHOLD: f64 = 0.60;

pub const LIFESTYLE_REASON: &str = "Lifestyle choices align well";
pub const ACTIVITY_REASON: &str = "You have similar activity patterns";
pub const PERSONALITY_REASON: &str = "Your personality tone feels compatible";
pub const FALLBACK_REASON: &str = "Profiles show potential compatibility";

/// Build up to three human-readable reasons, in fixed priority order
///
/// Priority: shared interests, lifestyle, activity, personality. Pass 0.0
/// for `activity` when the factor is not computed so its rule never fires.
/// When no rule fires a single generic sentence is returned.
pub fn build_explanation(
    shared_interests: &[String],
    lifestyle: f64,
    activity: f64,
    personality: f64,
) -> Vec<String> {
    let mut reasons = Vec::with_capacity(MAX_REASONS);

    if !shared_interests.is_empty() {
        let named: Vec<&str> = shared_interests
            .iter()
            .take(MAX_NAMED_INTERESTS)
            .map(String::as_str)
            .collect();
        reasons.push(format!("You both like {}", named.join(", ")));
    }

    if reasons.len() < MAX_REASONS && lifestyle >= LIFESTYLE_THRESHOLD {
        reasons.push(LIFESTYLE_REASON.to_string());
    }

    if reasons.len() < MAX_REASONS && activity >= ACTIVITY_THRESHOLD {
        reasons.push(ACTIVITY_REASON.to_string());
    }

    if reasons.len() < MAX_REASONS && personality >= PERSONALITY_THRESHOLD {
        reasons.push(PERSONALITY_REASON.to_string());
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    reasons.truncate(MAX_REASONS);
    reasons
}
