use crate::core::scoring::round_to;
use crate::services::sentiment::{SentimentAnalyzer, SentimentError};

/// Score used when either bio is missing
pub const NEUTRAL_PERSONALITY_SCORE: f64 = 0.5;

const TONE_WEIGHT: f64 = 0.4;
const SOCIABILITY_WEIGHT: f64 = 0.2;
const AMBITION_WEIGHT: f64 = 0.2;
const CREATIVITY_WEIGHT: f64 = 0.2;

pub const SOCIAL_WORDS: &[&str] = &[
    "friends",
    "people",
    "social",
    "meet",
    "talk",
    "community",
    "network",
    "hangout",
    "team",
];

pub const AMBITION_WORDS: &[&str] = &[
    "career",
    "goal",
    "startup",
    "business",
    "growth",
    "learn",
    "learning",
    "ambitious",
    "driven",
];

pub const CREATIVE_WORDS: &[&str] = &[
    "music",
    "art",
    "design",
    "write",
    "writing",
    "photography",
    "dance",
    "creative",
];

/// Signals extracted from one bio, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSignals {
    pub tone: f64,
    pub sociability: f64,
    pub ambition: f64,
    pub creativity: f64,
}

impl TextSignals {
    /// Extract signals from a bio. Only the sentiment call can fail.
    ///
    /// The analyzer sees the bio as written, since casing carries emphasis.
    /// Keyword matching is case-insensitive.
    pub fn extract(text: &str, sentiment: &dyn SentimentAnalyzer) -> Result<Self, SentimentError> {
        let polarity = sentiment.polarity(text)?.clamp(-1.0, 1.0);
        let lowered = text.to_lowercase();

        Ok(Self {
            tone: (polarity + 1.0) / 2.0,
            sociability: keyword_fraction(&lowered, SOCIAL_WORDS),
            ambition: keyword_fraction(&lowered, AMBITION_WORDS),
            creativity: keyword_fraction(&lowered, CREATIVE_WORDS),
        })
    }
}

/// Fraction of `words` that occur as substrings of the (lowercased) text
#[inline]
pub fn keyword_fraction(lowered: &str, words: &[&str]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let hits = words.iter().filter(|w| lowered.contains(*w)).count();
    hits as f64 / words.len() as f64
}

#[inline]
fn closeness(a: f64, b: f64) -> f64 {
    1.0 - (a - b).abs()
}

/// Personality affinity from two sets of text signals, rounded to 4 decimals
pub fn signal_affinity(a: &TextSignals, b: &TextSignals) -> f64 {
    let score = TONE_WEIGHT * closeness(a.tone, b.tone)
        + SOCIABILITY_WEIGHT * closeness(a.sociability, b.sociability)
        + AMBITION_WEIGHT * closeness(a.ambition, b.ambition)
        + CREATIVITY_WEIGHT * closeness(a.creativity, b.creativity);

    round_to(score.clamp(0.0, 1.0), 4)
}

/// Personality / text affinity (0-1) between two bios
///
/// Returns the neutral 0.5 when either bio is empty, without consulting the
/// sentiment analyzer.
pub fn personality_score(
    target_bio: &str,
    candidate_bio: &str,
    sentiment: &dyn SentimentAnalyzer,
) -> Result<f64, SentimentError> {
    if target_bio.is_empty() || candidate_bio.is_empty() {
        return Ok(NEUTRAL_PERSONALITY_SCORE);
    }

    let a = TextSignals::extract(target_bio, sentiment)?;
    let b = TextSignals::extract(candidate_bio, sentiment)?;

    Ok(signal_affinity(&a, &b))
}
