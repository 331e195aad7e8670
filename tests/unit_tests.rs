// Unit tests for Affinity Engine

use affinity_engine::core::{
    activity::activity_score,
    explanation::{build_explanation, FALLBACK_REASON, MAX_REASONS},
    interests::interest_score,
    lifestyle::{lifestyle_score, NEUTRAL_LIFESTYLE_SCORE},
    matcher::sort_results,
    personality::{personality_score, NEUTRAL_PERSONALITY_SCORE},
    scoring::{calibrate, combine_scores, DEFAULT_CALIBRATION_EXPONENT},
};
use affinity_engine::models::{
    ActivitySignals, Diet, EducationTier, FactorScores, LifestyleAttributes, ScoreResult,
    ScoringWeights,
};
use affinity_engine::services::{LexiconSentiment, SentimentAnalyzer, SentimentError};

struct NeutralSentiment;

impl SentimentAnalyzer for NeutralSentiment {
    fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
        Ok(0.0)
    }
}

fn result(id: &str, raw_score: f64) -> ScoreResult {
    ScoreResult {
        candidate_id: id.to_string(),
        score: calibrate(raw_score, DEFAULT_CALIBRATION_EXPONENT),
        raw_score,
        explanation: vec![],
        factors: FactorScores::default(),
    }
}

#[test]
fn test_interest_score_symmetric_and_bounded() {
    let pairs: [(&[&str], &[&str]); 4] = [
        (&["music", "travel"], &["music", "sports"]),
        (&["a"], &["a", "b", "c", "d"]),
        (&["chess"], &["hiking"]),
        (&[], &["music"]),
    ];

    for (a, b) in pairs {
        let ab = interest_score(a, b);
        let ba = interest_score(b, a);
        assert_eq!(ab, ba);
        assert!((0.0..=1.0).contains(&ab));
    }
}

#[test]
fn test_interest_score_identical_sets() {
    assert_eq!(interest_score(&["music", "art"], &["art", "music"]), 1.0);
}

#[test]
fn test_interest_score_empty_side_is_zero() {
    let empty: [&str; 0] = [];
    assert_eq!(interest_score(&empty, &empty), 0.0);
    assert_eq!(interest_score(&["music"], &empty), 0.0);
}

#[test]
fn test_strict_veg_veto_regardless_of_education() {
    let target = LifestyleAttributes::default()
        .with_strict_veg(true)
        .with_diet(Diet::Veg)
        .with_education(EducationTier::Master);
    let candidate = LifestyleAttributes::default()
        .with_diet(Diet::NonVeg)
        .with_education(EducationTier::Master);

    assert_eq!(lifestyle_score(&target, &candidate), 0.0);
}

#[test]
fn test_veto_is_one_directional() {
    let strict = LifestyleAttributes::default().with_strict_veg(true).with_diet(Diet::Veg);
    let nonveg = LifestyleAttributes::default().with_diet(Diet::NonVeg);

    assert_eq!(lifestyle_score(&strict, &nonveg), 0.0);
    // Reverse direction uses the diet table: nonveg -> veg is 0.5
    assert_eq!(lifestyle_score(&nonveg, &strict), 0.5);
}

#[test]
fn test_lifestyle_neutral_when_nothing_comparable() {
    let only_diet = LifestyleAttributes::default().with_diet(Diet::Vegan);
    let only_education = LifestyleAttributes::default().with_education(EducationTier::Doctorate);

    assert_eq!(
        lifestyle_score(&LifestyleAttributes::default(), &LifestyleAttributes::default()),
        NEUTRAL_LIFESTYLE_SCORE
    );
    assert_eq!(lifestyle_score(&only_diet, &only_education), NEUTRAL_LIFESTYLE_SCORE);
}

#[test]
fn test_lifestyle_education_only() {
    let a = LifestyleAttributes::default().with_education(EducationTier::HighSchool);
    let b = LifestyleAttributes::default().with_education(EducationTier::Doctorate);

    // Four tiers apart
    assert_eq!(lifestyle_score(&a, &b), 0.0);
}

#[test]
fn test_personality_neutral_for_empty_bio() {
    let sentiment = LexiconSentiment::new();
    let score = personality_score("", "I love music and my friends", &sentiment).unwrap();
    assert_eq!(score, NEUTRAL_PERSONALITY_SCORE);
}

#[test]
fn test_personality_identical_bios_score_one() {
    let bio = "Startup founder who loves music, art and meeting people";
    let score = personality_score(bio, bio, &NeutralSentiment).unwrap();
    assert_eq!(score, 1.0);
}

#[test]
fn test_personality_bounded() {
    let sentiment = LexiconSentiment::new();
    let score = personality_score(
        "I love great people, happy days and music",
        "I hate drama and fake liars",
        &sentiment,
    )
    .unwrap();
    assert!((0.0..=1.0).contains(&score));
}

#[test]
fn test_calibration_bounds_and_fixed_points() {
    assert_eq!(calibrate(0.0, DEFAULT_CALIBRATION_EXPONENT), 0.0);
    assert_eq!(calibrate(100.0, DEFAULT_CALIBRATION_EXPONENT), 100.0);
    assert_eq!(calibrate(-5.0, DEFAULT_CALIBRATION_EXPONENT), 0.0);
    assert_eq!(calibrate(140.0, DEFAULT_CALIBRATION_EXPONENT), 100.0);
}

#[test]
fn test_calibration_monotone_and_compressing() {
    let mut previous = -1.0;
    for raw in (0..=100).map(f64::from) {
        let calibrated = calibrate(raw, DEFAULT_CALIBRATION_EXPONENT);
        assert!(calibrated >= previous);
        assert!(calibrated <= raw + 1e-9);
        previous = calibrated;
    }
}

#[test]
fn test_combined_score_range() {
    let weights = ScoringWeights::default();
    let all_zero = FactorScores::default();
    let all_one = FactorScores {
        interest: 1.0,
        lifestyle: 1.0,
        personality: 1.0,
        activity: Some(1.0),
    };

    assert_eq!(combine_scores(&all_zero, &weights), 0.0);
    assert!((combine_scores(&all_one, &weights) - 100.0).abs() < 1e-9);
}

#[test]
fn test_activity_ignored_at_zero_weight() {
    let weights = ScoringWeights::default();
    let base = FactorScores {
        interest: 0.5,
        lifestyle: 0.5,
        personality: 0.5,
        activity: None,
    };
    let with_activity = FactorScores {
        activity: Some(1.0),
        ..base
    };

    assert_eq!(combine_scores(&base, &weights), combine_scores(&with_activity, &weights));
}

#[test]
fn test_activity_score_bounded_without_signals() {
    let score = activity_score(None, None);
    assert!((0.0..=1.0).contains(&score));

    let partial = ActivitySignals {
        hours_hist: Some(vec![0.0; 3]),
        med_resp_time_hours: None,
        engagement_level: Some(1.0),
    };
    let score = activity_score(Some(&partial), None);
    assert!((0.0..=1.0).contains(&score));
}

#[test]
fn test_explanation_never_exceeds_cap() {
    let shared: Vec<String> = ["music", "travel", "art", "chess"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let reasons = build_explanation(&shared, 1.0, 1.0, 1.0);

    assert_eq!(reasons.len(), MAX_REASONS);
    assert_eq!(reasons[0], "You both like music, travel, art");
}

#[test]
fn test_explanation_fallback() {
    let reasons = build_explanation(&[], 0.1, 0.0, 0.1);
    assert_eq!(reasons, vec![FALLBACK_REASON.to_string()]);
}

#[test]
fn test_sort_results_descending_and_stable() {
    let mut results = vec![
        result("a", 20.0),
        result("b", 55.0),
        result("c", 20.0),
        result("d", 90.0),
    ];

    sort_results(&mut results);

    let ids: Vec<&str> = results.iter().map(|r| r.candidate_id.as_str()).collect();
    assert_eq!(ids, vec!["d", "b", "a", "c"]);
}

#[test]
fn test_default_weights_valid() {
    let weights = ScoringWeights::default();
    assert!(weights.validate().is_ok());
    assert!((weights.sum() - 1.0).abs() < 1e-9);
}
