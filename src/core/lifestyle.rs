use crate::models::{Diet, EducationTier, LifestyleAttributes};

/// Score used when nothing comparable is known on both sides
pub const NEUTRAL_LIFESTYLE_SCORE: f64 = 0.5;

/// Score for diet pairs missing from the compatibility table
const UNLISTED_DIET_SCORE: f64 = 0.5;

/// Cost of each education tier step
const EDUCATION_STEP_PENALTY: f64 = 0.25;

/// Diet compatibility keyed by (target diet, candidate diet)
///
/// Asymmetric on purpose: a vegan target is less tolerant of a non-veg
/// candidate than a non-veg target is of a vegan candidate.
pub fn diet_compatibility(target: &Diet, candidate: &Diet) -> f64 {
    match (target, candidate) {
        (Diet::Veg, Diet::Veg) => 1.0,
        (Diet::Veg, Diet::Vegan) => 1.0,
        (Diet::Veg, Diet::NonVeg) => 0.3,
        (Diet::Vegan, Diet::Vegan) => 1.0,
        (Diet::Vegan, Diet::Veg) => 1.0,
        (Diet::Vegan, Diet::NonVeg) => 0.1,
        (Diet::NonVeg, Diet::NonVeg) => 1.0,
        (Diet::NonVeg, Diet::Veg) => 0.5,
        (Diet::NonVeg, Diet::Vegan) => 0.2,
        _ => UNLISTED_DIET_SCORE,
    }
}

/// Education proximity: each tier apart costs 0.25, floored at 0
#[inline]
pub fn education_proximity(a: EducationTier, b: EducationTier) -> f64 {
    let diff = (a.rank() as f64 - b.rank() as f64).abs();
    (1.0 - EDUCATION_STEP_PENALTY * diff).clamp(0.0, 1.0)
}

/// Lifestyle compatibility (0-1)
///
/// A strict-vegetarian target paired with a non-veg candidate is vetoed to
/// 0.0 before anything else is looked at. Otherwise each attribute present on
/// both sides contributes one sub-score and the result is their mean, or
/// 0.5 when nothing is comparable.
pub fn lifestyle_score(target: &LifestyleAttributes, candidate: &LifestyleAttributes) -> f64 {
    if is_vetoed(target, candidate) {
        return 0.0;
    }

    let mut scores = Vec::with_capacity(2);

    if let (Some(t), Some(c)) = (&target.diet, &candidate.diet) {
        scores.push(diet_compatibility(t, c));
    }

    if let (Some(t), Some(c)) = (target.education, candidate.education) {
        scores.push(education_proximity(t, c));
    }

    if scores.is_empty() {
        NEUTRAL_LIFESTYLE_SCORE
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Hard veto: strict-vegetarian target, non-veg candidate
#[inline]
pub fn is_vetoed(target: &LifestyleAttributes, candidate: &LifestyleAttributes) -> bool {
    target.is_strict_veg() && candidate.diet == Some(Diet::NonVeg)
}
