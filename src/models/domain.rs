use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::scoring::round_to;

/// Profile record as returned by the profile store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bio: String,
    #[serde(default, deserialize_with = "normalized_tags")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lifestyle: LifestyleAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivitySignals>,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.interests = normalize_tags(interests);
        self
    }

    pub fn with_lifestyle(mut self, lifestyle: LifestyleAttributes) -> Self {
        self.lifestyle = lifestyle;
        self
    }

    pub fn with_activity(mut self, activity: ActivitySignals) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Add an interest tag, keeping the list normalized and free of duplicates
    pub fn push_interest(&mut self, tag: &str) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !self.interests.contains(&tag) {
            self.interests.push(tag);
        }
    }
}

/// Trim and lowercase tags, dropping empties and repeats (first occurrence wins)
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn normalized_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(normalize_tags(raw))
}

/// Lowercase, trim and fold `_`/`-` into spaces so chip labels and field values compare equal
fn normalize_label(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Diet category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diet {
    Veg,
    Vegan,
    NonVeg,
    /// A diet value the compatibility table has no row or column for
    Other(String),
}

impl Diet {
    /// Parse an explicit diet field. Unknown values are kept as `Other`.
    pub fn parse(value: &str) -> Self {
        Self::from_label(value).unwrap_or_else(|| Diet::Other(normalize_label(value)))
    }

    /// Recognize a diet chip label, if it is one
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_label(label).as_str() {
            "veg" | "vegetarian" => Some(Diet::Veg),
            "vegan" => Some(Diet::Vegan),
            "nonveg" | "non veg" | "non vegetarian" | "nonvegetarian" => Some(Diet::NonVeg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Diet::Veg => "veg",
            Diet::Vegan => "vegan",
            Diet::NonVeg => "nonveg",
            Diet::Other(other) => other,
        }
    }
}

/// Education tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EducationTier {
    HighSchool,
    Diploma,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationTier {
    pub fn rank(self) -> u8 {
        match self {
            EducationTier::HighSchool => 0,
            EducationTier::Diploma => 1,
            EducationTier::Bachelor => 2,
            EducationTier::Master => 3,
            EducationTier::Doctorate => 4,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_label(label).as_str() {
            "hs" | "high school" | "highschool" => Some(EducationTier::HighSchool),
            "diploma" => Some(EducationTier::Diploma),
            "bachelor" | "bachelors" | "bachelor's" => Some(EducationTier::Bachelor),
            "master" | "masters" | "master's" => Some(EducationTier::Master),
            "phd" | "doctorate" => Some(EducationTier::Doctorate),
            _ => None,
        }
    }

    /// Parse an explicit education field; unrecognized values rank as `Bachelor`
    pub fn parse_lenient(value: &str) -> Self {
        Self::from_label(value).unwrap_or(EducationTier::Bachelor)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EducationTier::HighSchool => "hs",
            EducationTier::Diploma => "diploma",
            EducationTier::Bachelor => "bachelor",
            EducationTier::Master => "master",
            EducationTier::Doctorate => "phd",
        }
    }
}

/// Typed lifestyle attributes. `None` means the attribute was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LifestyleInput", into = "LifestyleFields")]
pub struct LifestyleAttributes {
    pub diet: Option<Diet>,
    pub strict_veg: Option<bool>,
    pub education: Option<EducationTier>,
    /// Raw chip labels, kept for display
    pub labels: Vec<String>,
}

impl LifestyleAttributes {
    pub fn with_diet(mut self, diet: Diet) -> Self {
        self.diet = Some(diet);
        self
    }

    pub fn with_strict_veg(mut self, strict_veg: bool) -> Self {
        self.strict_veg = Some(strict_veg);
        self
    }

    pub fn with_education(mut self, education: EducationTier) -> Self {
        self.education = Some(education);
        self
    }

    /// Build attributes from chip labels alone
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut attrs = Self::default();
        for label in labels {
            attrs.apply_label(label.as_ref());
        }
        attrs
    }

    /// Fold a chip label into the attributes. Attributes already set are not overwritten.
    pub fn apply_label(&mut self, label: &str) {
        let normalized = normalize_label(label);
        if normalized.is_empty() {
            return;
        }

        if matches!(
            normalized.as_str(),
            "strict vegetarian" | "strict veg" | "strictly vegetarian"
        ) {
            self.strict_veg.get_or_insert(true);
            self.diet.get_or_insert(Diet::Veg);
        } else if let Some(diet) = Diet::from_label(&normalized) {
            self.diet.get_or_insert(diet);
        } else if let Some(tier) = EducationTier::from_label(&normalized) {
            self.education.get_or_insert(tier);
        }

        if !self.labels.contains(&normalized) {
            self.labels.push(normalized);
        }
    }

    pub fn is_strict_veg(&self) -> bool {
        self.strict_veg.unwrap_or(false)
    }
}

/// Wire shape of lifestyle attributes: explicit fields plus optional labels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LifestyleFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    strict_veg: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    education: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
}

/// Stores hand lifestyle over either as a bare label list or as an attribute object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LifestyleInput {
    Labels(Vec<String>),
    Fields(LifestyleFields),
}

/// Blank explicit values count as not supplied
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl From<LifestyleInput> for LifestyleAttributes {
    fn from(input: LifestyleInput) -> Self {
        match input {
            LifestyleInput::Labels(labels) => LifestyleAttributes::from_labels(labels),
            LifestyleInput::Fields(fields) => {
                // Explicit fields first so labels cannot override them
                let mut attrs = LifestyleAttributes {
                    diet: non_blank(fields.diet.as_deref()).map(Diet::parse),
                    strict_veg: fields.strict_veg,
                    education: non_blank(fields.education.as_deref()).map(EducationTier::parse_lenient),
                    labels: Vec::new(),
                };
                for label in &fields.labels {
                    attrs.apply_label(label);
                }
                attrs
            }
        }
    }
}

impl From<LifestyleAttributes> for LifestyleFields {
    fn from(attrs: LifestyleAttributes) -> Self {
        Self {
            diet: attrs.diet.as_ref().map(|d| d.as_str().to_string()),
            strict_veg: attrs.strict_veg,
            education: attrs.education.map(|e| e.as_str().to_string()),
            labels: attrs.labels,
        }
    }
}

/// Behavioural signals used by the optional activity factor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySignals {
    /// Messages or sessions per hour of day
    #[serde(default)]
    pub hours_hist: Option<Vec<f64>>,
    #[serde(default)]
    pub med_resp_time_hours: Option<f64>,
    #[serde(default)]
    pub engagement_level: Option<f64>,
}

/// Per-factor sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    #[serde(rename = "interests", serialize_with = "round3")]
    pub interest: f64,
    #[serde(serialize_with = "round3")]
    pub lifestyle: f64,
    #[serde(serialize_with = "round3")]
    pub personality: f64,
    /// Only populated when the activity factor carries weight
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "round3_opt"
    )]
    pub activity: Option<f64>,
}

/// Scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub candidate_id: String,
    /// Calibrated score, 0-100
    pub score: f64,
    /// Weighted score before calibration, 0-100
    #[serde(serialize_with = "round2")]
    pub raw_score: f64,
    pub explanation: Vec<String>,
    pub factors: FactorScores,
}

fn round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}

fn round3<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 3))
}

fn round3_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&round_to(*v, 3)),
        None => serializer.serialize_none(),
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub interest: f64,
    pub lifestyle: f64,
    pub personality: f64,
    /// Zero unless the activity factor is switched on
    pub activity: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.interest + self.lifestyle + self.personality + self.activity
    }

    /// Weights must be non-negative and sum to 1.0
    pub fn validate(&self) -> Result<(), String> {
        let all = [self.interest, self.lifestyle, self.personality, self.activity];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(format!("weights must be finite and non-negative: {:?}", self));
        }
        if (self.sum() - 1.0).abs() > 1e-6 {
            return Err(format!("weights must sum to 1.0, got {:.6}", self.sum()));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interest: 0.4,
            lifestyle: 0.3,
            personality: 0.3,
            activity: 0.0,
        }
    }
}
