use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validation failures for engine inputs
///
/// These are never retried or defaulted internally; the caller gets the
/// error unchanged. "Not enough ratings yet" is not an error — see
/// [`CompatibilityResult::has_enough_ratings`].
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("criteria order must contain each of the 5 criteria exactly once")]
    InvalidCriteriaOrder,

    #[error("subscore for {criterion} is out of range: {value} (expected 1-5)")]
    SubscoreOutOfRange {
        criterion: RatingCriterion,
        value: u8,
    },

    #[error("author has no aggregate profile yet")]
    MissingAuthorProfile,

    #[error("rank weights must be non-negative and sum to 1.0 (got sum {sum})")]
    InvalidRankWeights { sum: f64 },
}

/// The five fixed rating criteria
///
/// This set is closed: readers rank the criteria, they never add to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingCriterion {
    Enjoyment,
    Writing,
    Themes,
    Characters,
    Worldbuilding,
}

impl RatingCriterion {
    pub const COUNT: usize = 5;

    /// Every criterion, in the canonical (default) order.
    pub const ALL: [RatingCriterion; Self::COUNT] = [
        RatingCriterion::Enjoyment,
        RatingCriterion::Writing,
        RatingCriterion::Themes,
        RatingCriterion::Characters,
        RatingCriterion::Worldbuilding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingCriterion::Enjoyment => "enjoyment",
            RatingCriterion::Writing => "writing",
            RatingCriterion::Themes => "themes",
            RatingCriterion::Characters => "characters",
            RatingCriterion::Worldbuilding => "worldbuilding",
        }
    }
}

impl fmt::Display for RatingCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reader's personal ranking of the five criteria, most important first
///
/// Owned by exactly one reader and replaced wholesale on each save; the
/// constructor rejects anything that is not a permutation of all five
/// criteria, so a value of this type is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RatingCriterion>", into = "Vec<RatingCriterion>")]
pub struct CriteriaOrder([RatingCriterion; RatingCriterion::COUNT]);

impl CriteriaOrder {
    /// Build an order from a most-important-first list of criteria.
    pub fn new(criteria: [RatingCriterion; RatingCriterion::COUNT]) -> Result<Self, ValidationError> {
        // Closed set of 5: covering every criterion implies no duplicates
        for criterion in RatingCriterion::ALL {
            if !criteria.contains(&criterion) {
                return Err(ValidationError::InvalidCriteriaOrder);
            }
        }
        Ok(Self(criteria))
    }

    pub fn as_slice(&self) -> &[RatingCriterion] {
        &self.0
    }

    /// 1-based rank of a criterion in this order (1 = most important).
    pub fn rank_of(&self, criterion: RatingCriterion) -> usize {
        self.0
            .iter()
            .position(|&c| c == criterion)
            .map_or(RatingCriterion::COUNT, |i| i + 1)
    }
}

impl Default for CriteriaOrder {
    /// The onboarding default: canonical order, enjoyment first.
    fn default() -> Self {
        Self(RatingCriterion::ALL)
    }
}

impl TryFrom<Vec<RatingCriterion>> for CriteriaOrder {
    type Error = ValidationError;

    fn try_from(criteria: Vec<RatingCriterion>) -> Result<Self, Self::Error> {
        let array: [RatingCriterion; RatingCriterion::COUNT] = criteria
            .try_into()
            .map_err(|_| ValidationError::InvalidCriteriaOrder)?;
        Self::new(array)
    }
}

impl TryFrom<&[RatingCriterion]> for CriteriaOrder {
    type Error = ValidationError;

    fn try_from(criteria: &[RatingCriterion]) -> Result<Self, Self::Error> {
        Self::try_from(criteria.to_vec())
    }
}

impl From<CriteriaOrder> for Vec<RatingCriterion> {
    fn from(order: CriteriaOrder) -> Self {
        order.0.to_vec()
    }
}

/// One reader's evaluation of one book
///
/// Subscores are integers on the 1-5 scale. Upstream documents store an
/// unrated criterion either as a missing field or as `0`; both read as
/// absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(alias = "book_id", rename = "bookId")]
    pub book_id: String,
    #[serde(alias = "rater_id", rename = "raterId")]
    pub rater_id: String,
    #[serde(default)]
    pub enjoyment: Option<u8>,
    #[serde(default)]
    pub writing: Option<u8>,
    #[serde(default)]
    pub themes: Option<u8>,
    #[serde(default)]
    pub characters: Option<u8>,
    #[serde(default)]
    pub worldbuilding: Option<u8>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(alias = "created_at", rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl RatingRecord {
    /// Subscore for a criterion, with `0` treated as unrated.
    pub fn subscore(&self, criterion: RatingCriterion) -> Option<u8> {
        self.raw_subscore(criterion).filter(|&v| v > 0)
    }

    fn raw_subscore(&self, criterion: RatingCriterion) -> Option<u8> {
        match criterion {
            RatingCriterion::Enjoyment => self.enjoyment,
            RatingCriterion::Writing => self.writing,
            RatingCriterion::Themes => self.themes,
            RatingCriterion::Characters => self.characters,
            RatingCriterion::Worldbuilding => self.worldbuilding,
        }
    }

    /// All subscores as per-criterion values on the 1-5 scale.
    pub fn subscores(&self) -> CriterionScores {
        let mut scores = CriterionScores::default();
        for criterion in RatingCriterion::ALL {
            if let Some(value) = self.subscore(criterion) {
                scores.set(criterion, f64::from(value));
            }
        }
        scores
    }

    /// Reject subscores outside the 1-5 scale.
    ///
    /// Zero passes: it is the legacy "unrated" marker, not a score.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for criterion in RatingCriterion::ALL {
            if let Some(value) = self.raw_subscore(criterion) {
                if value > 5 {
                    return Err(ValidationError::SubscoreOutOfRange { criterion, value });
                }
            }
        }
        Ok(())
    }
}

/// Per-criterion values on the 1-5 scale, any of which may be absent
///
/// The shared currency between the calculators: raw subscores of a single
/// record, per-criterion means of an aggregate, or a reader's historical
/// averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionScores {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub enjoyment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub writing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub themes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub characters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub worldbuilding: Option<f64>,
}

impl CriterionScores {
    #[inline]
    pub fn get(&self, criterion: RatingCriterion) -> Option<f64> {
        match criterion {
            RatingCriterion::Enjoyment => self.enjoyment,
            RatingCriterion::Writing => self.writing,
            RatingCriterion::Themes => self.themes,
            RatingCriterion::Characters => self.characters,
            RatingCriterion::Worldbuilding => self.worldbuilding,
        }
    }

    pub fn set(&mut self, criterion: RatingCriterion, value: f64) {
        match criterion {
            RatingCriterion::Enjoyment => self.enjoyment = Some(value),
            RatingCriterion::Writing => self.writing = Some(value),
            RatingCriterion::Themes => self.themes = Some(value),
            RatingCriterion::Characters => self.characters = Some(value),
            RatingCriterion::Worldbuilding => self.worldbuilding = Some(value),
        }
    }

    /// Number of criteria that carry a value.
    pub fn present(&self) -> usize {
        RatingCriterion::ALL
            .iter()
            .filter(|&&c| self.get(c).is_some())
            .count()
    }
}

/// Derived rating profile for one book or one author
///
/// Never stored. Two profiles cannot be merged by averaging them; merging
/// requires recomputing from the union of the underlying records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateProfile {
    #[serde(flatten)]
    pub means: CriterionScores,
    pub overall: f64,
    pub count: usize,
}

impl AggregateProfile {
    /// Mean for a criterion, absent when no contributing record carried it.
    pub fn mean(&self, criterion: RatingCriterion) -> Option<f64> {
        self.means.get(criterion)
    }
}

/// Qualitative reading of a compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityLabel {
    #[serde(rename = "Highly Compatible")]
    HighlyCompatible,
    #[serde(rename = "Compatible")]
    Compatible,
    #[serde(rename = "Moderately Compatible")]
    ModeratelyCompatible,
    #[serde(rename = "Somewhat Different")]
    SomewhatDifferent,
    #[serde(rename = "Low Compatibility")]
    LowCompatibility,
}

impl CompatibilityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityLabel::HighlyCompatible => "Highly Compatible",
            CompatibilityLabel::Compatible => "Compatible",
            CompatibilityLabel::ModeratelyCompatible => "Moderately Compatible",
            CompatibilityLabel::SomewhatDifferent => "Somewhat Different",
            CompatibilityLabel::LowCompatibility => "Low Compatibility",
        }
    }
}

impl fmt::Display for CompatibilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-criterion distance between a reader's taste and an author's profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionComparison {
    /// Absolute difference on the 1-5 scale.
    pub difference: f64,
    /// Difference divided by the maximum possible (4.0), clamped to [0,1].
    pub normalized: f64,
}

/// Compatibility between one reader and one author's body of work
///
/// When `has_enough_ratings` is false only the gating fields are present;
/// callers must check the gate before reading score, label, or criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    #[serde(alias = "has_enough_ratings", rename = "hasEnoughRatings")]
    pub has_enough_ratings: bool,
    #[serde(alias = "total_ratings", rename = "totalRatings")]
    pub total_ratings: u32,
    #[serde(
        alias = "ratings_needed",
        rename = "ratingsNeeded",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub ratings_needed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub overall: Option<CompatibilityLabel>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub criteria: Option<std::collections::BTreeMap<RatingCriterion, CriterionComparison>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_scores(scores: [Option<u8>; 5]) -> RatingRecord {
        RatingRecord {
            book_id: "book_1".to_string(),
            rater_id: "reader_1".to_string(),
            enjoyment: scores[0],
            writing: scores[1],
            themes: scores[2],
            characters: scores[3],
            worldbuilding: scores[4],
            review: None,
            created_at: Some(chrono::Utc::now()),
        }
    }

    #[test]
    fn test_default_order_is_canonical() {
        let order = CriteriaOrder::default();
        assert_eq!(order.as_slice(), &RatingCriterion::ALL);
        assert_eq!(order.rank_of(RatingCriterion::Enjoyment), 1);
        assert_eq!(order.rank_of(RatingCriterion::Worldbuilding), 5);
    }

    #[test]
    fn test_order_rejects_duplicates() {
        let result = CriteriaOrder::new([
            RatingCriterion::Enjoyment,
            RatingCriterion::Enjoyment,
            RatingCriterion::Themes,
            RatingCriterion::Characters,
            RatingCriterion::Worldbuilding,
        ]);
        assert_eq!(result, Err(ValidationError::InvalidCriteriaOrder));
    }

    #[test]
    fn test_order_rejects_wrong_length() {
        let result = CriteriaOrder::try_from(vec![
            RatingCriterion::Enjoyment,
            RatingCriterion::Writing,
        ]);
        assert_eq!(result, Err(ValidationError::InvalidCriteriaOrder));
    }

    #[test]
    fn test_zero_subscore_reads_as_unrated() {
        let record = record_with_scores([Some(4), Some(0), None, Some(3), Some(5)]);
        assert_eq!(record.subscore(RatingCriterion::Enjoyment), Some(4));
        assert_eq!(record.subscore(RatingCriterion::Writing), None);
        assert_eq!(record.subscore(RatingCriterion::Themes), None);
        assert_eq!(record.subscores().present(), 3);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let record = record_with_scores([Some(4), Some(6), None, None, None]);
        assert_eq!(
            record.validate(),
            Err(ValidationError::SubscoreOutOfRange {
                criterion: RatingCriterion::Writing,
                value: 6,
            })
        );
    }

    #[test]
    fn test_record_accepts_snake_case_documents() {
        let json = r#"{
            "book_id": "b1",
            "rater_id": "r1",
            "enjoyment": 5,
            "writing": 4,
            "created_at": "2024-03-01T12:00:00Z"
        }"#;
        let record: RatingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.book_id, "b1");
        assert_eq!(record.subscore(RatingCriterion::Enjoyment), Some(5));
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_order_round_trips_through_serde() {
        let order = CriteriaOrder::default();
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(
            json,
            r#"["enjoyment","writing","themes","characters","worldbuilding"]"#
        );
        let back: CriteriaOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_order_deserialization_rejects_duplicates() {
        let json = r#"["enjoyment","enjoyment","themes","characters","worldbuilding"]"#;
        assert!(serde_json::from_str::<CriteriaOrder>(json).is_err());
    }
}
