use crate::core::aggregate::aggregate_with_ranks;
use crate::core::rating::ScoreMode;
use crate::core::weights::{weights_with_ranks, RankWeights};
use crate::models::{
    AggregateProfile, CompatibilityLabel, CompatibilityResult, CriteriaOrder, CriterionComparison,
    CriterionScores, RatingCriterion, RatingRecord, ValidationError,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Ratings an author needs before compatibility is computed for them.
pub const MIN_RATINGS_FOR_COMPATIBILITY: u32 = 10;

/// Maximum possible difference between two values on the 1-5 scale.
const MAX_CRITERION_DIFFERENCE: f64 = 4.0;

/// Score thresholds mapping a compatibility score to its qualitative label
///
/// Checked top-down, so the bands are exhaustive and non-overlapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelThresholds {
    pub highly_compatible: f64,
    pub compatible: f64,
    pub moderately_compatible: f64,
    pub somewhat_different: f64,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            highly_compatible: 0.85,
            compatible: 0.65,
            moderately_compatible: 0.45,
            somewhat_different: 0.25,
        }
    }
}

impl LabelThresholds {
    pub fn label_for(&self, score: f64) -> CompatibilityLabel {
        if score >= self.highly_compatible {
            CompatibilityLabel::HighlyCompatible
        } else if score >= self.compatible {
            CompatibilityLabel::Compatible
        } else if score >= self.moderately_compatible {
            CompatibilityLabel::ModeratelyCompatible
        } else if score >= self.somewhat_different {
            CompatibilityLabel::SomewhatDifferent
        } else {
            CompatibilityLabel::LowCompatibility
        }
    }
}

/// Compatibility between a reader's taste profile and an author's work
///
/// Holds the rank weights, the gating minimum and the label thresholds;
/// one instance serves every reader/author pair.
#[derive(Debug, Clone)]
pub struct CompatibilityCalculator {
    ranks: RankWeights,
    min_ratings: u32,
    thresholds: LabelThresholds,
}

impl CompatibilityCalculator {
    pub fn new(ranks: RankWeights, min_ratings: u32, thresholds: LabelThresholds) -> Self {
        Self {
            ranks,
            min_ratings,
            thresholds,
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            ranks: RankWeights::default(),
            min_ratings: MIN_RATINGS_FOR_COMPATIBILITY,
            thresholds: LabelThresholds::default(),
        }
    }

    /// Compare a reader's taste profile against an author's aggregate
    ///
    /// `reader_means` are the reader's historical per-criterion averages on
    /// the same 1-5 scale as the author's means; they come from the caller,
    /// not from this engine. Below the ratings gate only the gating fields
    /// are filled. The author profile is only required once the gate is
    /// open — callers that skipped the "no ratings yet" check get a
    /// [`ValidationError::MissingAuthorProfile`] back.
    ///
    /// Criteria the reader ranks highest dominate the outcome: each
    /// normalized difference is weighted by the reader's own weight map. A
    /// criterion absent on either side drops its weighted contribution
    /// without renormalizing the rest.
    pub fn compatibility(
        &self,
        reader_order: &CriteriaOrder,
        reader_means: &CriterionScores,
        author_profile: Option<&AggregateProfile>,
        total_ratings: u32,
    ) -> Result<CompatibilityResult, ValidationError> {
        if total_ratings < self.min_ratings {
            debug!(
                total_ratings,
                needed = self.min_ratings - total_ratings,
                "not enough ratings for compatibility"
            );
            return Ok(CompatibilityResult {
                has_enough_ratings: false,
                total_ratings,
                ratings_needed: Some(self.min_ratings - total_ratings),
                score: None,
                overall: None,
                criteria: None,
            });
        }

        let profile = author_profile.ok_or(ValidationError::MissingAuthorProfile)?;
        let weights = weights_with_ranks(reader_order, &self.ranks);

        let mut criteria = BTreeMap::new();
        let mut overall_normalized = 0.0;
        for criterion in RatingCriterion::ALL {
            let (Some(reader), Some(author)) =
                (reader_means.get(criterion), profile.mean(criterion))
            else {
                continue;
            };
            let difference = (reader - author).abs();
            let normalized = (difference / MAX_CRITERION_DIFFERENCE).clamp(0.0, 1.0);
            overall_normalized += normalized * weights.get(criterion);
            criteria.insert(
                criterion,
                CriterionComparison {
                    difference,
                    normalized,
                },
            );
        }

        let score = (1.0 - overall_normalized).clamp(0.0, 1.0);

        Ok(CompatibilityResult {
            has_enough_ratings: true,
            total_ratings,
            ratings_needed: None,
            score: Some(score),
            overall: Some(self.thresholds.label_for(score)),
            criteria: Some(criteria),
        })
    }

    /// Aggregate an author's records and compare against them in one call
    ///
    /// The record count doubles as the ratings total for the gate, so an
    /// author with too few ratings comes back gated, never as an error.
    pub fn for_author(
        &self,
        reader_order: &CriteriaOrder,
        reader_means: &CriterionScores,
        author_records: &[RatingRecord],
        mode: ScoreMode<'_>,
    ) -> Result<CompatibilityResult, ValidationError> {
        let profile = aggregate_with_ranks(author_records, mode, &self.ranks);
        let total_ratings = author_records.len() as u32;
        self.compatibility(reader_order, reader_means, profile.as_ref(), total_ratings)
    }
}

impl Default for CompatibilityCalculator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// [`CompatibilityCalculator::compatibility`] with the system defaults.
pub fn compatibility(
    reader_order: &CriteriaOrder,
    reader_means: &CriterionScores,
    author_profile: Option<&AggregateProfile>,
    total_ratings: u32,
) -> Result<CompatibilityResult, ValidationError> {
    CompatibilityCalculator::with_defaults().compatibility(
        reader_order,
        reader_means,
        author_profile,
        total_ratings,
    )
}
