use crate::core::weights::{weights_with_ranks, RankWeights};
use crate::models::{CriteriaOrder, CriterionScores, RatingCriterion, RatingRecord};

/// How five subscores collapse into one overall value
///
/// Different product surfaces disagree on which mode is "the" overall
/// rating, so both stay exposed and every caller picks one explicitly.
#[derive(Debug, Clone, Copy)]
pub enum ScoreMode<'a> {
    /// Unweighted arithmetic mean of the present subscores.
    Straight,
    /// Rank-weighted sum using the reader's criteria order.
    Weighted(&'a CriteriaOrder),
}

/// Overall value for a single rating record.
pub fn overall_score(record: &RatingRecord, mode: ScoreMode<'_>) -> f64 {
    reduce(&record.subscores(), mode, &RankWeights::default())
}

/// Collapse per-criterion values into one overall value
///
/// An absent criterion drops out entirely: in weighted mode its
/// contribution is lost without renormalizing the remaining weights, and in
/// straight mode it is excluded from both numerator and denominator.
pub(crate) fn reduce(values: &CriterionScores, mode: ScoreMode<'_>, ranks: &RankWeights) -> f64 {
    match mode {
        ScoreMode::Straight => {
            let mut sum = 0.0;
            let mut present = 0u32;
            for criterion in RatingCriterion::ALL {
                if let Some(value) = values.get(criterion) {
                    sum += value;
                    present += 1;
                }
            }
            if present > 0 {
                sum / f64::from(present)
            } else {
                0.0
            }
        }
        ScoreMode::Weighted(order) => {
            let weights = weights_with_ranks(order, ranks);
            let mut total = 0.0;
            for criterion in RatingCriterion::ALL {
                if let Some(value) = values.get(criterion) {
                    total += value * weights.get(criterion);
                }
            }
            total
        }
    }
}
