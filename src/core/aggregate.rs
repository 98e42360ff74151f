use crate::core::rating::{reduce, ScoreMode};
use crate::core::weights::RankWeights;
use crate::models::{AggregateProfile, CriterionScores, RatingCriterion, RatingRecord};
use tracing::{debug, warn};

/// Reduce many rating records into a per-criterion mean profile
///
/// Returns `None` for an empty slice ("no ratings yet" rendering is the
/// caller's concern). Each criterion's mean ignores records where that
/// criterion is absent; a criterion no record carries stays absent in the
/// profile rather than defaulting to zero. `overall` reduces the vector of
/// means — means first, one reduction second, never the mean of per-record
/// overalls.
pub fn aggregate(records: &[RatingRecord], mode: ScoreMode<'_>) -> Option<AggregateProfile> {
    aggregate_with_ranks(records, mode, &RankWeights::default())
}

/// [`aggregate`] with explicit rank weights for the overall reduction.
pub fn aggregate_with_ranks(
    records: &[RatingRecord],
    mode: ScoreMode<'_>,
    ranks: &RankWeights,
) -> Option<AggregateProfile> {
    if records.is_empty() {
        return None;
    }

    debug!(count = records.len(), "aggregating rating records");

    let mut means = CriterionScores::default();
    for criterion in RatingCriterion::ALL {
        let mut sum = 0.0;
        let mut contributing = 0u32;
        for record in records {
            if let Some(value) = record.subscore(criterion) {
                sum += f64::from(value);
                contributing += 1;
            }
        }
        if contributing > 0 {
            means.set(criterion, sum / f64::from(contributing));
        } else {
            warn!(
                criterion = criterion.as_str(),
                "criterion has no subscores across the aggregate"
            );
        }
    }

    let overall = reduce(&means, mode, ranks);

    Some(AggregateProfile {
        means,
        overall,
        count: records.len(),
    })
}
