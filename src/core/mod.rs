// Core algorithm exports
pub mod aggregate;
pub mod compatibility;
pub mod rating;
pub mod weights;

pub use aggregate::{aggregate, aggregate_with_ranks};
pub use compatibility::{
    compatibility, CompatibilityCalculator, LabelThresholds, MIN_RATINGS_FOR_COMPATIBILITY,
};
pub use rating::{overall_score, ScoreMode};
pub use weights::{weights_for, weights_with_ranks, CriterionWeights, RankWeights, RANK_WEIGHTS};
