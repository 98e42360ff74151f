//! Folio Algo - rating and compatibility engine for the Folio book community
//!
//! This library provides the numeric core behind Folio's book ratings:
//! per-reader criteria weighting, overall rating calculation, aggregation
//! across many ratings, and reader/author compatibility scoring. Every
//! function is pure and synchronous; persistence and serving belong to the
//! callers.

pub mod config;
pub mod core;
pub mod models;

// Re-export commonly used types
pub use core::{
    aggregate, compatibility, overall_score, weights_for, CompatibilityCalculator, ScoreMode,
};
pub use models::{
    AggregateProfile, CompatibilityLabel, CompatibilityResult, CriteriaOrder, CriterionScores,
    RatingCriterion, RatingRecord, ValidationError,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let weights = weights_for(&CriteriaOrder::default());
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }
}
