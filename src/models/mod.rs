// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AggregateProfile, CompatibilityLabel, CompatibilityResult, CriteriaOrder, CriterionComparison,
    CriterionScores, RatingCriterion, RatingRecord, ValidationError,
};
pub use requests::{ReorderCriteriaRequest, SubmitRatingRequest};
pub use responses::{CompatibilityResponse, ErrorResponse, RatingsSummaryResponse};
