use serde::{Deserialize, Serialize};

use crate::models::domain::{AggregateProfile, CompatibilityResult, ValidationError};

/// Ratings summary for one book or one author
///
/// `profile` is absent when nothing has been rated yet; `has_ratings`
/// spares clients a null check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingsSummaryResponse {
    #[serde(rename = "hasRatings")]
    pub has_ratings: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile: Option<AggregateProfile>,
}

impl From<Option<AggregateProfile>> for RatingsSummaryResponse {
    fn from(profile: Option<AggregateProfile>) -> Self {
        Self {
            has_ratings: profile.is_some(),
            profile,
        }
    }
}

/// Compatibility between the requesting reader and one author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    #[serde(alias = "author_id", rename = "authorId")]
    pub author_id: String,
    #[serde(flatten)]
    pub result: CompatibilityResult,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        Self {
            error: "validation_failed".to_string(),
            message: err.to_string(),
            status_code: 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_marks_missing_profile() {
        let response = RatingsSummaryResponse::from(None);
        assert!(!response.has_ratings);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["hasRatings"], false);
        assert!(json.get("profile").is_none());
    }

    #[test]
    fn test_validation_error_maps_to_envelope() {
        let response = ErrorResponse::from(ValidationError::MissingAuthorProfile);
        assert_eq!(response.error, "validation_failed");
        assert_eq!(response.status_code, 400);
        assert!(response.message.contains("no aggregate profile"));
    }
}
