use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CriteriaOrder, RatingCriterion, RatingRecord, ValidationError};

/// Payload a reader submits when rating a book
///
/// Subscores are optional, but any that is present must sit on the 1-5
/// scale; this is checked here, at the submission point, before anything
/// reaches the calculators.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitRatingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "book_id", rename = "bookId")]
    pub book_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "rater_id", rename = "raterId")]
    pub rater_id: String,
    #[validate(range(min = 1, max = 5))]
    #[serde(default)]
    pub enjoyment: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    #[serde(default)]
    pub writing: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    #[serde(default)]
    pub themes: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    #[serde(default)]
    pub characters: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    #[serde(default)]
    pub worldbuilding: Option<u8>,
    #[serde(default)]
    pub review: Option<String>,
}

impl SubmitRatingRequest {
    /// Convert into a rating record stamped with the submission time.
    pub fn into_record(self, created_at: chrono::DateTime<chrono::Utc>) -> RatingRecord {
        RatingRecord {
            book_id: self.book_id,
            rater_id: self.rater_id,
            enjoyment: self.enjoyment,
            writing: self.writing,
            themes: self.themes,
            characters: self.characters,
            worldbuilding: self.worldbuilding,
            review: self.review,
            created_at: Some(created_at),
        }
    }
}

/// Payload a reader submits when saving a new criteria order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReorderCriteriaRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "reader_id", rename = "readerId")]
    pub reader_id: String,
    #[validate(length(equal = 5))]
    pub criteria: Vec<RatingCriterion>,
}

impl ReorderCriteriaRequest {
    /// Reject anything that is not a permutation of the five criteria.
    pub fn into_order(self) -> Result<CriteriaOrder, ValidationError> {
        CriteriaOrder::try_from(self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_subscore_fails_validation() {
        let request = SubmitRatingRequest {
            book_id: "b1".to_string(),
            rater_id: "r1".to_string(),
            enjoyment: Some(6),
            writing: Some(4),
            themes: None,
            characters: None,
            worldbuilding: None,
            review: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_absent_subscores_pass_validation() {
        let request = SubmitRatingRequest {
            book_id: "b1".to_string(),
            rater_id: "r1".to_string(),
            enjoyment: Some(5),
            writing: None,
            themes: None,
            characters: None,
            worldbuilding: None,
            review: Some("loved it".to_string()),
        };
        assert!(request.validate().is_ok());

        let record = request.into_record(chrono::Utc::now());
        assert_eq!(record.subscore(RatingCriterion::Enjoyment), Some(5));
        assert_eq!(record.subscore(RatingCriterion::Writing), None);
    }

    #[test]
    fn test_reorder_rejects_duplicates() {
        let request = ReorderCriteriaRequest {
            reader_id: "r1".to_string(),
            criteria: vec![
                RatingCriterion::Themes,
                RatingCriterion::Themes,
                RatingCriterion::Enjoyment,
                RatingCriterion::Writing,
                RatingCriterion::Characters,
            ],
        };
        assert!(request.validate().is_ok());
        assert_eq!(
            request.into_order(),
            Err(ValidationError::InvalidCriteriaOrder)
        );
    }

    #[test]
    fn test_reorder_produces_the_saved_order() {
        let request = ReorderCriteriaRequest {
            reader_id: "r1".to_string(),
            criteria: vec![
                RatingCriterion::Worldbuilding,
                RatingCriterion::Themes,
                RatingCriterion::Characters,
                RatingCriterion::Enjoyment,
                RatingCriterion::Writing,
            ],
        };
        let order = request.into_order().unwrap();
        assert_eq!(order.rank_of(RatingCriterion::Worldbuilding), 1);
        assert_eq!(order.rank_of(RatingCriterion::Writing), 5);
    }
}
