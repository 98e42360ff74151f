use crate::models::{CriteriaOrder, RatingCriterion, ValidationError};

/// Fractional weight for each rank position, most important first
///
/// The criterion a reader ranks first carries 0.35 of the overall rating,
/// the second 0.25, and so on down to 0.08. Only the assignment of these
/// weights to criteria varies per reader, never the weights themselves.
pub const RANK_WEIGHTS: [f64; RatingCriterion::COUNT] = [0.35, 0.25, 0.20, 0.12, 0.08];

/// The five rank weights, most important first
///
/// Defaults to [`RANK_WEIGHTS`]; a deployment may override them through
/// configuration as long as they stay non-negative and sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankWeights([f64; RatingCriterion::COUNT]);

impl RankWeights {
    pub fn new(weights: [f64; RatingCriterion::COUNT]) -> Result<Self, ValidationError> {
        let sum: f64 = weights.iter().sum();
        if weights.iter().any(|&w| w < 0.0) || (sum - 1.0).abs() > 1e-9 {
            return Err(ValidationError::InvalidRankWeights { sum });
        }
        Ok(Self(weights))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Default for RankWeights {
    fn default() -> Self {
        Self(RANK_WEIGHTS)
    }
}

/// Per-criterion weights produced by assigning rank weights along an order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionWeights {
    pub enjoyment: f64,
    pub writing: f64,
    pub themes: f64,
    pub characters: f64,
    pub worldbuilding: f64,
}

impl CriterionWeights {
    #[inline]
    pub fn get(&self, criterion: RatingCriterion) -> f64 {
        match criterion {
            RatingCriterion::Enjoyment => self.enjoyment,
            RatingCriterion::Writing => self.writing,
            RatingCriterion::Themes => self.themes,
            RatingCriterion::Characters => self.characters,
            RatingCriterion::Worldbuilding => self.worldbuilding,
        }
    }

    pub fn sum(&self) -> f64 {
        self.enjoyment + self.writing + self.themes + self.characters + self.worldbuilding
    }

    fn set(&mut self, criterion: RatingCriterion, weight: f64) {
        match criterion {
            RatingCriterion::Enjoyment => self.enjoyment = weight,
            RatingCriterion::Writing => self.writing = weight,
            RatingCriterion::Themes => self.themes = weight,
            RatingCriterion::Characters => self.characters = weight,
            RatingCriterion::Worldbuilding => self.worldbuilding = weight,
        }
    }
}

/// Weight map for a reader's criteria order using the system rank weights
///
/// The criterion ranked first receives 0.35, the second 0.25, the third
/// 0.20, the fourth 0.12, the fifth 0.08. For any valid order the weights
/// sum to 1.0. A [`CriteriaOrder`] is a permutation by construction, so
/// this cannot fail.
pub fn weights_for(order: &CriteriaOrder) -> CriterionWeights {
    weights_with_ranks(order, &RankWeights::default())
}

/// Weight map for a reader's criteria order using explicit rank weights.
pub fn weights_with_ranks(order: &CriteriaOrder, ranks: &RankWeights) -> CriterionWeights {
    let mut weights = CriterionWeights {
        enjoyment: 0.0,
        writing: 0.0,
        themes: 0.0,
        characters: 0.0,
        worldbuilding: 0.0,
    };
    for (criterion, weight) in order.as_slice().iter().zip(ranks.as_slice()) {
        weights.set(*criterion, *weight);
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_weights_sum_to_one() {
        let sum: f64 = RANK_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_canonical_order_assigns_exact_weights() {
        let weights = weights_for(&CriteriaOrder::default());
        assert_eq!(weights.enjoyment, 0.35);
        assert_eq!(weights.writing, 0.25);
        assert_eq!(weights.themes, 0.20);
        assert_eq!(weights.characters, 0.12);
        assert_eq!(weights.worldbuilding, 0.08);
    }

    #[test]
    fn test_reversed_order_assigns_reversed_weights() {
        let order = CriteriaOrder::new([
            RatingCriterion::Worldbuilding,
            RatingCriterion::Characters,
            RatingCriterion::Themes,
            RatingCriterion::Writing,
            RatingCriterion::Enjoyment,
        ])
        .unwrap();

        let weights = weights_for(&order);
        assert_eq!(weights.worldbuilding, 0.35);
        assert_eq!(weights.characters, 0.25);
        assert_eq!(weights.themes, 0.20);
        assert_eq!(weights.writing, 0.12);
        assert_eq!(weights.enjoyment, 0.08);
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_ranks_must_sum_to_one() {
        assert!(RankWeights::new([0.4, 0.3, 0.15, 0.1, 0.05]).is_ok());
        assert!(matches!(
            RankWeights::new([0.4, 0.3, 0.15, 0.1, 0.1]),
            Err(ValidationError::InvalidRankWeights { .. })
        ));
        assert!(RankWeights::new([1.2, -0.2, 0.0, 0.0, 0.0]).is_err());
    }
}
