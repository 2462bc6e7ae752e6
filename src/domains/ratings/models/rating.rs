use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// 평점 (rater -> rated, 1~5)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = Rating)]
pub struct Rating {
    pub id: u64,
    pub rater_user_id: u64,
    pub rated_user_id: u64,
    pub stars: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = RatingRequest)]
pub struct RatingRequest {
    #[schema(example = 5)]
    pub stars: i64,
}

/// 평점 통계
/// Aggregate rating for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = RatingStats)]
pub struct RatingStats {
    pub average_rating: f64,
    pub total_ratings: i64,
    /// "1".."5" -> count
    pub rating_breakdown: BTreeMap<String, i64>,
}

impl RatingStats {
    /// 별점별 개수(인덱스 0 = 1점)로부터 통계 계산, 평균은 소수 둘째 자리 반올림
    pub fn from_counts(counts: [i64; 5]) -> Self {
        let total: i64 = counts.iter().sum();
        let weighted: i64 = counts
            .iter()
            .enumerate()
            .map(|(i, c)| (i as i64 + 1) * c)
            .sum();

        let average_rating = if total == 0 {
            0.0
        } else {
            ((weighted as f64 / total as f64) * 100.0).round() / 100.0
        };

        let rating_breakdown = counts
            .iter()
            .enumerate()
            .map(|(i, c)| ((i + 1).to_string(), *c))
            .collect();

        Self {
            average_rating,
            total_ratings: total,
            rating_breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_are_zero() {
        let stats = RatingStats::from_counts([0; 5]);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.total_ratings, 0);
        assert_eq!(stats.rating_breakdown.len(), 5);
        assert_eq!(stats.rating_breakdown["3"], 0);
    }

    #[test]
    fn average_is_rounded_to_two_places() {
        // 5, 4, 4 -> 4.333...
        let stats = RatingStats::from_counts([0, 0, 0, 2, 1]);
        assert_eq!(stats.average_rating, 4.33);
        assert_eq!(stats.total_ratings, 3);
        assert_eq!(stats.rating_breakdown["4"], 2);

        // 1, 2 -> 1.5
        let stats = RatingStats::from_counts([1, 1, 0, 0, 0]);
        assert_eq!(stats.average_rating, 1.5);
    }
}
