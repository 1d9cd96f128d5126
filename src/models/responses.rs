use serde::{Deserialize, Serialize};
use crate::models::domain::UserId;

/// Pair reported back when a like completes a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub user_id: UserId,
    pub matched_user_id: UserId,
}

/// Outcome of registering a like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum LikeOutcome {
    #[serde(rename = "like registered")]
    LikeRegistered,
    #[serde(rename = "match found")]
    MatchFound {
        #[serde(rename = "match")]
        pair: MatchPair,
    },
}

impl LikeOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, LikeOutcome::MatchFound { .. })
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_registered_shape() {
        let json = serde_json::to_value(LikeOutcome::LikeRegistered).unwrap();
        assert_eq!(json, serde_json::json!({"status": "like registered"}));
    }

    #[test]
    fn test_match_found_shape() {
        let outcome = LikeOutcome::MatchFound {
            pair: MatchPair { user_id: 1, matched_user_id: 2 },
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "match found",
                "match": {"user_id": 1, "matched_user_id": 2}
            })
        );
    }
}
