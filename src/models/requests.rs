use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::UserId;

/// Request to register a like
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_not_self"))]
pub struct LikeRequest {
    #[validate(range(min = 1))]
    pub user_id: UserId,
    #[validate(range(min = 1))]
    pub liked_user_id: UserId,
}

fn validate_not_self(req: &LikeRequest) -> Result<(), ValidationError> {
    if req.user_id == req.liked_user_id {
        let mut err = ValidationError::new("self_like");
        err.message = Some("a user cannot like themselves".into());
        return Err(err);
    }
    Ok(())
}

/// Preferred age bounds, both inclusive
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(default)]
    pub min: Option<i32>,
    #[serde(default)]
    pub max: Option<i32>,
}

/// Caller-supplied recommendation criteria
///
/// Every field is optional. Empty strings and non-positive numbers are
/// treated the same as an absent field. Diet type is matched verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub looking_for_gender: Option<String>,
    #[serde(default)]
    pub looking_for_diet_type: Option<String>,
    #[serde(default)]
    pub age_range: Option<AgeRange>,
    #[serde(default)]
    pub max_distance: Option<f64>,
}
