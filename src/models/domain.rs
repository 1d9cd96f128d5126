use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Opaque user identifier
pub type UserId = i64;

/// Gender as stored on a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("unknown gender '{}', expected one of: male, female, other", s)),
        }
    }
}

/// Point on the globe in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub gender: Gender,
    pub latitude: f64,
    pub longitude: f64,
    pub diet_type: String,
    pub age: i32,
}

impl User {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// User not yet persisted; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_coordinates"))]
pub struct NewUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub gender: Gender,
    pub latitude: f64,
    pub longitude: f64,
    #[validate(length(max = 50))]
    pub diet_type: String,
    #[validate(range(min = 1))]
    pub age: i32,
}

fn validate_coordinates(user: &NewUser) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&user.latitude) || !(-180.0..=180.0).contains(&user.longitude) {
        let mut err = ValidationError::new("coordinates");
        err.message = Some("latitude must be within [-90, 90] and longitude within [-180, 180]".into());
        return Err(err);
    }
    Ok(())
}

impl NewUser {
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            gender: self.gender,
            latitude: self.latitude,
            longitude: self.longitude,
            diet_type: self.diet_type,
            age: self.age,
        }
    }
}

/// Directed expression of interest from `user_id` towards `liked_user_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub user_id: UserId,
    pub liked_user_id: UserId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Mutual interest between two users, at most one per unordered pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub user_id: UserId,
    pub matched_user_id: UserId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Match {
    pub fn involves(&self, user_id: UserId) -> bool {
        self.user_id == user_id || self.matched_user_id == user_id
    }

    /// Unordered pair key, smaller id first
    pub fn pair(&self) -> (UserId, UserId) {
        pair_key(self.user_id, self.matched_user_id)
    }
}

/// Normalise a pair of users so both orderings map to the same key
#[inline]
pub fn pair_key(a: UserId, b: UserId) -> (UserId, UserId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Candidate user with its computed distance from the requester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub user: User,
    pub distance: f64,
}
