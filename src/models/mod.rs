// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{pair_key, Coordinates, Gender, Like, Match, NewUser, Recommendation, User, UserId};
pub use requests::{AgeRange, LikeRequest, Preferences};
pub use responses::{ErrorResponse, HealthResponse, LikeOutcome, MatchPair};
