//! Matchmaker - mutual-like matching and recommendations for a dating backend
//!
//! Two pieces carry the logic: the interest protocol, which records likes
//! and creates exactly one match per mutually interested pair, and the
//! recommender, which ranks candidates by great-circle distance after
//! applying the caller's preference filters.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{great_circle_distance, CandidateQuery, Filter, InterestService, Recommender};
pub use error::MatchError;
pub use models::{Gender, Like, LikeOutcome, LikeRequest, Match, Preferences, Recommendation, User};
pub use services::{MatchStore, MemoryStore, PostgresStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let distance = great_circle_distance(40.7128, -74.0060, 40.73061, -73.935242);
        assert!(distance > 3.0 && distance < 5.0);
    }
}
