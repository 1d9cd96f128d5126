use async_trait::async_trait;
use thiserror::Error;

use crate::core::filters::CandidateQuery;
use crate::models::{Like, Match, NewUser, Recommendation, User, UserId};

/// Errors that can occur when talking to the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Constraint violated: {0}")]
    Constraint(String),
}

/// Result of an insert-if-absent on the match pair
#[derive(Debug, Clone, PartialEq)]
pub enum MatchInsert {
    Created(Match),
    /// A match for the unordered pair already existed
    Existing(Match),
}

impl MatchInsert {
    pub fn into_match(self) -> Match {
        match self {
            MatchInsert::Created(m) | MatchInsert::Existing(m) => m,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, MatchInsert::Created(_))
    }
}

/// Persistence port used by the core services
///
/// Every write is committed by the time the call returns. Implementations
/// must keep at most one like per ordered pair and at most one match per
/// unordered pair, whatever the interleaving of concurrent callers.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Find a user by id.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Insert a user and return it with its assigned id.
    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError>;

    /// Count all users.
    async fn count_users(&self) -> Result<i64, StoreError>;

    /// Record a like, returning the existing row if the pair already liked.
    async fn insert_like(&self, user_id: UserId, liked_user_id: UserId) -> Result<Like, StoreError>;

    /// Check whether `user_id` has liked `liked_user_id`.
    async fn has_like(&self, user_id: UserId, liked_user_id: UserId) -> Result<bool, StoreError>;

    /// Create a match unless one exists for the unordered pair.
    async fn insert_match_if_absent(
        &self,
        user_id: UserId,
        matched_user_id: UserId,
    ) -> Result<MatchInsert, StoreError>;

    /// All matches the user takes part in, oldest first.
    async fn find_matches_for(&self, user_id: UserId) -> Result<Vec<Match>, StoreError>;

    /// Candidates satisfying the query, each with its projected distance.
    async fn query_candidates(&self, query: &CandidateQuery) -> Result<Vec<Recommendation>, StoreError>;

    /// Health check for the backing store.
    async fn health_check(&self) -> Result<bool, StoreError>;
}
