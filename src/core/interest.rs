use std::sync::Arc;
use validator::Validate;

use crate::error::MatchError;
use crate::models::{LikeOutcome, LikeRequest, Match, MatchPair, UserId};
use crate::services::{MatchInsert, MatchStore};

/// Records likes and turns reciprocated ones into matches
///
/// # Protocol
/// 1. Validate the request and check both users exist
/// 2. Persist the like (committed before anything else reads)
/// 3. Look for the reciprocal like
/// 4. If found, insert the match unless the pair already has one
///
/// The later of two concurrent reciprocity checks always sees both likes,
/// and the store's pair uniqueness turns any second insert into a no-op,
/// so every mutual pair ends with exactly one match.
#[derive(Clone)]
pub struct InterestService {
    store: Arc<dyn MatchStore>,
}

impl InterestService {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Register a like and report whether it completed a match
    pub async fn register_like(&self, like: &LikeRequest) -> Result<LikeOutcome, MatchError> {
        like.validate()?;

        for id in [like.user_id, like.liked_user_id] {
            if self.store.find_user(id).await?.is_none() {
                return Err(MatchError::NotFound(format!("User {} not found", id)));
            }
        }

        self.store.insert_like(like.user_id, like.liked_user_id).await?;

        tracing::debug!("Registered like: {} -> {}", like.user_id, like.liked_user_id);

        if !self.store.has_like(like.liked_user_id, like.user_id).await? {
            return Ok(LikeOutcome::LikeRegistered);
        }

        self.create_match(like.user_id, like.liked_user_id).await?;

        Ok(LikeOutcome::MatchFound {
            pair: MatchPair {
                user_id: like.user_id,
                matched_user_id: like.liked_user_id,
            },
        })
    }

    /// Every match the user is part of, as initiator or recipient
    pub async fn list_matches(&self, user_id: UserId) -> Result<Vec<Match>, MatchError> {
        Ok(self.store.find_matches_for(user_id).await?)
    }

    async fn create_match(&self, user_id: UserId, liked_user_id: UserId) -> Result<Match, MatchError> {
        let inserted = self.store.insert_match_if_absent(user_id, liked_user_id).await?;

        match &inserted {
            MatchInsert::Created(m) => {
                tracing::info!("Match created: {} <-> {} (id {})", m.user_id, m.matched_user_id, m.id);
            }
            MatchInsert::Existing(m) => {
                tracing::debug!("Match already exists for {} <-> {} (id {})", user_id, liked_user_id, m.id);
            }
        }

        Ok(inserted.into_match())
    }
}
