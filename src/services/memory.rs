use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use validator::Validate;

use crate::core::filters::CandidateQuery;
use crate::models::{pair_key, Like, Match, NewUser, Recommendation, User, UserId};
use crate::services::store::{MatchInsert, MatchStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    likes: HashMap<(UserId, UserId), Like>,
    matches: HashMap<(UserId, UserId), Match>,
    next_user_id: i64,
    next_like_id: i64,
    next_match_id: i64,
}

/// In-process store with the same uniqueness rules as the Postgres schema
///
/// Each call takes the lock once, so a like insert is visible to every
/// later call, mirroring autocommit statements against Postgres.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored likes
    pub async fn like_count(&self) -> usize {
        self.tables.read().await.likes.len()
    }

    /// Number of stored matches
    pub async fn match_count(&self) -> usize {
        self.tables.read().await.matches.len()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError> {
        user.validate()
            .map_err(|e| StoreError::Constraint(e.to_string()))?;

        let mut tables = self.tables.write().await;
        tables.next_user_id += 1;
        let stored = user.clone().into_user(tables.next_user_id);
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn count_users(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.users.len() as i64)
    }

    async fn insert_like(&self, user_id: UserId, liked_user_id: UserId) -> Result<Like, StoreError> {
        let mut tables = self.tables.write().await;

        for id in [user_id, liked_user_id] {
            if !tables.users.contains_key(&id) {
                return Err(StoreError::Constraint(format!("user {} does not exist", id)));
            }
        }

        if let Some(existing) = tables.likes.get(&(user_id, liked_user_id)) {
            return Ok(existing.clone());
        }

        tables.next_like_id += 1;
        let like = Like {
            id: tables.next_like_id,
            user_id,
            liked_user_id,
            created_at: chrono::Utc::now(),
        };
        tables.likes.insert((user_id, liked_user_id), like.clone());
        Ok(like)
    }

    async fn has_like(&self, user_id: UserId, liked_user_id: UserId) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .likes
            .contains_key(&(user_id, liked_user_id)))
    }

    async fn insert_match_if_absent(
        &self,
        user_id: UserId,
        matched_user_id: UserId,
    ) -> Result<MatchInsert, StoreError> {
        let mut tables = self.tables.write().await;
        let key = pair_key(user_id, matched_user_id);

        if let Some(existing) = tables.matches.get(&key) {
            return Ok(MatchInsert::Existing(existing.clone()));
        }

        tables.next_match_id += 1;
        let created = Match {
            id: tables.next_match_id,
            user_id,
            matched_user_id,
            created_at: chrono::Utc::now(),
        };
        tables.matches.insert(key, created.clone());
        Ok(MatchInsert::Created(created))
    }

    async fn find_matches_for(&self, user_id: UserId) -> Result<Vec<Match>, StoreError> {
        let tables = self.tables.read().await;
        let mut matches: Vec<Match> = tables
            .matches
            .values()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matches)
    }

    async fn query_candidates(&self, query: &CandidateQuery) -> Result<Vec<Recommendation>, StoreError> {
        let tables = self.tables.read().await;

        let candidates = tables
            .users
            .values()
            .filter_map(|user| {
                query.evaluate(user).map(|distance| Recommendation {
                    user: user.clone(),
                    distance,
                })
            })
            .collect();

        Ok(candidates)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            gender: Gender::Female,
            latitude: 40.7128,
            longitude: -74.0060,
            diet_type: "vegan".to_string(),
            age: 25,
        }
    }

    #[tokio::test]
    async fn test_insert_like_is_idempotent() {
        let store = MemoryStore::new();
        let a = store.insert_user(&new_user("A")).await.unwrap();
        let b = store.insert_user(&new_user("B")).await.unwrap();

        let first = store.insert_like(a.id, b.id).await.unwrap();
        let second = store.insert_like(a.id, b.id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.like_count().await, 1);
    }

    #[tokio::test]
    async fn test_match_unique_per_unordered_pair() {
        let store = MemoryStore::new();

        let first = store.insert_match_if_absent(1, 2).await.unwrap();
        let second = store.insert_match_if_absent(2, 1).await.unwrap();

        assert!(first.was_created());
        assert!(!second.was_created());
        assert_eq!(first.into_match(), second.into_match());
        assert_eq!(store.match_count().await, 1);
    }

    #[tokio::test]
    async fn test_insert_user_rejects_invalid_coordinates() {
        let store = MemoryStore::new();
        let mut user = new_user("A");
        user.latitude = 91.0;

        let result = store.insert_user(&user).await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
        assert_eq!(store.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_like_requires_existing_users() {
        let store = MemoryStore::new();
        let a = store.insert_user(&new_user("A")).await.unwrap();

        let result = store.insert_like(a.id, 999).await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
    }
}
