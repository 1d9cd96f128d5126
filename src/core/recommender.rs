use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::filters::{CandidateQuery, Filter};
use crate::error::MatchError;
use crate::models::{Gender, Preferences, Recommendation, User, UserId};
use crate::services::MatchStore;

/// Attribute filters parsed out of the request, before the requester is known
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceFilters {
    pub gender: Filter<Gender>,
    pub diet_type: Filter<String>,
    pub age: Filter<i32>,
    pub max_distance: Option<f64>,
}

impl PreferenceFilters {
    /// Validate preferences and turn each field into a filter
    ///
    /// Empty strings and non-positive numbers count as "no filter". An age
    /// range only applies when both bounds are positive, and is rejected
    /// if min > max. Strings are compared exactly as given.
    pub fn from_preferences(preferences: &Preferences) -> Result<Self, MatchError> {
        let gender = match non_empty(&preferences.looking_for_gender) {
            Some(value) => Filter::Equals(value.parse::<Gender>().map_err(MatchError::InvalidInput)?),
            None => Filter::Any,
        };

        let diet_type = match non_empty(&preferences.looking_for_diet_type) {
            Some(value) => Filter::Equals(value.to_string()),
            None => Filter::Any,
        };

        let age = match preferences.age_range {
            Some(range) => match (range.min, range.max) {
                (Some(min), Some(max)) if min > 0 && max > 0 && min > max => {
                    return Err(MatchError::InvalidInput(format!(
                        "Invalid age range: min {} is greater than max {}",
                        min, max
                    )));
                }
                (Some(min), Some(max)) if min > 0 && max > 0 => Filter::Between(min, max),
                _ => Filter::Any,
            },
            None => Filter::Any,
        };

        let max_distance = match preferences.max_distance {
            Some(d) if d > 0.0 => Some(d),
            _ => None,
        };

        Ok(Self {
            gender,
            diet_type,
            age,
            max_distance,
        })
    }

    /// Compose the filters into a query anchored on the requester
    pub fn for_requester(self, requester: &User) -> CandidateQuery {
        CandidateQuery {
            requester_id: requester.id,
            origin: requester.coordinates(),
            gender: self.gender,
            diet_type: self.diet_type,
            age: self.age,
            max_distance: self.max_distance,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Builds and runs distance-ranked candidate queries
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn MatchStore>,
}

impl Recommender {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Recommend candidates for a user, nearest first
    ///
    /// Preferences are validated before the store is touched. Ties on
    /// distance are broken by ascending user id.
    pub async fn recommend(
        &self,
        user_id: UserId,
        preferences: &Preferences,
    ) -> Result<Vec<Recommendation>, MatchError> {
        let filters = PreferenceFilters::from_preferences(preferences)?;

        let requester = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| MatchError::NotFound(format!("User {} not found", user_id)))?;

        let query = filters.for_requester(&requester);
        let mut recommendations = self.store.query_candidates(&query).await?;

        sort_by_distance(&mut recommendations);

        tracing::info!(
            "Returning {} recommendations for user {} (max distance: {:?})",
            recommendations.len(),
            user_id,
            query.max_distance
        );

        Ok(recommendations)
    }
}

/// Ascending distance, then ascending id
pub fn sort_by_distance(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.user.id.cmp(&b.user.id))
    });
}
