use crate::core::distance::distance_between;
use crate::models::{Coordinates, Gender, User, UserId};

/// One optional constraint on a candidate attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Filter<T> {
    /// No constraint on this dimension
    Any,
    Equals(T),
    /// Inclusive on both ends
    Between(T, T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::Any
    }
}

impl<T: PartialOrd> Filter<T> {
    /// Check whether a value passes this filter
    #[inline]
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Filter::Any => true,
            Filter::Equals(expected) => value == expected,
            Filter::Between(lo, hi) => value >= lo && value <= hi,
        }
    }
}

/// Conjunction of every constraint a candidate must satisfy
///
/// Built once per recommendation request and handed to the store, which
/// translates it into its native query form. `max_distance` is checked
/// after the distance has been projected for the candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuery {
    pub requester_id: UserId,
    pub origin: Coordinates,
    pub gender: Filter<Gender>,
    pub diet_type: Filter<String>,
    pub age: Filter<i32>,
    /// `None` means unbounded
    pub max_distance: Option<f64>,
}

impl CandidateQuery {
    pub fn new(requester_id: UserId, origin: Coordinates) -> Self {
        Self {
            requester_id,
            origin,
            gender: Filter::Any,
            diet_type: Filter::Any,
            age: Filter::Any,
            max_distance: None,
        }
    }

    /// Check the attribute filters, without distance
    #[inline]
    pub fn matches_attributes(&self, user: &User) -> bool {
        user.id != self.requester_id
            && self.gender.admits(&user.gender)
            && self.diet_type.admits(&user.diet_type)
            && self.age.admits(&user.age)
    }

    /// Check a projected distance against the bound
    #[inline]
    pub fn within_distance(&self, distance: f64) -> bool {
        match self.max_distance {
            Some(max) => distance <= max,
            None => true,
        }
    }

    /// Evaluate the full conjunction for a candidate, returning its distance if admitted
    pub fn evaluate(&self, user: &User) -> Option<f64> {
        if !self.matches_attributes(user) {
            return None;
        }

        let distance = distance_between(self.origin, user.coordinates());
        self.within_distance(distance).then_some(distance)
    }
}
