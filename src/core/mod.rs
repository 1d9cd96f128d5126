// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod interest;
pub mod recommender;

pub use distance::{distance_between, great_circle_distance, EARTH_RADIUS_MILES};
pub use filters::{CandidateQuery, Filter};
pub use interest::InterestService;
pub use recommender::{sort_by_distance, PreferenceFilters, Recommender};
