use crate::models::{Gender, NewUser};
use crate::services::store::{MatchStore, StoreError};

/// Demo users inserted into an empty database
pub fn demo_users() -> Vec<NewUser> {
    let user = |name: &str, gender: Gender, latitude: f64, longitude: f64, diet_type: &str, age: i32| NewUser {
        name: name.to_string(),
        gender,
        latitude,
        longitude,
        diet_type: diet_type.to_string(),
        age,
    };

    vec![
        user("Alice", Gender::Female, 40.7128, -74.0060, "vegan", 25),
        user("Bob", Gender::Male, 40.73061, -73.935242, "vegan", 30),
        user("Charlie", Gender::Other, 41.033986, -73.762909, "vegan", 22),
        user("Diana", Gender::Female, 40.8501, -73.8662, "vegan", 28),
        user("Ethan", Gender::Male, 35.6895, 139.6917, "omnivore", 35),
    ]
}

/// Seed the demo users if no users exist yet
///
/// Returns the number of users inserted.
pub async fn seed_demo_users(store: &dyn MatchStore) -> Result<usize, StoreError> {
    let existing = store.count_users().await?;
    if existing > 0 {
        tracing::info!("{} users already exist, skipping seed", existing);
        return Ok(0);
    }

    let users = demo_users();
    for user in &users {
        store.insert_user(user).await?;
    }

    tracing::info!("Seeded {} demo users", users.len());
    Ok(users.len())
}
