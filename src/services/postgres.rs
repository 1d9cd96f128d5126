use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;
use validator::Validate;

use crate::core::distance::EARTH_RADIUS_MILES;
use crate::core::filters::{CandidateQuery, Filter};
use crate::models::{Like, Match, NewUser, Recommendation, User, UserId};
use crate::services::store::{MatchInsert, MatchStore, StoreError};

/// PostgreSQL-backed store for users, likes and matches
///
/// Every statement runs directly on the pool, so each write is committed
/// before the next statement of the same request reads. The schema's
/// `matches_pair_unique` constraint keeps one match per unordered pair.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    async fn find_like(&self, user_id: UserId, liked_user_id: UserId) -> Result<Option<Like>, StoreError> {
        let query = r#"
            SELECT id, user_id, liked_user_id, created_at
            FROM likes
            WHERE user_id = $1 AND liked_user_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(liked_user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(like_from_row).transpose()?)
    }

    async fn find_match_for_pair(&self, a: UserId, b: UserId) -> Result<Option<Match>, StoreError> {
        let query = r#"
            SELECT id, user_id, matched_user_id, created_at
            FROM matches
            WHERE pair_low = LEAST($1, $2) AND pair_high = GREATEST($1, $2)
        "#;

        let row = sqlx::query(query)
            .bind(a)
            .bind(b)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(match_from_row).transpose()?)
    }
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        gender: row.try_get("gender")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        diet_type: row.try_get("diet_type")?,
        age: row.try_get("age")?,
    })
}

fn like_from_row(row: &PgRow) -> Result<Like, sqlx::Error> {
    Ok(Like {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        liked_user_id: row.try_get("liked_user_id")?,
        created_at: row.try_get("created_at")?,
    })
}

fn match_from_row(row: &PgRow) -> Result<Match, sqlx::Error> {
    Ok(Match {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        matched_user_id: row.try_get("matched_user_id")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Append `AND column <op> $n` for a filter; `Any` appends nothing
fn push_filter<'args, T>(qb: &mut QueryBuilder<'args, Postgres>, column: &'static str, filter: &Filter<T>)
where
    T: Clone + Send + 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres>,
{
    match filter {
        Filter::Any => {}
        Filter::Equals(value) => {
            qb.push(" AND ").push(column).push(" = ").push_bind(value.clone());
        }
        Filter::Between(lo, hi) => {
            qb.push(" AND ")
                .push(column)
                .push(" BETWEEN ")
                .push_bind(lo.clone())
                .push(" AND ")
                .push_bind(hi.clone());
        }
    }
}

/// Build the candidate query: project distance in an inner select, then
/// apply the distance bound over the projected column
fn build_candidate_query(query: &CandidateQuery) -> QueryBuilder<'static, Postgres> {
    let lat = query.origin.latitude;
    let lon = query.origin.longitude;

    let mut qb = QueryBuilder::new(
        "SELECT id, name, gender, latitude, longitude, diet_type, age, distance FROM (\
         SELECT id, name, gender, latitude, longitude, diet_type, age, \
         CASE WHEN latitude = ",
    );
    qb.push_bind(lat)
        .push(" AND longitude = ")
        .push_bind(lon)
        .push(" THEN 0.0 ELSE ")
        .push_bind(EARTH_RADIUS_MILES)
        .push(" * acos(LEAST(1.0, GREATEST(-1.0, cos(radians(")
        .push_bind(lat)
        .push(")) * cos(radians(latitude)) * cos(radians(longitude) - radians(")
        .push_bind(lon)
        .push(")) + sin(radians(")
        .push_bind(lat)
        .push(")) * sin(radians(latitude))))) END AS distance FROM users WHERE id <> ")
        .push_bind(query.requester_id);

    push_filter(&mut qb, "gender", &query.gender);
    push_filter(&mut qb, "diet_type", &query.diet_type);
    push_filter(&mut qb, "age", &query.age);

    qb.push(") AS candidates");

    if let Some(max_distance) = query.max_distance {
        qb.push(" WHERE distance <= ").push_bind(max_distance);
    }

    qb.push(" ORDER BY distance ASC, id ASC");
    qb
}

#[async_trait]
impl MatchStore for PostgresStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let query = r#"
            SELECT id, name, gender, latitude, longitude, diet_type, age
            FROM users
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError> {
        user.validate()
            .map_err(|e| StoreError::Constraint(e.to_string()))?;

        let query = r#"
            INSERT INTO users (name, gender, latitude, longitude, diet_type, age)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, gender, latitude, longitude, diet_type, age
        "#;

        let row = sqlx::query(query)
            .bind(&user.name)
            .bind(user.gender)
            .bind(user.latitude)
            .bind(user.longitude)
            .bind(&user.diet_type)
            .bind(user.age)
            .fetch_one(&self.pool)
            .await?;

        Ok(user_from_row(&row)?)
    }

    async fn count_users(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("total")?)
    }

    /// Uses INSERT ... ON CONFLICT DO NOTHING so a repeated like is a no-op;
    /// the original row is returned in that case.
    async fn insert_like(&self, user_id: UserId, liked_user_id: UserId) -> Result<Like, StoreError> {
        let query = r#"
            INSERT INTO likes (user_id, liked_user_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id, liked_user_id) DO NOTHING
            RETURNING id, user_id, liked_user_id, created_at
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(liked_user_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            return Ok(like_from_row(&row)?);
        }

        tracing::debug!("Like {} -> {} already recorded", user_id, liked_user_id);

        self.find_like(user_id, liked_user_id)
            .await?
            .ok_or_else(|| StoreError::Constraint(format!(
                "like {} -> {} conflicted but could not be read back",
                user_id, liked_user_id
            )))
    }

    async fn has_like(&self, user_id: UserId, liked_user_id: UserId) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS (
                SELECT 1 FROM likes WHERE user_id = $1 AND liked_user_id = $2
            ) AS found
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(liked_user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("found")?)
    }

    async fn insert_match_if_absent(
        &self,
        user_id: UserId,
        matched_user_id: UserId,
    ) -> Result<MatchInsert, StoreError> {
        let query = r#"
            INSERT INTO matches (user_id, matched_user_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (pair_low, pair_high) DO NOTHING
            RETURNING id, user_id, matched_user_id, created_at
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(matched_user_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            return Ok(MatchInsert::Created(match_from_row(&row)?));
        }

        self.find_match_for_pair(user_id, matched_user_id)
            .await?
            .map(MatchInsert::Existing)
            .ok_or_else(|| StoreError::Constraint(format!(
                "match {} <-> {} conflicted but could not be read back",
                user_id, matched_user_id
            )))
    }

    async fn find_matches_for(&self, user_id: UserId) -> Result<Vec<Match>, StoreError> {
        let query = r#"
            SELECT id, user_id, matched_user_id, created_at
            FROM matches
            WHERE user_id = $1 OR matched_user_id = $1
            ORDER BY created_at ASC, id ASC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let matches: Result<Vec<Match>, _> = rows.iter().map(match_from_row).collect();
        Ok(matches?)
    }

    async fn query_candidates(&self, query: &CandidateQuery) -> Result<Vec<Recommendation>, StoreError> {
        let mut qb = build_candidate_query(query);
        let rows = qb.build().fetch_all(&self.pool).await?;

        let candidates: Result<Vec<Recommendation>, sqlx::Error> = rows
            .iter()
            .map(|row| {
                Ok(Recommendation {
                    user: user_from_row(row)?,
                    distance: row.try_get("distance")?,
                })
            })
            .collect();

        Ok(candidates?)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
