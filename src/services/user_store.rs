//! User persistence
//!
//! `UserStore` is the seam between the HTTP handlers and storage. Production
//! uses Postgres; `MemoryUserStore` backs tests and runs without `DATABASE_URL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{NewUser, Profession, Subscription, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid stored row: {0}")]
    InvalidRow(String),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look a user up by username, ignoring case.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user. Fails with `DuplicateUsername` if the name is taken.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn health_check(&self) -> bool;
}

/// Database row for a user
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: Option<String>,
    profession: String,
    company: Option<String>,
    address_line1: String,
    country: String,
    state: String,
    city: String,
    subscription: String,
    newsletter: bool,
    profile_photo: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let profession = Profession::parse(&row.profession)
            .ok_or_else(|| StoreError::InvalidRow(format!("profession '{}'", row.profession)))?;
        let subscription = Subscription::parse(&row.subscription).ok_or_else(|| {
            StoreError::InvalidRow(format!("subscription '{}'", row.subscription))
        })?;

        Ok(Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            profession,
            company: row.company,
            address_line1: row.address_line1,
            country: row.country,
            state: row.state,
            city: row.city,
            subscription,
            newsletter: row.newsletter,
            profile_photo: row.profile_photo,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, profession, company, address_line1,
                   country, state, city, subscription, newsletter, profile_photo, created_at
            FROM users
            WHERE lower(username) = lower($1)
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash, profession, company, address_line1,
                               country, state, city, subscription, newsletter, profile_photo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, username, password_hash, profession, company, address_line1,
                      country, state, city, subscription, newsletter, profile_photo, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.profession.as_str())
        .bind(&user.company)
        .bind(&user.address_line1)
        .bind(&user.country)
        .bind(&user.state)
        .bind(&user.city)
        .bind(user.subscription.as_str())
        .bind(user.newsletter)
        .bind(&user.profile_photo)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => User::try_from(row),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateUsername(user.username))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> bool {
        crate::db::health_check(&self.pool).await
    }
}

/// Process-local store used in tests and when no database is configured.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.lock().is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let wanted = username.to_lowercase();
        Ok(self
            .users
            .lock()
            .iter()
            .find(|u| u.username.to_lowercase() == wanted)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock();
        let wanted = user.username.to_lowercase();
        if users.iter().any(|u| u.username.to_lowercase() == wanted) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            profession: user.profession,
            company: user.company,
            address_line1: user.address_line1,
            country: user.country,
            state: user.state,
            city: user.city,
            subscription: user.subscription,
            newsletter: user.newsletter,
            profile_photo: user.profile_photo,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
