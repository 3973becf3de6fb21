//! User repository for database operations.
//!
//! Queries are runtime-checked (`query_as` + `FromRow`) so the crate builds
//! without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use royal_bike_core::{Email, UserId};

use super::{Document, DocumentStore, RepositoryError, conflict_or_database};
use crate::models::{NewUser, User, UserField};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, phone, age, created_at";

impl Document for User {
    type Id = UserId;
    type Draft = NewUser;
    type Field = UserField;

    const COLLECTION: &'static str = "users";
    const UNIQUE_FIELDS: &'static [UserField] = &[UserField::Email];

    fn id(&self) -> UserId {
        self.id
    }

    fn new_id() -> UserId {
        UserId::generate()
    }

    fn field_value(&self, field: UserField) -> &str {
        match field {
            UserField::Email => self.email.as_str(),
        }
    }

    fn materialize(id: UserId, draft: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            password_hash: draft.password_hash,
            phone: draft.phone,
            age: draft.age,
            created_at,
        }
    }
}

const fn column(field: UserField) -> &'static str {
    match field {
        UserField::Email => "email",
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    phone: String,
    age: i16,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let age = u8::try_from(row.age).map_err(|_| {
            RepositoryError::DataCorruption(format!("invalid age in database: {}", row.age))
        })?;

        Ok(Self {
            id: UserId::from(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            password_hash: row.password_hash,
            phone: row.phone,
            age,
            created_at: row.created_at,
        })
    }
}

/// Repository for the `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore<User> for UserRepository {
    async fn insert(&self, draft: NewUser) -> Result<User, RepositoryError> {
        let sql = format!(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, phone, age) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {USER_COLUMNS}"
        );

        let row: UserRow = sqlx::query_as(&sql)
            .bind(User::new_id().as_uuid())
            .bind(&draft.first_name)
            .bind(&draft.last_name)
            .bind(draft.email.as_str())
            .bind(&draft.password_hash)
            .bind(&draft.phone)
            .bind(i16::from(draft.age))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_or_database(e, "email"))?;

        User::try_from(row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id");

        let rows: Vec<UserRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_one(
        &self,
        field: UserField,
        value: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {} = $1 ORDER BY created_at LIMIT 1",
            column(field)
        );

        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        super::ping(&self.pool).await
    }
}
