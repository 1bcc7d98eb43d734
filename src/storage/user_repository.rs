use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::models::User;

/// Durable storage for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert-or-replace. A record without an id is inserted and assigned
    /// one; a record carrying an id replaces (or creates) the row with that
    /// id.
    async fn save(&self, user: &User) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Users whose birthdate is strictly before `date`.
    async fn find_born_before(&self, date: NaiveDate) -> Result<Vec<User>, AppError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    birthdate: NaiveDate,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: Some(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            birthdate: row.birthdate,
            email: row.email,
        }
    }
}

pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: &User) -> Result<User, AppError> {
        let row = match user.id {
            Some(id) => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    INSERT INTO users (id, first_name, last_name, birthdate, email)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (id) DO UPDATE
                    SET first_name = EXCLUDED.first_name,
                        last_name = EXCLUDED.last_name,
                        birthdate = EXCLUDED.birthdate,
                        email = EXCLUDED.email
                    RETURNING id, first_name, last_name, birthdate, email
                    "#,
                )
                .bind(id)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(user.birthdate)
                .bind(&user.email)
                .fetch_one(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    INSERT INTO users (first_name, last_name, birthdate, email)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, first_name, last_name, birthdate, email
                    "#,
                )
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(user.birthdate)
                .bind(&user.email)
                .fetch_one(&self.db)
                .await?
            }
        };

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, birthdate, email FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, birthdate, email FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, birthdate, email FROM users ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_born_before(&self, date: NaiveDate) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, birthdate, email FROM users WHERE birthdate < $1 ORDER BY id",
        )
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        Ok(exists)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
