use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::models::{ActivityType, Training, User};

/// Durable storage for training records.
#[async_trait]
pub trait TrainingRepository: Send + Sync {
    /// Insert-or-replace, keyed the same way as the user repository. The
    /// owning user must already be persisted.
    async fn save(&self, training: &Training) -> Result<Training, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Training>, AppError>;

    async fn find_all(&self) -> Result<Vec<Training>, AppError>;

    async fn delete_many(&self, ids: &[i64]) -> Result<(), AppError>;
}

// Trainings are read joined with their owner so the entity comes back whole.
#[derive(FromRow)]
struct TrainingRow {
    id: i64,
    start_time: chrono::DateTime<chrono::Utc>,
    end_time: chrono::DateTime<chrono::Utc>,
    activity_type: ActivityType,
    distance: f64,
    average_speed: f64,
    user_id: i64,
    first_name: String,
    last_name: String,
    birthdate: chrono::NaiveDate,
    email: String,
}

impl From<TrainingRow> for Training {
    fn from(row: TrainingRow) -> Self {
        Training {
            id: Some(row.id),
            user: User {
                id: Some(row.user_id),
                first_name: row.first_name,
                last_name: row.last_name,
                birthdate: row.birthdate,
                email: row.email,
            },
            start_time: row.start_time,
            end_time: row.end_time,
            activity_type: row.activity_type,
            distance: row.distance,
            average_speed: row.average_speed,
        }
    }
}

const SELECT_TRAINING: &str = r#"
    SELECT t.id, t.start_time, t.end_time, t.activity_type, t.distance, t.average_speed,
           u.id AS user_id, u.first_name, u.last_name, u.birthdate, u.email
    FROM trainings t
    JOIN users u ON u.id = t.user_id
"#;

pub struct PgTrainingRepository {
    db: PgPool,
}

impl PgTrainingRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TrainingRepository for PgTrainingRepository {
    async fn save(&self, training: &Training) -> Result<Training, AppError> {
        let user_id = training.user.id.ok_or_else(|| {
            AppError::InvalidState(
                "training owner must be persisted before the training itself".to_string(),
            )
        })?;

        let id = match training.id {
            Some(id) => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO trainings (id, user_id, start_time, end_time, activity_type, distance, average_speed)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ON CONFLICT (id) DO UPDATE
                    SET user_id = EXCLUDED.user_id,
                        start_time = EXCLUDED.start_time,
                        end_time = EXCLUDED.end_time,
                        activity_type = EXCLUDED.activity_type,
                        distance = EXCLUDED.distance,
                        average_speed = EXCLUDED.average_speed
                    RETURNING id
                    "#,
                )
                .bind(id)
                .bind(user_id)
                .bind(training.start_time)
                .bind(training.end_time)
                .bind(training.activity_type)
                .bind(training.distance)
                .bind(training.average_speed)
                .fetch_one(&self.db)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO trainings (user_id, start_time, end_time, activity_type, distance, average_speed)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING id
                    "#,
                )
                .bind(user_id)
                .bind(training.start_time)
                .bind(training.end_time)
                .bind(training.activity_type)
                .bind(training.distance)
                .bind(training.average_speed)
                .fetch_one(&self.db)
                .await?
            }
        };

        let mut stored = training.clone();
        stored.id = Some(id);
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Training>, AppError> {
        let query = format!("{SELECT_TRAINING} WHERE t.id = $1");
        let row = sqlx::query_as::<_, TrainingRow>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(Training::from))
    }

    async fn find_all(&self) -> Result<Vec<Training>, AppError> {
        let query = format!("{SELECT_TRAINING} ORDER BY t.id");
        let rows = sqlx::query_as::<_, TrainingRow>(&query)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Training::from).collect())
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<(), AppError> {
        sqlx::query("DELETE FROM trainings WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
