use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{ActivityType, Training};
use crate::storage::TrainingRepository;

use super::user_service::UserService;

/// Lifecycle and query operations on trainings.
///
/// The user service is passed in explicitly so that adding a training can
/// persist a not-yet-stored owner through the same path every other caller
/// uses.
#[derive(Clone)]
pub struct TrainingService {
    trainings: Arc<dyn TrainingRepository>,
    users: UserService,
}

impl TrainingService {
    pub fn new(trainings: Arc<dyn TrainingRepository>, users: UserService) -> Self {
        Self { trainings, users }
    }

    /// Retrieves a training by its id. Unlike user lookup this fails loudly:
    /// callers on this path always expect the record to exist, e.g. right
    /// before an update.
    pub async fn get_training(&self, id: i64) -> Result<Training, AppError> {
        self.trainings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("training with id {id} not found")))
    }

    pub async fn get_all_trainings(&self) -> Result<Vec<Training>, AppError> {
        self.trainings.find_all().await
    }

    /// All trainings owned by `user_id`. A linear scan over the full
    /// collection, which is fine at the scale this service targets.
    pub async fn get_all_trainings_for_user(&self, user_id: i64) -> Result<Vec<Training>, AppError> {
        let trainings = self.trainings.find_all().await?;
        Ok(trainings
            .into_iter()
            .filter(|training| training.user.id == Some(user_id))
            .collect())
    }

    /// Stores a new training. If the owning user has not been persisted yet
    /// it is stored first, and the returned training carries the owner's
    /// assigned id.
    pub async fn add_training(&self, mut training: Training) -> Result<Training, AppError> {
        if training.id.is_some() {
            return Err(AppError::InvalidState(
                "training already has a database id, update is not permitted".to_string(),
            ));
        }

        if training.user.id.is_none() {
            training.user = self.users.create_user(training.user).await?;
        }

        self.trainings.save(&training).await
    }

    /// Trainings whose end time falls strictly after `cutoff`. Note the
    /// direction: this keeps sessions ending after the cutoff, not before it.
    pub async fn get_all_finished_trainings(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Training>, AppError> {
        let trainings = self.trainings.find_all().await?;
        Ok(trainings
            .into_iter()
            .filter(|training| training.end_time > cutoff)
            .collect())
    }

    /// Trainings of the given activity type.
    pub async fn get_all_trainings_by_activity(
        &self,
        activity: ActivityType,
    ) -> Result<Vec<Training>, AppError> {
        let trainings = self.trainings.find_all().await?;
        Ok(trainings
            .into_iter()
            .filter(|training| training.activity_type == activity)
            .collect())
    }

    /// Full replacement keyed by the id the caller supplies; like user
    /// update, no existence check is made first.
    pub async fn update_training(&self, training: Training) -> Result<Training, AppError> {
        self.trainings.save(&training).await
    }

    /// Bulk-removes every training owned by `user_id`. This must run before
    /// the owning user record is deleted, because trainings hold a mandatory
    /// reference to their owner.
    pub async fn delete_user_trainings(&self, user_id: i64) -> Result<(), AppError> {
        let ids: Vec<i64> = self
            .trainings
            .find_all()
            .await?
            .into_iter()
            .filter(|training| training.user.id == Some(user_id))
            .filter_map(|training| training.id)
            .collect();

        self.trainings.delete_many(&ids).await
    }
}
