// Business logic services

pub mod training_service;
pub mod user_service;

pub use training_service::TrainingService;
pub use user_service::UserService;

use crate::error::AppError;

/// Removes a user together with every training the user owns.
///
/// Trainings hold a mandatory reference to their owner, so they are deleted
/// first; removing the user record before its trainings would leave dangling
/// references behind. Callers deleting a user must go through this function
/// rather than calling [`UserService::delete_user`] directly.
pub async fn delete_user_with_trainings(
    users: &UserService,
    trainings: &TrainingService,
    user_id: i64,
) -> Result<(), AppError> {
    trainings.delete_user_trainings(user_id).await?;
    users.delete_user(user_id).await
}
