use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::error::AppError;
use crate::models::User;
use crate::storage::UserRepository;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn create_user(&self, user: User) -> Result<User, AppError> {
        info!("creating user {}", user.email);
        if user.id.is_some() {
            return Err(AppError::InvalidState(
                "user already has a database id, update is not permitted".to_string(),
            ));
        }
        self.users.save(&user).await
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        self.users.find_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_email(email).await
    }

    pub async fn find_all_users(&self) -> Result<Vec<User>, AppError> {
        self.users.find_all().await
    }

    /// Users born strictly before `date`; a birthdate equal to the cutoff is
    /// excluded.
    pub async fn get_older_than(&self, date: NaiveDate) -> Result<Vec<User>, AppError> {
        self.users.find_born_before(date).await
    }

    /// Full replacement keyed by the id the caller supplies. There is no
    /// existence check: an id with no matching row creates a new record.
    pub async fn update_user(&self, user: User) -> Result<User, AppError> {
        self.users.save(&user).await
    }

    /// Removes the user record only. Owned trainings are not touched here;
    /// see [`crate::services::delete_user_with_trainings`].
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        if !self.users.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!("user with id {id} not found")));
        }
        info!("deleting user {id}");
        self.users.delete(id).await
    }
}
