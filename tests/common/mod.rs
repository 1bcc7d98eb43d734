#![allow(dead_code)]

// Shared test support: in-memory repositories standing in for the
// Postgres-backed ones, plus entity builders.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use fitness_tracker::api::routes::AppState;
use fitness_tracker::error::AppError;
use fitness_tracker::models::{ActivityType, Training, User};
use fitness_tracker::services::{TrainingService, UserService};
use fitness_tracker::storage::{TrainingRepository, UserRepository};

pub struct InMemoryUserRepository {
    rows: RwLock<BTreeMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<User, AppError> {
        let id = user
            .id
            .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = User {
            id: Some(id),
            ..user.clone()
        };
        self.rows.write().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.rows.read().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.rows.read().unwrap().values().cloned().collect())
    }

    async fn find_born_before(&self, date: NaiveDate) -> Result<Vec<User>, AppError> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .filter(|user| user.birthdate < date)
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.rows.read().unwrap().contains_key(&id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.rows.write().unwrap().remove(&id);
        Ok(())
    }
}

pub struct InMemoryTrainingRepository {
    rows: RwLock<BTreeMap<i64, Training>>,
    next_id: AtomicI64,
}

impl InMemoryTrainingRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl TrainingRepository for InMemoryTrainingRepository {
    async fn save(&self, training: &Training) -> Result<Training, AppError> {
        if training.user.id.is_none() {
            return Err(AppError::InvalidState(
                "training owner must be persisted before the training itself".to_string(),
            ));
        }

        let id = training
            .id
            .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = Training {
            id: Some(id),
            ..training.clone()
        };
        self.rows.write().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Training>, AppError> {
        Ok(self.rows.read().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Training>, AppError> {
        Ok(self.rows.read().unwrap().values().cloned().collect())
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<(), AppError> {
        let mut rows = self.rows.write().unwrap();
        for id in ids {
            rows.remove(id);
        }
        Ok(())
    }
}

/// Application state backed entirely by in-memory repositories.
pub fn test_state() -> AppState {
    let user_service = UserService::new(Arc::new(InMemoryUserRepository::new()));
    let training_service = TrainingService::new(
        Arc::new(InMemoryTrainingRepository::new()),
        user_service.clone(),
    );
    AppState::new(user_service, training_service)
}

pub fn user(first_name: &str, last_name: &str, birthdate: &str, email: &str) -> User {
    User::new(
        first_name.to_string(),
        last_name.to_string(),
        birthdate.parse().unwrap(),
        email.to_string(),
    )
}

pub fn training(user: User, activity_type: ActivityType, start: &str, end: &str) -> Training {
    Training::new(user, timestamp(start), timestamp(end), activity_type, 10.0, 8.5)
}

pub fn timestamp(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}
