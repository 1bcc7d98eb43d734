use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::health::health_check;
use super::{trainings, users};
use crate::services::{TrainingService, UserService};
use crate::storage::{PgTrainingRepository, PgUserRepository};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub training_service: TrainingService,
}

impl AppState {
    pub fn new(user_service: UserService, training_service: TrainingService) -> Self {
        Self {
            user_service,
            training_service,
        }
    }

    pub fn with_postgres(db: PgPool) -> Self {
        let user_service = UserService::new(Arc::new(PgUserRepository::new(db.clone())));
        let training_service = TrainingService::new(
            Arc::new(PgTrainingRepository::new(db)),
            user_service.clone(),
        );
        Self::new(user_service, training_service)
    }
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/users", get(users::get_all_users).post(users::add_user))
        .route("/v1/users/email", get(users::get_user_by_email))
        .route("/v1/users/older_than/:date", get(users::get_users_older_than))
        .route(
            "/v1/users/:id",
            get(users::get_single_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/v1/trainings",
            get(trainings::get_all_trainings).post(trainings::add_training),
        )
        .route("/v1/trainings/activity", get(trainings::get_trainings_by_activity))
        .route("/v1/trainings/finished/:date", get(trainings::get_finished_trainings))
        .route(
            "/v1/trainings/user/:user_id",
            get(trainings::get_user_trainings).delete(trainings::delete_user_trainings),
        )
        .route(
            "/v1/trainings/:id",
            get(trainings::get_single_training).put(trainings::update_training),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
