use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{ActivityType, CreateTraining, Training, UpdateTraining};

use super::routes::AppState;

pub async fn get_all_trainings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Training>>, AppError> {
    Ok(Json(state.training_service.get_all_trainings().await?))
}

pub async fn get_single_training(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Training>, AppError> {
    Ok(Json(state.training_service.get_training(id).await?))
}

pub async fn get_user_trainings(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Training>>, AppError> {
    Ok(Json(
        state
            .training_service
            .get_all_trainings_for_user(user_id)
            .await?,
    ))
}

pub async fn add_training(
    State(state): State<AppState>,
    Json(request): Json<CreateTraining>,
) -> Result<(StatusCode, Json<Training>), AppError> {
    let user = state
        .user_service
        .get_user(request.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user with id {} not found", request.user_id)))?;

    let training = Training::new(
        user,
        request.start_time,
        request.end_time,
        request.activity_type,
        request.distance,
        request.average_speed,
    );
    let stored = state.training_service.add_training(training).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// The date path segment is a calendar day; the filter cutoff is its
/// midnight in UTC.
pub async fn get_finished_trainings(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<Training>>, AppError> {
    let cutoff = date.and_time(NaiveTime::MIN).and_utc();
    Ok(Json(
        state
            .training_service
            .get_all_finished_trainings(cutoff)
            .await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub activity_type: ActivityType,
}

pub async fn get_trainings_by_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<Training>>, AppError> {
    Ok(Json(
        state
            .training_service
            .get_all_trainings_by_activity(query.activity_type)
            .await?,
    ))
}

/// Replaces the training's recorded fields; the owner stays whatever it was.
pub async fn update_training(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTraining>,
) -> Result<Json<Training>, AppError> {
    let original = state.training_service.get_training(id).await?;

    let training = Training {
        id: Some(id),
        user: original.user,
        start_time: request.start_time,
        end_time: request.end_time,
        activity_type: request.activity_type,
        distance: request.distance,
        average_speed: request.average_speed,
    };
    let stored = state.training_service.update_training(training).await?;

    Ok(Json(stored))
}

pub async fn delete_user_trainings(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .training_service
        .delete_user_trainings(user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
