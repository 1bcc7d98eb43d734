use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{CreateUser, UpdateUser, User};
use crate::services;

use super::routes::AppState;

pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.user_service.find_all_users().await?))
}

pub async fn get_single_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = state
        .user_service
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user with id {id} not found")))?;

    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<User>, AppError> {
    let user = state
        .user_service
        .get_user_by_email(&query.email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user with email {} not found", query.email)))?;

    Ok(Json(user))
}

pub async fn get_users_older_than(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.user_service.get_older_than(date).await?))
}

pub async fn add_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.user_service.create_user(request.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUser>,
) -> Result<Json<User>, AppError> {
    let user = state.user_service.update_user(request.into_user(id)).await?;
    Ok(Json(user))
}

/// Deleting a user removes its trainings first; a missing user is a no-op.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.user_service.get_user(id).await?.is_some() {
        services::delete_user_with_trainings(&state.user_service, &state.training_service, id)
            .await?;
    }

    Ok(StatusCode::NO_CONTENT)
}
