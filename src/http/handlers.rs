use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::application::{AppError, HabitService, StatsReport};

#[derive(Deserialize)]
pub struct CreateHabit {
    title: Option<String>,
    icon: Option<String>,
    default_interval: Option<i64>,
}

#[derive(Deserialize)]
pub struct LogOccurrence {
    habit_id: Uuid,
    comment: Option<String>,
    interval: Option<i64>,
}

#[derive(Deserialize)]
pub struct ManualLog {
    habit_id: Uuid,
    timestamp: String,
    comment: Option<String>,
    interval: Option<i64>,
}

#[derive(Serialize)]
pub struct HabitSummary {
    id: Uuid,
    title: String,
    icon: String,
}

pub async fn list_habits(
    State(service): State<Arc<HabitService>>,
) -> Result<Json<Vec<HabitSummary>>, AppError> {
    let habits = service.list_habits().await?;

    Ok(Json(
        habits
            .into_iter()
            .map(|habit| HabitSummary {
                id: habit.id,
                title: habit.title,
                icon: habit.icon,
            })
            .collect(),
    ))
}

pub async fn create_habit(
    State(service): State<Arc<HabitService>>,
    Json(payload): Json<CreateHabit>,
) -> Result<impl IntoResponse, AppError> {
    service
        .create_habit(
            payload.title.unwrap_or_default(),
            payload.icon,
            payload.default_interval,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

pub async fn log_occurrence(
    State(service): State<Arc<HabitService>>,
    Json(payload): Json<LogOccurrence>,
) -> Result<impl IntoResponse, AppError> {
    service
        .log_occurrence(payload.habit_id, payload.comment, payload.interval)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

pub async fn log_manual(
    State(service): State<Arc<HabitService>>,
    Json(payload): Json<ManualLog>,
) -> Result<impl IntoResponse, AppError> {
    service
        .log_manual(
            payload.habit_id,
            &payload.timestamp,
            payload.comment,
            payload.interval,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

pub async fn delete_log(
    State(service): State<Arc<HabitService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    service.delete_log(id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_habit(
    State(service): State<Arc<HabitService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    service.delete_habit(id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn stats(
    State(service): State<Arc<HabitService>>,
) -> Result<Json<StatsReport>, AppError> {
    Ok(Json(service.stats().await?))
}
