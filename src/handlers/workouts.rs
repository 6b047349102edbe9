use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{
    ChangeBodyParts, CreateWorkout, Created, Workout, WorkoutDate, WorkoutWithBodyParts,
};
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
}

pub async fn list(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<WorkoutWithBodyParts>>> {
    let workouts = state.workout_repo.find_all_for_user(&auth_user.id).await?;
    Ok(Json(workouts))
}

pub async fn show(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<Json<WorkoutWithBodyParts>> {
    let workout = state
        .workout_repo
        .find_by_date(&auth_user.id, date)
        .await?
        .ok_or_else(|| AppError::not_found("Workout"))?;
    Ok(Json(workout))
}

pub async fn create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Json(input): Json<CreateWorkout>,
) -> Result<(StatusCode, Json<Workout>)> {
    let workout = state
        .workout_repo
        .create(&auth_user.id, input.date, input.start_time)
        .await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn get_or_create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Json(input): Json<WorkoutDate>,
) -> Result<Json<Created<Workout>>> {
    let (workout, created) = state
        .workout_repo
        .get_or_create(&auth_user.id, input.date)
        .await?;
    Ok(Json(Created::new(workout, created)))
}

pub async fn end(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Workout>> {
    let workout = state
        .workout_repo
        .end(&auth_user.id, date, Utc::now())
        .await?;
    Ok(Json(workout))
}

pub async fn add_body_parts(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(date): Path<NaiveDate>,
    Json(input): Json<ChangeBodyParts>,
) -> Result<Json<WorkoutWithBodyParts>> {
    let workout = state
        .workout_repo
        .add_body_parts(&auth_user.id, date, input.body_part_names)
        .await?;
    Ok(Json(workout))
}

/// Detaching a body part also drops the workout's exercises for it.
pub async fn remove_body_parts(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(date): Path<NaiveDate>,
    Json(input): Json<ChangeBodyParts>,
) -> Result<Json<WorkoutWithBodyParts>> {
    let workout = state
        .workout_repo
        .remove_body_parts(&auth_user.id, date, input.body_part_names)
        .await?;
    Ok(Json(workout))
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<StatusCode> {
    if !state.workout_repo.delete(&auth_user.id, date).await? {
        return Err(AppError::not_found("Workout"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
) -> Result<StatusCode> {
    let deleted = state.workout_repo.delete_all(&auth_user.id).await?;
    tracing::info!("Deleted {} workout(s) for {}", deleted, auth_user.id);
    Ok(StatusCode::NO_CONTENT)
}
