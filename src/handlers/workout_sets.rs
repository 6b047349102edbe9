use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Created, WorkoutSetDetail, WorkoutSetFilters, WorkoutSetRequest};
use crate::repositories::WorkoutSetRepository;

#[derive(Clone)]
pub struct WorkoutSetsState {
    pub workout_set_repo: WorkoutSetRepository,
}

pub async fn list(
    State(state): State<WorkoutSetsState>,
    auth_user: AuthUser,
    Query(filters): Query<WorkoutSetFilters>,
) -> Result<Json<Vec<WorkoutSetDetail>>> {
    let details = state
        .workout_set_repo
        .find_details(&auth_user.id, filters)
        .await?;
    Ok(Json(details))
}

pub async fn create(
    State(state): State<WorkoutSetsState>,
    auth_user: AuthUser,
    Json(input): Json<WorkoutSetRequest>,
) -> Result<Json<Created<WorkoutSetDetail>>> {
    let (detail, created) = state
        .workout_set_repo
        .create(
            &auth_user.id,
            input.workout_date,
            &input.exercise_name,
            input.sets,
        )
        .await?;
    Ok(Json(Created::new(detail, created)))
}

pub async fn update(
    State(state): State<WorkoutSetsState>,
    auth_user: AuthUser,
    Json(input): Json<WorkoutSetRequest>,
) -> Result<Json<WorkoutSetDetail>> {
    let detail = state
        .workout_set_repo
        .upsert_sets(
            &auth_user.id,
            input.workout_date,
            &input.exercise_name,
            input.sets,
        )
        .await?;
    Ok(Json(detail))
}

pub async fn delete(
    State(state): State<WorkoutSetsState>,
    auth_user: AuthUser,
    Path((date, exercise_name)): Path<(NaiveDate, String)>,
) -> Result<StatusCode> {
    if !state
        .workout_set_repo
        .delete(&auth_user.id, date, &exercise_name)
        .await?
    {
        return Err(AppError::not_found("Workout set"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all(
    State(state): State<WorkoutSetsState>,
    auth_user: AuthUser,
) -> Result<StatusCode> {
    let deleted = state.workout_set_repo.delete_all(&auth_user.id).await?;
    tracing::info!("Deleted {} workout set(s) for {}", deleted, auth_user.id);
    Ok(StatusCode::NO_CONTENT)
}
