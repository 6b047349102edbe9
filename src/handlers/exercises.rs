use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{CreateExercise, Created, ExerciseWithBodyPart, UpdateExercise};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExerciseQuery {
    pub body_part: Option<String>,
}

pub async fn list(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    Query(query): Query<ExerciseQuery>,
) -> Result<Json<Vec<ExerciseWithBodyPart>>> {
    let exercises = state
        .exercise_repo
        .find_all_for_user(&auth_user.id, query.body_part.as_deref())
        .await?;
    Ok(Json(exercises))
}

/// Returns the existing exercise when the name is already taken.
pub async fn create(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    Json(input): Json<CreateExercise>,
) -> Result<Json<Created<ExerciseWithBodyPart>>> {
    let (exercise, created) = state.exercise_repo.create(&auth_user.id, input).await?;
    Ok(Json(Created::new(exercise, created)))
}

pub async fn update(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateExercise>,
) -> Result<Json<ExerciseWithBodyPart>> {
    let exercise = state
        .exercise_repo
        .update(&id, &auth_user.id, input)
        .await?;
    Ok(Json(exercise))
}

pub async fn delete(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.exercise_repo.delete(&id, &auth_user.id).await? {
        return Err(AppError::not_found("Exercise"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
) -> Result<StatusCode> {
    let deleted = state.exercise_repo.delete_all(&auth_user.id).await?;
    tracing::info!("Deleted {} exercise(s) for {}", deleted, auth_user.id);
    Ok(StatusCode::NO_CONTENT)
}
