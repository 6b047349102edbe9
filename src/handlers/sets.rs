use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{ExerciseRef, LastWorkoutSets, Set, UpdateSet};
use crate::repositories::SetRepository;

#[derive(Clone)]
pub struct SetsState {
    pub set_repo: SetRepository,
}

#[derive(Debug, Deserialize)]
pub struct SetsQuery {
    pub workout_date: NaiveDate,
    pub exercise_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LastSetsQuery {
    pub exercise_name: Option<String>,
    pub exercise_id: Option<String>,
    pub before: Option<NaiveDate>,
}

impl LastSetsQuery {
    /// The exercise id wins when both are given.
    fn exercise(self) -> Result<ExerciseRef> {
        match (self.exercise_id, self.exercise_name) {
            (Some(id), _) if !id.trim().is_empty() => Ok(ExerciseRef::Id(id)),
            (_, Some(name)) if !name.trim().is_empty() => Ok(ExerciseRef::Name(name)),
            _ => Err(AppError::BadRequest(
                "exercise_name or exercise_id is required".to_string(),
            )),
        }
    }
}

pub async fn list(
    State(state): State<SetsState>,
    auth_user: AuthUser,
    Query(query): Query<SetsQuery>,
) -> Result<Json<Vec<Set>>> {
    let sets = state
        .set_repo
        .find_for_workout_exercise(&auth_user.id, query.workout_date, &query.exercise_name)
        .await?;
    Ok(Json(sets))
}

pub async fn last(
    State(state): State<SetsState>,
    auth_user: AuthUser,
    Query(query): Query<LastSetsQuery>,
) -> Result<Json<LastWorkoutSets>> {
    // "Today" is the UTC calendar date, as clients send workout dates in UTC.
    let before = query.before.unwrap_or_else(|| Utc::now().date_naive());
    let exercise = query.exercise()?;

    let last = state
        .set_repo
        .find_last(&auth_user.id, exercise, before)
        .await?
        .ok_or_else(|| AppError::NotFound("No previous sets found".to_string()))?;
    Ok(Json(last))
}

pub async fn update(
    State(state): State<SetsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateSet>,
) -> Result<Json<Set>> {
    let set = state.set_repo.update(&id, &auth_user.id, input).await?;
    Ok(Json(set))
}

pub async fn delete(
    State(state): State<SetsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.set_repo.delete(&id, &auth_user.id).await? {
        return Err(AppError::not_found("Set"));
    }
    Ok(StatusCode::NO_CONTENT)
}
