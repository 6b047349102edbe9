use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{BodyPart, CreateBodyPart, UpdateBodyPart};
use crate::repositories::BodyPartRepository;

#[derive(Clone)]
pub struct BodyPartsState {
    pub body_part_repo: BodyPartRepository,
}

pub async fn list(
    State(state): State<BodyPartsState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<BodyPart>>> {
    let body_parts = state.body_part_repo.find_all_for_user(&auth_user.id).await?;
    Ok(Json(body_parts))
}

pub async fn create(
    State(state): State<BodyPartsState>,
    auth_user: AuthUser,
    Json(input): Json<CreateBodyPart>,
) -> Result<(StatusCode, Json<BodyPart>)> {
    let body_part = state
        .body_part_repo
        .create(&auth_user.id, &input.name)
        .await?;
    Ok((StatusCode::CREATED, Json(body_part)))
}

pub async fn update(
    State(state): State<BodyPartsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateBodyPart>,
) -> Result<Json<BodyPart>> {
    let body_part = state
        .body_part_repo
        .update(&id, &auth_user.id, &input.name)
        .await?;
    Ok(Json(body_part))
}

pub async fn delete(
    State(state): State<BodyPartsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.body_part_repo.delete(&id, &auth_user.id).await? {
        return Err(AppError::not_found("Body part"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all(
    State(state): State<BodyPartsState>,
    auth_user: AuthUser,
) -> Result<StatusCode> {
    let deleted = state.body_part_repo.delete_all(&auth_user.id).await?;
    tracing::info!("Deleted {} body part(s) for {}", deleted, auth_user.id);
    Ok(StatusCode::NO_CONTENT)
}
