use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::exercise::MAX_EXERCISE_NAME_LEN;
use crate::models::{
    validate, CreateExercise, Exercise, ExerciseWithBodyPart, FromSqliteRow, UpdateExercise,
};
use crate::repositories::body_part_repo;

const SELECT_WITH_BODY_PART: &str = "SELECT e.id, e.user_id, e.name, e.description, e.body_part_id,
            bp.name AS body_part_name
     FROM exercises e
     JOIN body_parts bp ON e.body_part_id = bp.id";

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Exercises of a user with their body part, optionally narrowed to one
    /// body part by name. Naming a body part the user lacks is a not-found.
    pub async fn find_all_for_user(
        &self,
        user_id: &str,
        body_part_name: Option<&str>,
    ) -> Result<Vec<ExerciseWithBodyPart>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let body_part_name = body_part_name.map(|n| n.trim().to_string());
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let exercises = match body_part_name {
                Some(name) => {
                    if body_part_repo::select_by_name(&conn, &user_id, &name)?.is_none() {
                        return Err(AppError::not_found("Body part"));
                    }
                    let mut stmt = conn.prepare(&format!(
                        "{} WHERE e.user_id = ? AND bp.name = ? ORDER BY e.name",
                        SELECT_WITH_BODY_PART
                    ))?;
                    let rows = stmt
                        .query_map([&user_id, &name], ExerciseWithBodyPart::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "{} WHERE e.user_id = ? ORDER BY bp.name, e.name",
                        SELECT_WITH_BODY_PART
                    ))?;
                    let rows = stmt
                        .query_map([&user_id], ExerciseWithBodyPart::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
            };
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Get-or-create by name. An existing exercise is returned untouched
    /// together with `false`.
    pub async fn create(
        &self,
        user_id: &str,
        input: CreateExercise,
    ) -> Result<(ExerciseWithBodyPart, bool)> {
        let name = validate::name(&input.name, MAX_EXERCISE_NAME_LEN, "Exercise")?;
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            if body_part_repo::select_by_id(&tx, &input.body_part_id, &user_id)?.is_none() {
                return Err(AppError::not_found("Body part"));
            }

            if let Some(existing) = select_by_name(&tx, &user_id, &name)? {
                let exercise = select_with_body_part(&tx, &existing.id, &user_id)?
                    .ok_or_else(|| AppError::not_found("Exercise"))?;
                return Ok((exercise, false));
            }

            let id = Uuid::new_v4().to_string();
            tx.execute(
                "INSERT INTO exercises (id, user_id, name, description, body_part_id)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![id, user_id, name, input.description, input.body_part_id],
            )?;
            let exercise = select_with_body_part(&tx, &id, &user_id)?
                .ok_or_else(|| AppError::Internal("Inserted exercise vanished".to_string()))?;
            tx.commit()?;

            Ok((exercise, true))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        changes: UpdateExercise,
    ) -> Result<ExerciseWithBodyPart> {
        let name = changes
            .name
            .as_deref()
            .map(|n| validate::name(n, MAX_EXERCISE_NAME_LEN, "Exercise"))
            .transpose()?;
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let current = tx
                .query_row(
                    "SELECT * FROM exercises WHERE id = ? AND user_id = ?",
                    [&id, &user_id],
                    Exercise::from_row,
                )
                .optional()?
                .ok_or_else(|| AppError::not_found("Exercise"))?;

            let name = name.unwrap_or(current.name.clone());
            if name != current.name {
                if let Some(other) = select_by_name(&tx, &user_id, &name)? {
                    if other.id != current.id {
                        return Err(AppError::Conflict(
                            "Exercise with this name already exists".to_string(),
                        ));
                    }
                }
            }

            let body_part_id = changes.body_part_id.unwrap_or(current.body_part_id);
            if body_part_repo::select_by_id(&tx, &body_part_id, &user_id)?.is_none() {
                return Err(AppError::not_found("Body part"));
            }
            let description = match changes.description {
                Some(description) => description,
                None => current.description,
            };

            tx.execute(
                "UPDATE exercises SET name = ?, description = ?, body_part_id = ?
                 WHERE id = ? AND user_id = ?",
                rusqlite::params![name, description, body_part_id, id, user_id],
            )?;
            let exercise = select_with_body_part(&tx, &id, &user_id)?
                .ok_or_else(|| AppError::not_found("Exercise"))?;
            tx.commit()?;

            Ok(exercise)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete an exercise; its workout sets and their sets cascade.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM exercises WHERE id = ? AND user_id = ?",
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete_all(&self, user_id: &str) -> Result<usize> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM exercises WHERE user_id = ?", [&user_id])?;
            Ok(rows)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

pub(crate) fn select_by_name(
    conn: &Connection,
    user_id: &str,
    name: &str,
) -> rusqlite::Result<Option<Exercise>> {
    conn.query_row(
        "SELECT * FROM exercises WHERE user_id = ? AND name = ?",
        [user_id, name],
        Exercise::from_row,
    )
    .optional()
}

pub(crate) fn select_with_body_part(
    conn: &Connection,
    id: &str,
    user_id: &str,
) -> rusqlite::Result<Option<ExerciseWithBodyPart>> {
    conn.query_row(
        &format!("{} WHERE e.id = ? AND e.user_id = ?", SELECT_WITH_BODY_PART),
        [id, user_id],
        ExerciseWithBodyPart::from_row,
    )
    .optional()
}
