use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::body_part::MAX_BODY_PART_NAME_LEN;
use crate::models::{validate, BodyPart, FromSqliteRow};

#[derive(Clone)]
pub struct BodyPartRepository {
    pool: DbPool,
}

impl BodyPartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_for_user(&self, user_id: &str) -> Result<Vec<BodyPart>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM body_parts WHERE user_id = ? ORDER BY name")?;
            let body_parts = stmt
                .query_map([&user_id], BodyPart::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(body_parts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, user_id: &str, name: &str) -> Result<BodyPart> {
        let name = validate::name(name, MAX_BODY_PART_NAME_LEN, "Body part")?;
        let body_part = BodyPart {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name,
        };
        let body_part_clone = body_part.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            if select_by_name(&tx, &body_part_clone.user_id, &body_part_clone.name)?.is_some() {
                return Err(AppError::Conflict(
                    "Body part with this name already exists".to_string(),
                ));
            }
            tx.execute(
                "INSERT INTO body_parts (id, user_id, name) VALUES (?, ?, ?)",
                rusqlite::params![
                    body_part_clone.id,
                    body_part_clone.user_id,
                    body_part_clone.name
                ],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(body_part)
    }

    /// Rename a body part. Renaming to its current name is a no-op.
    pub async fn update(&self, id: &str, user_id: &str, name: &str) -> Result<BodyPart> {
        let name = validate::name(name, MAX_BODY_PART_NAME_LEN, "Body part")?;
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let mut body_part =
                select_by_id(&tx, &id, &user_id)?.ok_or_else(|| AppError::not_found("Body part"))?;

            if body_part.name == name {
                return Ok(body_part);
            }
            if select_by_name(&tx, &user_id, &name)?.is_some() {
                return Err(AppError::Conflict(
                    "Body part with this name already exists".to_string(),
                ));
            }

            tx.execute(
                "UPDATE body_parts SET name = ? WHERE id = ? AND user_id = ?",
                rusqlite::params![name, id, user_id],
            )?;
            tx.commit()?;

            body_part.name = name;
            Ok(body_part)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete a body part; its exercises, their workout sets and the workout
    /// associations go with it through the foreign keys.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM body_parts WHERE id = ? AND user_id = ?",
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
            let rows = conn.execute("DELETE FROM body_parts WHERE user_id = ?", [&user_id])?;
            Ok(rows)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

pub(crate) fn select_by_id(
    conn: &Connection,
    id: &str,
    user_id: &str,
) -> rusqlite::Result<Option<BodyPart>> {
    conn.query_row(
        "SELECT * FROM body_parts WHERE id = ? AND user_id = ?",
        [id, user_id],
        BodyPart::from_row,
    )
    .optional()
}

pub(crate) fn select_by_name(
    conn: &Connection,
    user_id: &str,
    name: &str,
) -> rusqlite::Result<Option<BodyPart>> {
    conn.query_row(
        "SELECT * FROM body_parts WHERE user_id = ? AND name = ?",
        [user_id, name],
        BodyPart::from_row,
    )
    .optional()
}
