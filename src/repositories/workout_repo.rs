use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{BodyPart, BodyPartSummary, FromSqliteRow, Workout, WorkoutWithBodyParts};
use crate::repositories::body_part_repo;

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_for_user(&self, user_id: &str) -> Result<Vec<WorkoutWithBodyParts>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM workouts WHERE user_id = ? ORDER BY date")?;
            let workouts = stmt
                .query_map([&user_id], Workout::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut result = Vec::with_capacity(workouts.len());
            for workout in workouts {
                let body_parts = select_body_parts(&conn, &workout.id)?;
                result.push(WorkoutWithBodyParts {
                    workout,
                    body_parts,
                });
            }
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<WorkoutWithBodyParts>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            match select_by_date(&conn, &user_id, date)? {
                Some(workout) => Ok(Some(with_body_parts(&conn, workout)?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(
        &self,
        user_id: &str,
        date: NaiveDate,
        start_time: Option<DateTime<Utc>>,
    ) -> Result<Workout> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let start_time = start_time.unwrap_or_else(Utc::now);
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            if select_by_date(&tx, &user_id, date)?.is_some() {
                return Err(AppError::Conflict(
                    "Workout for this date already exists".to_string(),
                ));
            }
            let workout = insert(&tx, &user_id, date, start_time)?;
            tx.commit()?;
            Ok(workout)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// The workout for `date`, created with `start_time = now` if missing.
    /// The flag is `true` when it was created by this call.
    pub async fn get_or_create(&self, user_id: &str, date: NaiveDate) -> Result<(Workout, bool)> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            if let Some(existing) = select_by_date(&tx, &user_id, date)? {
                return Ok((existing, false));
            }
            let workout = insert(&tx, &user_id, date, Utc::now())?;
            tx.commit()?;
            Ok((workout, true))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn end(&self, user_id: &str, date: NaiveDate, at: DateTime<Utc>) -> Result<Workout> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut workout =
                select_by_date(&conn, &user_id, date)?.ok_or_else(|| AppError::not_found("Workout"))?;
            let end_time = workout.end_time_for(at)?;
            conn.execute(
                "UPDATE workouts SET end_time = ? WHERE id = ? AND user_id = ?",
                rusqlite::params![end_time, workout.id, user_id],
            )?;
            workout.end_time = Some(end_time);
            Ok(workout)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Associate body parts (by name) with the workout on `date`.
    ///
    /// Unknown names are skipped and existing associations kept; it is a
    /// not-found when none of the names resolve.
    pub async fn add_body_parts(
        &self,
        user_id: &str,
        date: NaiveDate,
        names: Vec<String>,
    ) -> Result<WorkoutWithBodyParts> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let workout =
                select_by_date(&tx, &user_id, date)?.ok_or_else(|| AppError::not_found("Workout"))?;
            let body_parts = resolve_body_parts(&tx, &user_id, &names)?;

            for body_part in &body_parts {
                tx.execute(
                    "INSERT OR IGNORE INTO workout_body_parts (workout_id, body_part_id) VALUES (?, ?)",
                    [&workout.id, &body_part.id],
                )?;
            }

            let updated = with_body_parts(&tx, workout)?;
            tx.commit()?;
            Ok(updated)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Detach body parts (by name) from the workout on `date`, deleting the
    /// workout's exercise entries for exercises of those body parts.
    pub async fn remove_body_parts(
        &self,
        user_id: &str,
        date: NaiveDate,
        names: Vec<String>,
    ) -> Result<WorkoutWithBodyParts> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let workout =
                select_by_date(&tx, &user_id, date)?.ok_or_else(|| AppError::not_found("Workout"))?;
            let body_parts = resolve_body_parts(&tx, &user_id, &names)?;

            let mut removed_sets = 0;
            for body_part in &body_parts {
                removed_sets += tx.execute(
                    "DELETE FROM workout_sets
                     WHERE workout_id = ?1
                       AND exercise_id IN (SELECT id FROM exercises WHERE body_part_id = ?2)",
                    [&workout.id, &body_part.id],
                )?;
                tx.execute(
                    "DELETE FROM workout_body_parts WHERE workout_id = ? AND body_part_id = ?",
                    [&workout.id, &body_part.id],
                )?;
            }
            tracing::debug!(
                "Removed {} body part(s) and {} workout set(s) from workout {}",
                body_parts.len(),
                removed_sets,
                workout.id
            );

            let updated = with_body_parts(&tx, workout)?;
            tx.commit()?;
            Ok(updated)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, user_id: &str, date: NaiveDate) -> Result<bool> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM workouts WHERE user_id = ? AND date = ?",
                rusqlite::params![user_id, date],
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
            let rows = conn.execute("DELETE FROM workouts WHERE user_id = ?", [&user_id])?;
            Ok(rows)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

pub(crate) fn select_by_date(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
) -> rusqlite::Result<Option<Workout>> {
    conn.query_row(
        "SELECT * FROM workouts WHERE user_id = ? AND date = ?",
        rusqlite::params![user_id, date],
        Workout::from_row,
    )
    .optional()
}

fn insert(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
    start_time: DateTime<Utc>,
) -> rusqlite::Result<Workout> {
    let workout = Workout {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        date,
        start_time,
        end_time: None,
    };
    conn.execute(
        "INSERT INTO workouts (id, user_id, date, start_time, end_time) VALUES (?, ?, ?, ?, NULL)",
        rusqlite::params![workout.id, workout.user_id, workout.date, workout.start_time],
    )?;
    Ok(workout)
}

fn select_body_parts(conn: &Connection, workout_id: &str) -> rusqlite::Result<Vec<BodyPartSummary>> {
    let mut stmt = conn.prepare(
        "SELECT bp.id, bp.name
         FROM workout_body_parts wbp
         JOIN body_parts bp ON wbp.body_part_id = bp.id
         WHERE wbp.workout_id = ?
         ORDER BY bp.name",
    )?;
    let body_parts = stmt
        .query_map([workout_id], BodyPartSummary::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(body_parts)
}

fn with_body_parts(conn: &Connection, workout: Workout) -> rusqlite::Result<WorkoutWithBodyParts> {
    let body_parts = select_body_parts(conn, &workout.id)?;
    Ok(WorkoutWithBodyParts {
        workout,
        body_parts,
    })
}

fn resolve_body_parts(conn: &Connection, user_id: &str, names: &[String]) -> Result<Vec<BodyPart>> {
    let mut body_parts: Vec<BodyPart> = Vec::new();
    for name in names {
        if let Some(body_part) = body_part_repo::select_by_name(conn, user_id, name.trim())? {
            if !body_parts.iter().any(|bp| bp.id == body_part.id) {
                body_parts.push(body_part);
            }
        }
    }
    if body_parts.is_empty() {
        return Err(AppError::NotFound("No body parts found".to_string()));
    }
    Ok(body_parts)
}
