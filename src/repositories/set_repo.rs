use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::set::{next_set_number, renumbering};
use crate::models::{validate, ExerciseRef, FromSqliteRow, LastWorkoutSets, NewSet, Set, UpdateSet};
use crate::repositories::{exercise_repo, workout_repo, workout_set_repo};

#[derive(Clone)]
pub struct SetRepository {
    pool: DbPool,
}

impl SetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Sets logged for an exercise on a workout day, in set order.
    ///
    /// Empty when the exercise has not been started that day.
    pub async fn find_for_workout_exercise(
        &self,
        user_id: &str,
        date: NaiveDate,
        exercise_name: &str,
    ) -> Result<Vec<Set>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let exercise_name = exercise_name.trim().to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let workout = workout_repo::select_by_date(&conn, &user_id, date)?
                .ok_or_else(|| AppError::not_found("Workout"))?;
            let exercise = exercise_repo::select_by_name(&conn, &user_id, &exercise_name)?
                .ok_or_else(|| AppError::not_found("Exercise"))?;

            match workout_set_repo::select_for(&conn, &workout.id, &exercise.id)? {
                Some(workout_set) => Ok(load_sets(&conn, &workout_set.id)?),
                None => Ok(Vec::new()),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn update(&self, id: &str, user_id: &str, changes: UpdateSet) -> Result<Set> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut set =
                select_by_id(&conn, &id, &user_id)?.ok_or_else(|| AppError::not_found("Set"))?;

            let weight = changes.weight.unwrap_or(set.weight);
            let reps = changes.reps.unwrap_or(set.reps);
            validate::set_values(weight, reps)?;

            conn.execute(
                "UPDATE sets SET weight = ?, reps = ? WHERE id = ? AND user_id = ?",
                rusqlite::params![weight, reps, id, user_id],
            )?;
            set.weight = weight;
            set.reps = reps;
            Ok(set)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete a set and close the gap it leaves in the numbering.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let Some(set) = select_by_id(&tx, &id, &user_id)? else {
                return Ok(false);
            };

            tx.execute("DELETE FROM sets WHERE id = ?", [&set.id])?;
            let moved = renumber(&tx, &set.workout_set_id)?;
            tx.commit()?;

            tracing::debug!(
                "Deleted set {} of workout set {}, renumbered {} set(s)",
                set.set_number,
                set.workout_set_id,
                moved
            );
            Ok(true)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Sets from the most recent workout before `before` that has any sets
    /// for the exercise.
    pub async fn find_last(
        &self,
        user_id: &str,
        exercise: ExerciseRef,
        before: NaiveDate,
    ) -> Result<Option<LastWorkoutSets>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let exercise_id = match exercise {
                ExerciseRef::Id(id) => exercise_repo::select_with_body_part(&conn, &id, &user_id)?
                    .map(|e| e.id),
                ExerciseRef::Name(name) => {
                    exercise_repo::select_by_name(&conn, &user_id, name.trim())?.map(|e| e.id)
                }
            }
            .ok_or_else(|| AppError::not_found("Exercise"))?;

            let last = conn
                .query_row(
                    "SELECT ws.id, w.date
                     FROM workout_sets ws
                     JOIN workouts w ON ws.workout_id = w.id
                     WHERE ws.user_id = ?1
                       AND ws.exercise_id = ?2
                       AND w.date < ?3
                       AND EXISTS (SELECT 1 FROM sets s WHERE s.workout_set_id = ws.id)
                     ORDER BY w.date DESC
                     LIMIT 1",
                    rusqlite::params![user_id, exercise_id, before],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, NaiveDate>(1)?)),
                )
                .optional()?;

            match last {
                Some((workout_set_id, date)) => Ok(Some(LastWorkoutSets {
                    date,
                    sets: load_sets(&conn, &workout_set_id)?,
                })),
                None => Ok(None),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

fn select_by_id(conn: &Connection, id: &str, user_id: &str) -> rusqlite::Result<Option<Set>> {
    conn.query_row(
        "SELECT * FROM sets WHERE id = ? AND user_id = ?",
        [id, user_id],
        Set::from_row,
    )
    .optional()
}

pub(crate) fn load_sets(conn: &Connection, workout_set_id: &str) -> rusqlite::Result<Vec<Set>> {
    let mut stmt = conn.prepare("SELECT * FROM sets WHERE workout_set_id = ? ORDER BY set_number")?;
    let sets = stmt
        .query_map([workout_set_id], Set::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(sets)
}

/// Insert `new_sets` after the current last set, numbered consecutively.
pub(crate) fn append_sets(
    conn: &Connection,
    user_id: &str,
    workout_set_id: &str,
    new_sets: &[NewSet],
) -> rusqlite::Result<Vec<Set>> {
    let mut current_max: Option<i32> = conn.query_row(
        "SELECT MAX(set_number) FROM sets WHERE workout_set_id = ?",
        [workout_set_id],
        |row| row.get(0),
    )?;

    let mut inserted = Vec::with_capacity(new_sets.len());
    for new_set in new_sets {
        let set = Set {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            workout_set_id: workout_set_id.to_string(),
            set_number: next_set_number(current_max),
            weight: new_set.weight,
            reps: new_set.reps,
        };
        conn.execute(
            "INSERT INTO sets (id, user_id, workout_set_id, set_number, weight, reps)
             VALUES (?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                set.id,
                set.user_id,
                set.workout_set_id,
                set.set_number,
                set.weight,
                set.reps
            ],
        )?;
        current_max = Some(set.set_number);
        inserted.push(set);
    }
    Ok(inserted)
}

/// Renumber the sets of a workout set to 1..=N keeping their order.
/// Returns how many sets moved.
pub(crate) fn renumber(conn: &Connection, workout_set_id: &str) -> rusqlite::Result<usize> {
    let sets = load_sets(conn, workout_set_id)?;
    let changes = renumbering(&sets);
    // Every target number is below the current one, so ascending order never
    // collides with the unique (workout_set_id, set_number) index.
    for (id, set_number) in &changes {
        conn.execute(
            "UPDATE sets SET set_number = ? WHERE id = ?",
            rusqlite::params![set_number, id],
        )?;
    }
    Ok(changes.len())
}
