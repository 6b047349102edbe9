use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{
    validate, FromSqliteRow, NewSet, Workout, WorkoutSet, WorkoutSetDetail, WorkoutSetFilters,
};
use crate::repositories::{exercise_repo, set_repo, workout_repo};

#[derive(Clone)]
pub struct WorkoutSetRepository {
    pool: DbPool,
}

impl WorkoutSetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_details(
        &self,
        user_id: &str,
        filters: WorkoutSetFilters,
    ) -> Result<Vec<WorkoutSetDetail>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;

            let mut sql = String::from(
                "SELECT ws.*
                 FROM workout_sets ws
                 JOIN workouts w ON ws.workout_id = w.id
                 JOIN exercises e ON ws.exercise_id = e.id
                 JOIN body_parts bp ON e.body_part_id = bp.id
                 WHERE ws.user_id = ?",
            );
            let mut params = vec![user_id];
            if let Some(date) = filters.workout_date {
                sql.push_str(" AND w.date = ?");
                params.push(date.format("%F").to_string());
            }
            if let Some(name) = filters.exercise_name {
                sql.push_str(" AND e.name = ?");
                params.push(name.trim().to_string());
            }
            if let Some(name) = filters.body_part_name {
                sql.push_str(" AND bp.name = ?");
                params.push(name.trim().to_string());
            }
            sql.push_str(" ORDER BY w.date, e.name");

            let mut stmt = conn.prepare(&sql)?;
            let workout_sets = stmt
                .query_map(rusqlite::params_from_iter(params), WorkoutSet::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            workout_sets
                .into_iter()
                .map(|workout_set| load_detail(&conn, workout_set))
                .collect()
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Log sets for an exercise on a workout day, starting the exercise for
    /// that day if needed. New sets are appended after any existing ones.
    pub async fn create(
        &self,
        user_id: &str,
        date: NaiveDate,
        exercise_name: &str,
        new_sets: Vec<NewSet>,
    ) -> Result<(WorkoutSetDetail, bool)> {
        for new_set in &new_sets {
            validate::set_values(new_set.weight, new_set.reps)?;
        }
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let exercise_name = exercise_name.trim().to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let (workout_id, exercise_id) = resolve(&tx, &user_id, date, &exercise_name)?;

            let (workout_set, created) = match select_for(&tx, &workout_id, &exercise_id)? {
                Some(existing) => (existing, false),
                None => (insert(&tx, &user_id, &workout_id, &exercise_id)?, true),
            };
            set_repo::append_sets(&tx, &user_id, &workout_set.id, &new_sets)?;

            let detail = load_detail(&tx, workout_set)?;
            tx.commit()?;
            Ok((detail, created))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Merge sets into an exercise on a workout day.
    ///
    /// An entry whose reps match an existing set updates that set's weight;
    /// any other entry is appended. Existing sets are never removed.
    pub async fn upsert_sets(
        &self,
        user_id: &str,
        date: NaiveDate,
        exercise_name: &str,
        new_sets: Vec<NewSet>,
    ) -> Result<WorkoutSetDetail> {
        for new_set in &new_sets {
            validate::set_values(new_set.weight, new_set.reps)?;
        }
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let exercise_name = exercise_name.trim().to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let (workout_id, exercise_id) = resolve(&tx, &user_id, date, &exercise_name)?;
            let workout_set = select_for(&tx, &workout_id, &exercise_id)?
                .ok_or_else(|| AppError::not_found("Workout set"))?;

            for new_set in &new_sets {
                let matching: Option<String> = tx
                    .query_row(
                        "SELECT id FROM sets WHERE workout_set_id = ? AND reps = ?
                         ORDER BY set_number LIMIT 1",
                        rusqlite::params![workout_set.id, new_set.reps],
                        |row| row.get(0),
                    )
                    .optional()?;

                match matching {
                    Some(id) => {
                        tx.execute(
                            "UPDATE sets SET weight = ? WHERE id = ?",
                            rusqlite::params![new_set.weight, id],
                        )?;
                    }
                    None => {
                        set_repo::append_sets(
                            &tx,
                            &user_id,
                            &workout_set.id,
                            std::slice::from_ref(new_set),
                        )?;
                    }
                }
            }

            let detail = load_detail(&tx, workout_set)?;
            tx.commit()?;
            Ok(detail)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Remove an exercise (and its sets) from a workout day.
    pub async fn delete(&self, user_id: &str, date: NaiveDate, exercise_name: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let exercise_name = exercise_name.trim().to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let (workout_id, exercise_id) = resolve(&conn, &user_id, date, &exercise_name)?;
            let rows = conn.execute(
                "DELETE FROM workout_sets WHERE workout_id = ? AND exercise_id = ?",
                [&workout_id, &exercise_id],
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
            let rows = conn.execute("DELETE FROM workout_sets WHERE user_id = ?", [&user_id])?;
            Ok(rows)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

pub(crate) fn select_for(
    conn: &Connection,
    workout_id: &str,
    exercise_id: &str,
) -> rusqlite::Result<Option<WorkoutSet>> {
    conn.query_row(
        "SELECT * FROM workout_sets WHERE workout_id = ? AND exercise_id = ?",
        [workout_id, exercise_id],
        WorkoutSet::from_row,
    )
    .optional()
}

/// Ids of the user's workout on `date` and exercise named `exercise_name`.
fn resolve(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
    exercise_name: &str,
) -> Result<(String, String)> {
    let workout = workout_repo::select_by_date(conn, user_id, date)?
        .ok_or_else(|| AppError::not_found("Workout"))?;
    let exercise = exercise_repo::select_by_name(conn, user_id, exercise_name)?
        .ok_or_else(|| AppError::not_found("Exercise"))?;
    Ok((workout.id, exercise.id))
}

fn insert(
    conn: &Connection,
    user_id: &str,
    workout_id: &str,
    exercise_id: &str,
) -> rusqlite::Result<WorkoutSet> {
    let workout_set = WorkoutSet {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        workout_id: workout_id.to_string(),
        exercise_id: exercise_id.to_string(),
    };
    conn.execute(
        "INSERT INTO workout_sets (id, user_id, workout_id, exercise_id) VALUES (?, ?, ?, ?)",
        [
            &workout_set.id,
            &workout_set.user_id,
            &workout_set.workout_id,
            &workout_set.exercise_id,
        ],
    )?;
    Ok(workout_set)
}

fn load_detail(conn: &Connection, workout_set: WorkoutSet) -> Result<WorkoutSetDetail> {
    let workout = conn.query_row(
        "SELECT * FROM workouts WHERE id = ?",
        [&workout_set.workout_id],
        Workout::from_row,
    )?;
    let exercise =
        exercise_repo::select_with_body_part(conn, &workout_set.exercise_id, &workout_set.user_id)?
            .ok_or_else(|| AppError::not_found("Exercise"))?;
    let sets = set_repo::load_sets(conn, &workout_set.id)?;

    Ok(WorkoutSetDetail::new(
        workout_set.id,
        workout.into(),
        exercise,
        sets,
    ))
}
