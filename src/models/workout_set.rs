use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{ExerciseWithBodyPart, FromSqliteRow, NewSet, Set, WorkoutSummary};

/// One exercise performed on one workout day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: String,
    pub user_id: String,
    pub workout_id: String,
    pub exercise_id: String,
}

impl FromSqliteRow for WorkoutSet {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            workout_id: row.get("workout_id")?,
            exercise_id: row.get("exercise_id")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSetDetail {
    pub id: String,
    pub workout: WorkoutSummary,
    pub exercise: ExerciseWithBodyPart,
    pub sets: Vec<Set>,
    pub volume: f64,
}

impl WorkoutSetDetail {
    pub fn new(
        id: String,
        workout: WorkoutSummary,
        exercise: ExerciseWithBodyPart,
        sets: Vec<Set>,
    ) -> Self {
        let volume = sets.iter().map(Set::volume).sum();
        Self {
            id,
            workout,
            exercise,
            sets,
            volume,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkoutSetFilters {
    pub workout_date: Option<NaiveDate>,
    pub exercise_name: Option<String>,
    pub body_part_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutSetRequest {
    pub workout_date: NaiveDate,
    pub exercise_name: String,
    #[serde(default)]
    pub sets: Vec<NewSet>,
}
