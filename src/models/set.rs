use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub id: String,
    pub user_id: String,
    pub workout_set_id: String,
    pub set_number: i32,
    pub weight: f64,
    pub reps: i32,
}

impl FromSqliteRow for Set {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            workout_set_id: row.get("workout_set_id")?,
            set_number: row.get("set_number")?,
            weight: row.get("weight")?,
            reps: row.get("reps")?,
        })
    }
}

impl Set {
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// Number for the next set appended after `current_max`.
pub fn next_set_number(current_max: Option<i32>) -> i32 {
    current_max.map(|n| n + 1).unwrap_or(1)
}

/// `(set id, new number)` for every set whose number is off its position.
///
/// `sets` must be ordered by their current number.
pub fn renumbering(sets: &[Set]) -> Vec<(String, i32)> {
    sets.iter()
        .zip(1..)
        .filter(|(set, position)| set.set_number != *position)
        .map(|(set, position)| (set.id.clone(), position))
        .collect()
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NewSet {
    pub weight: f64,
    pub reps: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSet {
    pub weight: Option<f64>,
    pub reps: Option<i32>,
}

/// Which exercise to look up previous sets for.
#[derive(Debug, Clone)]
pub enum ExerciseRef {
    Id(String),
    Name(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct LastWorkoutSets {
    pub date: NaiveDate,
    pub sets: Vec<Set>,
}
