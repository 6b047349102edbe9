use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{BodyPartSummary, FromSqliteRow};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
        })
    }
}

impl Workout {
    pub fn is_ended(&self) -> bool {
        self.end_time.is_some()
    }

    /// The end time to store when finishing this workout at `at`.
    pub fn end_time_for(&self, at: DateTime<Utc>) -> Result<DateTime<Utc>> {
        if self.is_ended() {
            return Err(AppError::Conflict("Workout is already ended".to_string()));
        }
        if at < self.start_time {
            return Err(AppError::Validation(
                "End time must be after start time".to_string(),
            ));
        }
        Ok(at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutWithBodyParts {
    #[serde(flatten)]
    pub workout: Workout,
    pub body_parts: Vec<BodyPartSummary>,
}

/// Workout fields embedded in a workout-set payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSummary {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl From<Workout> for WorkoutSummary {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.id,
            date: workout.date,
            start_time: workout.start_time,
            end_time: workout.end_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkout {
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutDate {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ChangeBodyParts {
    pub body_part_names: Vec<String>,
}
