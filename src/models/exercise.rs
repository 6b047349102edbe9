use rusqlite::Row;
use serde::{Deserialize, Deserializer, Serialize};

use super::{BodyPartSummary, FromSqliteRow};

pub const MAX_EXERCISE_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub body_part_id: String,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            body_part_id: row.get("body_part_id")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseWithBodyPart {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub body_part: BodyPartSummary,
}

/// Expects the exercise columns plus `body_part_id` and `body_part_name`.
impl FromSqliteRow for ExerciseWithBodyPart {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            body_part: BodyPartSummary {
                id: row.get("body_part_id")?,
                name: row.get("body_part_name")?,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub body_part_id: String,
}

/// Omitted fields keep their stored value. `"description": null` clears the
/// description.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateExercise {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub body_part_id: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing field,
/// which `#[serde(default)]` leaves as `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
