use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

pub const MAX_BODY_PART_NAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPart {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

impl FromSqliteRow for BodyPart {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
        })
    }
}

/// The `{id, name}` pair embedded in exercise and workout payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPartSummary {
    pub id: String,
    pub name: String,
}

impl FromSqliteRow for BodyPartSummary {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBodyPart {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBodyPart {
    pub name: String,
}
