//! Field rules shared by the repositories.

use crate::error::{AppError, Result};

/// Trim a display name and check it is non-empty and at most `max_chars` long.
pub fn name(raw: &str, max_chars: usize, label: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} name cannot be empty", label)));
    }
    if trimmed.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "{} name cannot exceed {} characters",
            label, max_chars
        )));
    }
    Ok(trimmed.to_string())
}

pub fn set_values(weight: f64, reps: i32) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(AppError::Validation(
            "Weight must be greater than or equal to 0".to_string(),
        ));
    }
    if reps <= 0 {
        return Err(AppError::Validation(
            "Reps must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
