pub mod body_parts;
pub mod exercises;
pub mod health;
pub mod sets;
pub mod workout_sets;
pub mod workouts;
