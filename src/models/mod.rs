pub mod body_part;
pub mod exercise;
pub mod from_row;
pub mod set;
pub mod validate;
pub mod workout;
pub mod workout_set;

use serde::Serialize;

pub use body_part::{BodyPart, BodyPartSummary, CreateBodyPart, UpdateBodyPart};
pub use exercise::{CreateExercise, Exercise, ExerciseWithBodyPart, UpdateExercise};
pub use from_row::FromSqliteRow;
pub use set::{ExerciseRef, LastWorkoutSets, NewSet, Set, UpdateSet};
pub use workout::{
    ChangeBodyParts, CreateWorkout, Workout, WorkoutDate, WorkoutSummary, WorkoutWithBodyParts,
};
pub use workout_set::{WorkoutSet, WorkoutSetDetail, WorkoutSetFilters, WorkoutSetRequest};

/// A record from a get-or-create operation, flagged with whether it is new.
#[derive(Debug, Clone, Serialize)]
pub struct Created<T> {
    #[serde(flatten)]
    pub item: T,
    pub created: bool,
}

impl<T> Created<T> {
    pub fn new(item: T, created: bool) -> Self {
        Self { item, created }
    }
}
