pub mod body_part_repo;
pub mod exercise_repo;
pub mod set_repo;
pub mod workout_repo;
pub mod workout_set_repo;

pub use body_part_repo::BodyPartRepository;
pub use exercise_repo::ExerciseRepository;
pub use set_repo::SetRepository;
pub use workout_repo::WorkoutRepository;
pub use workout_set_repo::WorkoutSetRepository;
