use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{body_parts, exercises, health, sets, workout_sets, workouts};

pub fn create_router(
    body_parts_state: body_parts::BodyPartsState,
    exercises_state: exercises::ExercisesState,
    workouts_state: workouts::WorkoutsState,
    workout_sets_state: workout_sets::WorkoutSetsState,
    sets_state: sets::SetsState,
) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        // Body parts
        .route(
            "/body-parts",
            get(body_parts::list)
                .post(body_parts::create)
                .delete(body_parts::delete_all),
        )
        .route(
            "/body-parts/{id}",
            put(body_parts::update).delete(body_parts::delete),
        )
        .with_state(body_parts_state)
        // Exercises
        .route(
            "/exercises",
            get(exercises::list)
                .post(exercises::create)
                .delete(exercises::delete_all),
        )
        .route(
            "/exercises/{id}",
            put(exercises::update).delete(exercises::delete),
        )
        .with_state(exercises_state)
        // Workouts
        .route(
            "/workouts",
            get(workouts::list)
                .post(workouts::create)
                .delete(workouts::delete_all),
        )
        .route("/workouts/get-or-create", post(workouts::get_or_create))
        .route(
            "/workouts/{date}",
            get(workouts::show).delete(workouts::delete),
        )
        .route("/workouts/{date}/end", post(workouts::end))
        .route(
            "/workouts/{date}/body-parts/add",
            put(workouts::add_body_parts),
        )
        .route(
            "/workouts/{date}/body-parts/remove",
            put(workouts::remove_body_parts),
        )
        .with_state(workouts_state)
        // Exercises performed in a workout
        .route(
            "/workout-sets",
            get(workout_sets::list)
                .post(workout_sets::create)
                .put(workout_sets::update)
                .delete(workout_sets::delete_all),
        )
        .route(
            "/workouts/{date}/exercises/{name}",
            delete(workout_sets::delete),
        )
        .with_state(workout_sets_state)
        // Sets
        .route("/sets", get(sets::list))
        .route("/sets/last", get(sets::last))
        .route("/sets/{id}", put(sets::update).delete(sets::delete))
        .with_state(sets_state);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}
