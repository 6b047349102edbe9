#![allow(dead_code)]

use axum::{body::Body, Router};
use chrono::NaiveDate;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use gymlog::db::{create_memory_pool, DbPool};
use gymlog::handlers::{body_parts, exercises, sets, workout_sets, workouts};
use gymlog::migrations::run_migrations_for_tests;
use gymlog::models::{BodyPart, CreateExercise, ExerciseWithBodyPart, NewSet, Workout};
use gymlog::repositories::{
    BodyPartRepository, ExerciseRepository, SetRepository, WorkoutRepository,
    WorkoutSetRepository,
};

pub const USER: &str = "user-1";
pub const OTHER_USER: &str = "user-2";

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    gymlog::routes::create_router(
        body_parts::BodyPartsState {
            body_part_repo: BodyPartRepository::new(pool.clone()),
        },
        exercises::ExercisesState {
            exercise_repo: ExerciseRepository::new(pool.clone()),
        },
        workouts::WorkoutsState {
            workout_repo: WorkoutRepository::new(pool.clone()),
        },
        workout_sets::WorkoutSetsState {
            workout_set_repo: WorkoutSetRepository::new(pool.clone()),
        },
        sets::SetsState {
            set_repo: SetRepository::new(pool),
        },
    )
}

/// Send a request as `user` and return the status with the parsed JSON body
/// (`Value::Null` when the body is empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(USER), None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(USER), Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(USER), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, Some(USER), None).await
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// Test data creation helpers
pub async fn create_test_body_part(pool: &DbPool, user_id: &str, name: &str) -> BodyPart {
    BodyPartRepository::new(pool.clone())
        .create(user_id, name)
        .await
        .unwrap()
}

pub async fn create_test_exercise(
    pool: &DbPool,
    user_id: &str,
    name: &str,
    body_part_id: &str,
) -> ExerciseWithBodyPart {
    let (exercise, _) = ExerciseRepository::new(pool.clone())
        .create(
            user_id,
            CreateExercise {
                name: name.to_string(),
                description: None,
                body_part_id: body_part_id.to_string(),
            },
        )
        .await
        .unwrap();
    exercise
}

pub async fn create_test_workout(pool: &DbPool, user_id: &str, day: &str) -> Workout {
    WorkoutRepository::new(pool.clone())
        .create(user_id, date(day), None)
        .await
        .unwrap()
}

pub async fn log_test_sets(
    pool: &DbPool,
    user_id: &str,
    day: &str,
    exercise_name: &str,
    values: &[(f64, i32)],
) {
    let sets = values
        .iter()
        .map(|&(weight, reps)| NewSet { weight, reps })
        .collect();
    WorkoutSetRepository::new(pool.clone())
        .create(user_id, date(day), exercise_name, sets)
        .await
        .unwrap();
}
