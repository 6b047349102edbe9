mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_and_show_workout() {
    let app = common::create_test_app(common::setup_test_db());

    let (status, created) = common::post(&app, "/api/workouts", json!({ "date": "2024-05-01" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["date"], "2024-05-01");
    assert!(created["end_time"].is_null());

    let (status, shown) = common::get(&app, "/api/workouts/2024-05-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown["id"], created["id"]);
    assert!(shown["body_parts"].as_array().unwrap().is_empty());

    let (status, _) = common::post(&app, "/api/workouts", json!({ "date": "2024-05-01" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_show_missing_or_malformed_date() {
    let app = common::create_test_app(common::setup_test_db());

    let (status, _) = common::get(&app, "/api/workouts/2024-05-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::get(&app, "/api/workouts/yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_or_create_workout() {
    let app = common::create_test_app(common::setup_test_db());

    let (status, first) =
        common::post(&app, "/api/workouts/get-or-create", json!({ "date": "2024-05-01" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["created"], true);

    let (_, second) =
        common::post(&app, "/api/workouts/get-or-create", json!({ "date": "2024-05-01" })).await;
    assert_eq!(second["created"], false);
    assert_eq!(second["id"], first["id"]);
}

#[tokio::test]
async fn test_list_workouts_by_date() {
    let pool = common::setup_test_db();
    common::create_test_workout(&pool, common::USER, "2024-05-03").await;
    common::create_test_workout(&pool, common::USER, "2024-05-01").await;
    common::create_test_workout(&pool, common::OTHER_USER, "2024-05-02").await;
    let app = common::create_test_app(pool);

    let (status, list) = common::get(&app, "/api/workouts").await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-05-01", "2024-05-03"]);
}

#[tokio::test]
async fn test_end_workout() {
    let pool = common::setup_test_db();
    common::create_test_workout(&pool, common::USER, "2024-05-01").await;
    let app = common::create_test_app(pool);

    let (status, ended) = common::post(&app, "/api/workouts/2024-05-01/end", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ended["end_time"].is_string());

    let (status, _) = common::post(&app, "/api/workouts/2024-05-01/end", json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = common::post(&app, "/api/workouts/2024-05-02/end", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_body_parts() {
    let pool = common::setup_test_db();
    common::create_test_body_part(&pool, common::USER, "Chest").await;
    common::create_test_body_part(&pool, common::USER, "Back").await;
    common::create_test_workout(&pool, common::USER, "2024-05-01").await;
    let app = common::create_test_app(pool);
    let uri = "/api/workouts/2024-05-01/body-parts/add";

    let (status, workout) =
        common::put(&app, uri, json!({ "body_part_names": ["Chest", "Arms"] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(workout["body_parts"].as_array().unwrap().len(), 1);

    let (_, workout) =
        common::put(&app, uri, json!({ "body_part_names": ["Chest", "Back"] })).await;
    let names: Vec<_> = workout["body_parts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|bp| bp["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Back", "Chest"]);

    let (status, _) = common::put(&app, uri, json!({ "body_part_names": ["Arms"] })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::put(
        &app,
        "/api/workouts/2024-06-01/body-parts/add",
        json!({ "body_part_names": ["Chest"] }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_body_parts_drops_their_exercises() {
    let pool = common::setup_test_db();
    let legs = common::create_test_body_part(&pool, common::USER, "Legs").await;
    let chest = common::create_test_body_part(&pool, common::USER, "Chest").await;
    common::create_test_exercise(&pool, common::USER, "Squat", &legs.id).await;
    common::create_test_exercise(&pool, common::USER, "Fly", &chest.id).await;
    common::create_test_workout(&pool, common::USER, "2024-05-01").await;
    common::create_test_workout(&pool, common::USER, "2024-05-02").await;
    common::log_test_sets(&pool, common::USER, "2024-05-01", "Squat", &[(100.0, 5)]).await;
    common::log_test_sets(&pool, common::USER, "2024-05-01", "Fly", &[(20.0, 12)]).await;
    common::log_test_sets(&pool, common::USER, "2024-05-02", "Squat", &[(105.0, 5)]).await;
    let app = common::create_test_app(pool);

    common::put(
        &app,
        "/api/workouts/2024-05-01/body-parts/add",
        json!({ "body_part_names": ["Legs", "Chest"] }),
    )
    .await;
    let (status, workout) = common::put(
        &app,
        "/api/workouts/2024-05-01/body-parts/remove",
        json!({ "body_part_names": ["Legs"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(workout["body_parts"][0]["name"], "Chest");
    assert_eq!(workout["body_parts"].as_array().unwrap().len(), 1);

    let (_, day_one) = common::get(&app, "/api/workout-sets?workout_date=2024-05-01").await;
    let exercises: Vec<_> = day_one
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["exercise"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(exercises, vec!["Fly"]);

    // Other days keep their sets
    let (_, day_two) = common::get(&app, "/api/workout-sets?workout_date=2024-05-02").await;
    assert_eq!(day_two.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_workout() {
    let pool = common::setup_test_db();
    let legs = common::create_test_body_part(&pool, common::USER, "Legs").await;
    common::create_test_exercise(&pool, common::USER, "Squat", &legs.id).await;
    common::create_test_workout(&pool, common::USER, "2024-05-01").await;
    common::log_test_sets(&pool, common::USER, "2024-05-01", "Squat", &[(100.0, 5)]).await;
    let app = common::create_test_app(pool);

    let (status, _) = common::delete(&app, "/api/workouts/2024-05-01").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = common::delete(&app, "/api/workouts/2024-05-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, workout_sets) = common::get(&app, "/api/workout-sets").await;
    assert!(workout_sets.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_all_workouts() {
    let pool = common::setup_test_db();
    common::create_test_workout(&pool, common::USER, "2024-05-01").await;
    common::create_test_workout(&pool, common::USER, "2024-05-02").await;
    let app = common::create_test_app(pool);

    let (status, _) = common::delete(&app, "/api/workouts").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = common::get(&app, "/api/workouts").await;
    assert!(list.as_array().unwrap().is_empty());
}
