mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

async fn seeded_pool() -> gymlog::db::DbPool {
    let pool = common::setup_test_db();
    let legs = common::create_test_body_part(&pool, common::USER, "Legs").await;
    common::create_test_exercise(&pool, common::USER, "Squat", &legs.id).await;
    pool
}

fn numbers_and_reps(sets: &Value) -> Vec<(i64, i64)> {
    sets.as_array()
        .unwrap()
        .iter()
        .map(|s| (s["set_number"].as_i64().unwrap(), s["reps"].as_i64().unwrap()))
        .collect()
}

#[tokio::test]
async fn test_list_sets() {
    let pool = seeded_pool().await;
    common::create_test_workout(&pool, common::USER, "2024-05-01").await;
    common::create_test_workout(&pool, common::USER, "2024-05-02").await;
    common::log_test_sets(&pool, common::USER, "2024-05-01", "Squat", &[(100.0, 5), (90.0, 8)]).await;
    let app = common::create_test_app(pool);

    let (status, sets) =
        common::get(&app, "/api/sets?workout_date=2024-05-01&exercise_name=Squat").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(numbers_and_reps(&sets), vec![(1, 5), (2, 8)]);

    let (status, empty) =
        common::get(&app, "/api/sets?workout_date=2024-05-02&exercise_name=Squat").await;
    assert_eq!(status, StatusCode::OK);
    assert!(empty.as_array().unwrap().is_empty());

    let (status, _) =
        common::get(&app, "/api/sets?workout_date=2024-05-09&exercise_name=Squat").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        common::get(&app, "/api/sets?workout_date=2024-05-01&exercise_name=Curl").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_set_renumbers() {
    let pool = seeded_pool().await;
    common::create_test_workout(&pool, common::USER, "2024-05-01").await;
    common::log_test_sets(
        &pool,
        common::USER,
        "2024-05-01",
        "Squat",
        &[(100.0, 5), (100.0, 6), (100.0, 7)],
    )
    .await;
    let app = common::create_test_app(pool);
    let list_uri = "/api/sets?workout_date=2024-05-01&exercise_name=Squat";

    let (_, sets) = common::get(&app, list_uri).await;
    let first_id = sets[0]["id"].as_str().unwrap().to_string();

    let (status, _) = common::delete(&app, &format!("/api/sets/{}", first_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, sets) = common::get(&app, list_uri).await;
    assert_eq!(numbers_and_reps(&sets), vec![(1, 6), (2, 7)]);

    let (status, _) = common::delete(&app, &format!("/api/sets/{}", first_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Appending continues after the renumbered tail
    let (_, detail) = common::post(
        &app,
        "/api/workout-sets",
        json!({
            "workout_date": "2024-05-01",
            "exercise_name": "Squat",
            "sets": [{ "weight": 80.0, "reps": 10 }],
        }),
    )
    .await;
    assert_eq!(numbers_and_reps(&detail["sets"]), vec![(1, 6), (2, 7), (3, 10)]);
}

#[tokio::test]
async fn test_update_set() {
    let pool = seeded_pool().await;
    common::create_test_workout(&pool, common::USER, "2024-05-01").await;
    common::log_test_sets(&pool, common::USER, "2024-05-01", "Squat", &[(100.0, 5)]).await;
    let app = common::create_test_app(pool);

    let (_, sets) =
        common::get(&app, "/api/sets?workout_date=2024-05-01&exercise_name=Squat").await;
    let uri = format!("/api/sets/{}", sets[0]["id"].as_str().unwrap());

    let (status, updated) = common::put(&app, &uri, json!({ "weight": 102.5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["weight"], 102.5);
    assert_eq!(updated["reps"], 5);

    let (status, _) = common::put(&app, &uri, json!({ "reps": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::send(
        &app,
        axum::http::Method::PUT,
        &uri,
        Some(common::OTHER_USER),
        Some(json!({ "reps": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_last_sets() {
    let pool = seeded_pool().await;
    for day in ["2024-05-01", "2024-05-03", "2024-05-05"] {
        common::create_test_workout(&pool, common::USER, day).await;
    }
    common::log_test_sets(&pool, common::USER, "2024-05-01", "Squat", &[(100.0, 5)]).await;
    common::log_test_sets(&pool, common::USER, "2024-05-03", "Squat", &[(105.0, 5), (105.0, 4)]).await;
    common::log_test_sets(&pool, common::USER, "2024-05-05", "Squat", &[]).await;
    let app = common::create_test_app(pool);

    let (status, last) =
        common::get(&app, "/api/sets/last?exercise_name=Squat&before=2024-05-06").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(last["date"], "2024-05-03");
    assert_eq!(numbers_and_reps(&last["sets"]), vec![(1, 5), (2, 4)]);

    let (_, exercises) = common::get(&app, "/api/exercises").await;
    let exercise_id = exercises[0]["id"].as_str().unwrap();
    let (status, by_id) = common::get(
        &app,
        &format!("/api/sets/last?exercise_id={}&before=2024-05-03", exercise_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["date"], "2024-05-01");

    let (status, _) =
        common::get(&app, "/api/sets/last?exercise_name=Squat&before=2024-05-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::get(&app, "/api/sets/last").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_last_sets_defaults_to_before_utc_today() {
    let today = chrono::Utc::now().date_naive();
    let yesterday = today.pred_opt().unwrap();
    let (today, yesterday) = (today.to_string(), yesterday.to_string());

    let pool = seeded_pool().await;
    common::create_test_workout(&pool, common::USER, &yesterday).await;
    common::create_test_workout(&pool, common::USER, &today).await;
    common::log_test_sets(&pool, common::USER, &yesterday, "Squat", &[(100.0, 5)]).await;
    common::log_test_sets(&pool, common::USER, &today, "Squat", &[(105.0, 5)]).await;
    let app = common::create_test_app(pool);

    let (status, last) = common::get(&app, "/api/sets/last?exercise_name=Squat").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(last["date"], yesterday.as_str());
    assert_eq!(last["sets"][0]["weight"], 100.0);
}
