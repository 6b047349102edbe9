use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gymlog::config::Config;
use gymlog::handlers::{body_parts, exercises, sets, workout_sets, workouts};
use gymlog::repositories::{
    BodyPartRepository, ExerciseRepository, SetRepository, WorkoutRepository,
    WorkoutSetRepository,
};
use gymlog::version::GIT_VERSION;
use gymlog::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gymlog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing::info!("gymlog {}", GIT_VERSION);
    tracing::info!("Connecting to database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;

    // Create handler states
    let body_parts_state = body_parts::BodyPartsState {
        body_part_repo: BodyPartRepository::new(pool.clone()),
    };
    let exercises_state = exercises::ExercisesState {
        exercise_repo: ExerciseRepository::new(pool.clone()),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: WorkoutRepository::new(pool.clone()),
    };
    let workout_sets_state = workout_sets::WorkoutSetsState {
        workout_set_repo: WorkoutSetRepository::new(pool.clone()),
    };
    let sets_state = sets::SetsState {
        set_repo: SetRepository::new(pool),
    };

    let app = routes::create_router(
        body_parts_state,
        exercises_state,
        workouts_state,
        workout_sets_state,
        sets_state,
    );

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
