use backend::{
    cors::{Cors, DEFAULT_CLIENT_ORIGIN},
    routes::AppState,
    server::build_rocket,
};
use shared::PhotoCatalog;
use shuttle_runtime::CustomError;
use sqlx::PgPool;
use tracing::{info, warn};
use include_dir::{include_dir, Dir};
use uuid::Uuid;

static STATIC_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secret_store: shuttle_runtime::SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    info!("🔭 Starting photo contest server");

    let client_origin = secret_store.get("CLIENT_ORIGIN").unwrap_or_else(|| {
        warn!("CLIENT_ORIGIN not set - allowing {}", DEFAULT_CLIENT_ORIGIN);
        DEFAULT_CLIENT_ORIGIN.to_string()
    });

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(CustomError::new)?;

    info!("📋 Migrations complete");

    let catalog = PhotoCatalog::seeded().map_err(CustomError::new)?;
    info!("📸 Loaded {} contest photos", catalog.len());

    let static_dir = std::env::temp_dir().join(format!("photo_contest_static_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&static_dir).map_err(CustomError::new)?;
    STATIC_DIR.extract(&static_dir).map_err(CustomError::new)?;

    let rocket = build_rocket(AppState::new(pool, catalog), Cors::new(client_origin), static_dir);

    Ok(rocket.into())
}
