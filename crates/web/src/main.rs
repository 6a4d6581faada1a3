use std::sync::Arc;

use anyhow::Context;
use storage::{AdminKeys, DiskMediaStore, RecordStore};
use utoipa::OpenApi;

mod app;
mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use features::{admin, exercises, explanations, health, uploads};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        exercises::handlers::list_exercises,
        exercises::handlers::get_exercise,
        exercises::handlers::create_exercise,
        exercises::handlers::update_exercise,
        exercises::handlers::delete_exercise,
        exercises::handlers::toggle_visibility,
        explanations::handlers::list_blocks,
        explanations::handlers::append_block,
        explanations::handlers::update_block,
        explanations::handlers::delete_block,
        uploads::handlers::upload_file,
        admin::handlers::login,
        health::handlers::health,
    ),
    components(
        schemas(
            storage::models::ExerciseRecord,
            storage::models::ExplanationBlock,
            storage::models::BlockType,
            storage::dto::exercise::CreateExerciseRequest,
            storage::dto::exercise::UpdateExerciseRequest,
            storage::dto::exercise::VisibilityResponse,
            storage::dto::explanation::CreateExplanationBlockRequest,
            storage::dto::explanation::UpdateExplanationBlockRequest,
            storage::dto::explanation::BlockIndexResponse,
            storage::dto::admin::LoginRequest,
            storage::dto::admin::LoginResponse,
            storage::dto::admin::UploadResponse,
            uploads::handlers::UploadForm,
        )
    ),
    tags(
        (name = "exercises", description = "Exercise catalog endpoints"),
        (name = "explanations", description = "Detailed explanation blocks of an exercise"),
        (name = "uploads", description = "Media uploads for the explanation editor"),
        (name = "admin", description = "Admin password check"),
        (name = "health", description = "Liveness check"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Admin password")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting exercise catalog API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let records = RecordStore::new(&config.data_file);
    records
        .initialize()
        .await
        .context("Failed to initialize data file")?;
    tracing::info!("Using data file {}", records.path().display());

    let media = DiskMediaStore::new(config.upload_dir.join("videos"));
    media
        .ensure_dir()
        .await
        .context("Failed to create upload directory")?;
    tracing::info!("Upload folder ready: {}", media.base_path().display());

    let admin_keys = AdminKeys::from_comma_separated(&config.admin_password);
    if admin_keys.is_empty() {
        tracing::warn!("No ADMIN_PASSWORD configured; every write request will be rejected");
    }

    let state = AppState::new(records, Arc::new(media), admin_keys);
    let app = app::build_router(state, config.upload_dir.clone(), config.max_upload_bytes);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
