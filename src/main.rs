use anyhow::{Context, Result};
use std::sync::Arc;

use profile_onboarding::services::{MemoryUserStore, PgUserStore, UploadStore, UserStore};
use profile_onboarding::{app, config, db, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting profile onboarding service"
    );

    let store: Arc<dyn UserStore> = match &settings.database_url {
        Some(url) => {
            let pool = db::create_pool(url, &settings).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgUserStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set - users are kept in memory and lost on restart");
            Arc::new(MemoryUserStore::new())
        }
    };

    let uploads = UploadStore::new(&settings.upload_dir);
    uploads
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create upload dir {}", settings.upload_dir.display()))?;

    let state = app::AppState::new(store, uploads, settings.clone());
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
