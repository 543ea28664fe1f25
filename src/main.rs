//! Server: reads settings from env (and `.env`), prepares the database, serves the catalog.

use cat_catalog::{
    app, connect, ensure_catalog_tables, ensure_database_exists, seed::seed_demo, AppState, PgCatalogStore, Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cat_catalog=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database.connect_options()?).await?;
    let pool = connect(&settings.database).await?;
    ensure_catalog_tables(&pool).await?;

    let state = AppState::new(Arc::new(PgCatalogStore::new(pool)));
    if settings.seed_demo && seed_demo(&state.catalog).await? {
        tracing::info!("demo data seeded");
    }

    let router = app(state, &settings.url_prefix);
    let listener = TcpListener::bind(&settings.bind).await?;
    tracing::info!(prefix = %settings.url_prefix, "listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
