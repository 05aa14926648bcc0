//! Server binary: loads settings, prepares the store, serves the API.

use pharmacy_inventory::{
    app, apply_migrations, connect, ensure_database_exists, telemetry, AppState, PgStore, Settings,
    StoreBackend,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    telemetry::init_tracing(settings.log_format);

    let state = match settings.store {
        StoreBackend::Postgres => {
            if settings.create_database {
                ensure_database_exists(&settings.database_url).await?;
            }
            let pool = connect(&settings).await?;
            apply_migrations(&pool, &settings.schema).await?;
            AppState::postgres(PgStore::new(pool, &settings.schema), &settings.application_name)
        }
        StoreBackend::Memory => {
            tracing::info!("using in-memory store");
            AppState::in_memory(&settings.application_name)
        }
    };

    let router = app(state, settings.body_limit_bytes);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
