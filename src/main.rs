use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use announcements_api::{
    config::{Config, StoreBackend},
    db::{self, announcements::PgAnnouncementStore, memory, teachers::PgCredentialGate},
    ports::{AnnouncementStore, CredentialGate, SystemClock},
    routes,
    services::{announcements::AnnouncementService, metrics},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let (store, gate): (Arc<dyn AnnouncementStore>, Arc<dyn CredentialGate>) =
        match (config.store_backend, config.database_url.as_deref()) {
            (StoreBackend::Postgres, Some(url)) => {
                let pool = db::create_pool(url).await?;
                db::run_migrations(&pool).await?;
                info!("Database connected and migrations applied");
                let store: Arc<dyn AnnouncementStore> =
                    Arc::new(PgAnnouncementStore::new(pool.clone()));
                let gate: Arc<dyn CredentialGate> = Arc::new(PgCredentialGate::new(pool));
                (store, gate)
            }
            (StoreBackend::Postgres, None) => {
                anyhow::bail!("DATABASE_URL is required for postgres")
            }
            (StoreBackend::Memory, _) => {
                info!(
                    teachers = config.known_teachers.len(),
                    "Using in-memory store, announcements are lost on restart"
                );
                let store: Arc<dyn AnnouncementStore> =
                    Arc::new(memory::MemoryAnnouncementStore::default());
                let gate: Arc<dyn CredentialGate> = Arc::new(memory::StaticCredentialGate::new(
                    config.known_teachers.iter().cloned(),
                ));
                (store, gate)
            }
        };

    let announcements = Arc::new(AnnouncementService::new(store, gate, Arc::new(SystemClock)));
    metrics::start(announcements.clone(), config.metrics_interval_secs);

    let state = AppState {
        announcements,
        config: config.clone(),
    };

    // Allow the configured front-end origin, plus localhost for development.
    let base = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_origin(cors_origin);

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Announcements API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
