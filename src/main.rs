use anyhow::Context;
use feedback_api::configuration::{get_configuration, StoreBackend};
use feedback_api::db::{FeedbackStore, InMemoryFeedbackStore, PgFeedbackStore};
use feedback_api::services::FeedbackService;
use feedback_api::startup::run;
use feedback_api::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("feedback-api".into(), "info".into());
    init_subscriber(subscriber)?;

    let settings = get_configuration().context("Failed to read configuration.")?;

    let store: Arc<dyn FeedbackStore> = match settings.store {
        StoreBackend::Postgres => {
            tracing::info!(
                db_host = %settings.database.host,
                db_port = settings.database.port,
                db_name = %settings.database.database_name,
                "Connecting to PostgreSQL"
            );
            let store = PgFeedbackStore::connect(&settings.database)
                .await
                .context("Failed to connect to database.")?;
            store.migrate().await.context("Failed to migrate database.")?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store, records are lost on exit");
            Arc::new(InMemoryFeedbackStore::new())
        }
    };

    let service = FeedbackService::new(store.clone(), settings.listing.clone());

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind to {}", address))?;

    let served = run(listener, service)?.await;
    store.close().await;

    Ok(served?)
}
