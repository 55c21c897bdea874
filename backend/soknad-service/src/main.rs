use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use soknad_service::config::Config;
use soknad_service::domain::SystemClock;
use soknad_service::handlers::health;
use soknad_service::kafka::SoknadConsumer;
use soknad_service::metrics::{self, SoknadMetrics};
use soknad_service::repository::PostgresSoknadRepository;
use soknad_service::services::{SoknadIngestor, SoknadRouter};
use soknad_service::state::ApplicationState;
use soknad_service::{db, logging};
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    info!("Starting soknad-service");

    let config = Config::from_env().context("Failed to load configuration")?;
    let policy = config.app.decode_error_policy();

    info!(
        cluster = %config.app.cluster_name,
        policy = ?policy,
        topic = %config.kafka.soknad_topic,
        "Configuration loaded"
    );

    let pool = db::create_pool(&config.database)
        .await
        .context("Failed to connect to PostgreSQL")?;
    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let state = ApplicationState::new();
    let repository = PostgresSoknadRepository::new(pool);

    let router = SoknadRouter::new(
        Arc::new(repository.clone()),
        Arc::new(SystemClock),
        SoknadMetrics::new(),
    );
    let ingestor = SoknadIngestor::new(router, policy);
    let consumer = SoknadConsumer::new(config.kafka.clone(), ingestor);

    let consumer_handle = tokio::spawn(consumer.run());
    let consumer_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = consumer_handle.await {
            error!("Søknad consumer task stopped: {}", e);
        }
        consumer_state.set_alive(false);
    });

    state.set_ready(true);

    let addr = format!("0.0.0.0:{}", config.app.http_port);
    info!("Starting HTTP server on {}", addr);

    let http_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(http_state.clone()))
            .app_data(web::Data::new(repository.clone()))
            .wrap(middleware::Logger::default())
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .configure(health::register_routes)
    })
    .bind(&addr)
    .with_context(|| format!("Failed to bind HTTP server to {}", addr))?
    .run()
    .await
    .context("HTTP server failed")?;

    state.set_ready(false);
    info!("soknad-service stopped");
    Ok(())
}
