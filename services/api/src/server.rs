use crate::cli::ServeArgs;
use crate::infra::{catalog_source, AppState};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bestfavour::catalog::CatalogService;
use bestfavour::config::AppConfig;
use bestfavour::error::AppError;
use bestfavour::onboarding::{InMemoryDraftRepository, OnboardingService};
use bestfavour::session::{preference_store, SessionStore};
use bestfavour::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = catalog_source(None, &config.catalog);
    let listings = source.fetch()?;
    info!(count = listings.len(), source = %source.describe(), "listing catalog loaded");
    let catalog = Arc::new(CatalogService::new(listings));

    let repository = Arc::new(InMemoryDraftRepository::default());
    let onboarding = Arc::new(OnboardingService::new(repository));

    let session = Arc::new(SessionStore::initialize(preference_store(
        &config.preferences,
    ))?);
    let mut session_changes = session.subscribe();
    tokio::spawn(async move {
        while session_changes.changed().await.is_ok() {
            let state = session_changes.borrow_and_update().clone();
            info!(
                dark_mode = state.dark_mode,
                authenticated = state.is_authenticated(),
                "session settings changed"
            );
        }
    });

    let app = with_marketplace_routes(catalog, onboarding, session)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "marketplace service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
