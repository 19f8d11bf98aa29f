use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryBookingStore, InMemoryListingStore, InMemoryReviewStore};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use stayfinder::config::AppConfig;
use stayfinder::error::AppError;
use stayfinder::marketplace::{BookingService, RandomCodes, ReviewService};
use stayfinder::telemetry;
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

    let listings = Arc::new(InMemoryListingStore::default());
    let bookings = Arc::new(InMemoryBookingStore::default());
    let reviews = Arc::new(InMemoryReviewStore::default());
    let booking_service = Arc::new(BookingService::new(
        listings.clone(),
        bookings.clone(),
        Arc::new(RandomCodes),
    ));
    let review_service = Arc::new(ReviewService::new(bookings, reviews, listings));

    let app = with_marketplace_routes(booking_service, review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "stayfinder marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
