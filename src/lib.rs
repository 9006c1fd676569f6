pub mod config;
pub mod errors;
pub mod graphql;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, patch, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use errors::AppError;
use graphql::GraphqlClient;
use middleware::guard::RouteRules;
use services::booking_watch::{BookingPoller, BookingWatch};
use services::dashboard::DashboardCache;

/// Largest request body accepted by the API.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub graphql: GraphqlClient,
    pub dashboard_cache: Arc<DashboardCache>,
    pub booking_watch: BookingWatch,
    pub route_rules: Arc<RouteRules>,
}

impl AppState {
    pub fn new(config: config::AppConfig) -> Result<Self, AppError> {
        let graphql = GraphqlClient::new(&config.graphql_url, config.graphql_timeout_secs)?;
        let booking_watch = BookingWatch::new(
            config.graphql_service_token.is_some() && config.hotel_id.is_some(),
            config.booking_poll_auto_refresh,
        );
        Ok(Self {
            config,
            graphql,
            dashboard_cache: Arc::new(DashboardCache::new()),
            booking_watch,
            route_rules: Arc::new(RouteRules::default()),
        })
    }

    /// Hotel for this request, or a validation error when none is known.
    pub fn require_hotel_id(&self, requested: Option<&str>) -> Result<String, AppError> {
        self.config
            .resolve_hotel_id(requested)
            .ok_or_else(|| AppError::Validation("hotel_id is required".to_string()))
    }

    /// Poller for new bookings, when a service token and default hotel are configured.
    pub fn booking_poller(&self) -> Option<BookingPoller> {
        let token = self.config.graphql_service_token.clone()?;
        let hotel_id = self.config.hotel_id.clone()?;
        Some(BookingPoller {
            watch: self.booking_watch.clone(),
            client: self.graphql.clone(),
            cache: self.dashboard_cache.clone(),
            token,
            hotel_id,
            interval: Duration::from_secs(self.config.booking_poll_interval_secs.max(1)),
        })
    }
}

/// Build the full router: API, health probes and the guarded front end.
pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let origin: HeaderValue = state
        .config
        .frontend_url
        .parse()
        .map_err(|e| AppError::Internal(format!("Invalid FRONTEND_URL: {e}")))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let api = Router::new()
        .route("/session", get(routes::session::me))
        .route("/dashboard", get(routes::dashboard::analytics))
        .route("/hotel", get(routes::hotel::hotel))
        .route("/rooms", get(routes::hotel::rooms))
        .route("/bookings", get(routes::bookings::list))
        .route("/bookings/{id}", get(routes::bookings::get_by_id))
        .route("/bookings/{id}/status", patch(routes::bookings::update_status))
        .route("/bookings/{id}/extend", post(routes::bookings::extend_stay))
        .route("/bookings/{id}/payments", post(routes::bookings::collect_payment))
        .route("/bookings/{id}/charges", post(routes::bookings::add_room_charge))
        .route(
            "/notifications/bookings",
            get(routes::notifications::booking_status),
        )
        .route(
            "/notifications/bookings/ack",
            post(routes::notifications::acknowledge),
        );

    let static_dir = state.config.static_dir.clone();
    let front_end =
        ServeDir::new(&static_dir).fallback(ServeFile::new(format!("{static_dir}/index.html")));

    let router = Router::new()
        .route("/health/live", get(routes::health::live))
        .route("/health/ready", get(routes::health::ready))
        .nest("/api/v1", api)
        .fallback_service(front_end)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::guard::access_guard,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(cors),
        )
        .with_state(state);

    Ok(router)
}
