use std::net::SocketAddr;

use hotelboard::config::AppConfig;
use hotelboard::AppState;
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotelboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = AppState::new(config)?;
    match state.booking_poller() {
        Some(poller) => {
            poller.spawn();
        }
        None => tracing::info!("Booking poller disabled: GRAPHQL_SERVICE_TOKEN or HOTEL_ID not set"),
    }

    let app = hotelboard::build_router(state)?;

    tracing::info!(host = %addr, "Starting hotelboard server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
