use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sawari_app::RideBoard;
use sawari_client::{ApiClient, Config};
use sawari_core::booking::format_fare;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sawari=info,sawari_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(base_url = %config.api.base_url, "Starting Sawari client");

    let client = ApiClient::new(&config.api).context("Failed to build API client")?;

    let mut board = RideBoard::new();
    board.refresh(&client).await;

    if let Some(notice) = &board.notice {
        tracing::error!("{}", notice.message);
        return Ok(());
    }

    let rides = board.visible();
    if rides.is_empty() {
        tracing::info!("No rides found.");
        return Ok(());
    }

    for ride in rides {
        tracing::info!(
            "{} -> {} on {} at {} | {} seats | Rs {} | {} ({})",
            ride.from,
            ride.to,
            ride.display_date(),
            ride.departure_time,
            ride.seats_available,
            format_fare(ride.fare),
            ride.driver.name,
            ride.status.as_str(),
        );
    }

    Ok(())
}
