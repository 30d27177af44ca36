use servicehub_core::app::Dashboard;
use servicehub_core::{AppState, Config};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Ensure a directory exists, creating it if necessary.
fn ensure_directory(path: &Path, name: &str) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
        info!("Created {} directory: {:?}", name, path);
        Ok(())
    } else if path.is_dir() {
        Ok(())
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} path {:?} exists but is not a directory", name, path),
        ))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "servicehub=debug,servicehub_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = Config::from_env();
    info!("Loaded configuration: data_dir={:?}", config.data_dir);

    if let Err(e) = ensure_directory(&config.data_dir, "data") {
        warn!("Failed to create data directory {:?}: {}", config.data_dir, e);
    }

    let app = AppState::new(&config);

    // Adopt a remembered identity, if one survived the last run
    match app.session.restore().await {
        Some(identity) => {
            info!(
                "Welcome back, {} ({})",
                identity.display_name, identity.role
            );
        }
        None => {
            info!("No remembered session; signing in with a demo account");
            let email = std::env::var("DEMO_EMAIL").unwrap_or_else(|_| "user@x.com".into());
            let remember = std::env::var("DEMO_REMEMBER")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false);

            let identity = app.login(&email, "demo", remember).await;
            info!(
                "Signed in as {} ({}), remember={}",
                identity.display_name, identity.role, remember
            );
        }
    }

    match app.dashboard().await {
        Some(Dashboard::Admin(overview)) => info!(
            "Admin overview: {} users ({} active), {} active ads",
            overview.users.total, overview.users.active, overview.active_ads
        ),
        Some(Dashboard::Provider(overview)) => info!(
            "Provider overview: {} active ads, {} views, {} pending appointments, {} unread messages",
            overview.stats.active_ads,
            overview.stats.total_views,
            overview.stats.pending_appointments,
            overview.unread_messages
        ),
        Some(Dashboard::Client(overview)) => info!(
            "Client overview: {} services available, {} bookings, {} unread messages",
            overview.available_services, overview.bookings, overview.unread_messages
        ),
        None => warn!("No active session"),
    }

    Ok(())
}
