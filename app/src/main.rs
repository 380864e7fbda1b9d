//! Dashboard binary
//!
//! Mounts one route and prints what the view would display.
//!
//! ```text
//! ans-dashboard [PATH]
//! ```
//!
//! `PATH` defaults to `/`. Configuration comes from `ANS_DASHBOARD_*`
//! environment variables; logging honours `RUST_LOG`.

use ans_dashboard::{App, DashboardConfig};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env().context("Invalid configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());

    let app = App::bootstrap(config).context("Failed to bootstrap dashboard")?;
    let mounted = app
        .mount(&path)
        .await
        .with_context(|| format!("Failed to mount {path}"))?;

    if let Some(error) = mounted.snapshot.get("error").and_then(|e| e.as_str()) {
        tracing::warn!(%error, "View loaded with an error");
    }

    println!("{}", serde_json::to_string_pretty(&mounted)?);
    Ok(())
}
