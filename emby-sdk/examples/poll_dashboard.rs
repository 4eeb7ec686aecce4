//! Print players and latest items every few seconds until Ctrl+C
//!
//! ```bash
//! EMBY_HOST=192.168.1.20 EMBY_API_KEY=... EMBY_USER_ID=... EMBY_LOG_MODE=dev \
//!     cargo run -p emby-sdk --example poll_dashboard
//! ```

use std::time::Duration;

use emby_sdk::logging::init_logging_from_env;
use emby_sdk::{EmbyConfig, EmbySystem, Pollable};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_from_env()?;

    let config = EmbyConfig::from_env()?;
    let system = EmbySystem::connect(config).await?;
    system.start_polling();

    let mut ticker = tokio::time::interval(Duration::from_secs(5));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => print_dashboard(&system),
        }
    }

    println!("Shutting down...");
    system.shutdown().await?;
    Ok(())
}

fn print_dashboard(system: &EmbySystem) {
    println!("=== Players ===");
    if system.players().is_empty() {
        println!("  (no sessions at startup)");
    }
    for player in system.players() {
        println!(
            "  {:<30} {:<8} {}",
            player.name(),
            player.state(),
            player.media_title()
        );
    }

    println!("=== Latest ===");
    for sensor in system.sensors() {
        let attributes = sensor.attributes();
        println!(
            "  {:<22} {} ({})",
            sensor.name(),
            sensor.state(),
            attributes.library.as_deref().unwrap_or("-")
        );
    }

    if !system.sessions().last_update_success() {
        println!(
            "  last sessions poll failed: {}",
            system.sessions().last_error().unwrap_or_default()
        );
    }
    println!();
}
