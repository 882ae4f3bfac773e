//! Basic usage of the orchestrator
//!
//! Discovers devices (or takes an address argument), selects one, nudges
//! the volume and prints playback changes for a few seconds.
//!
//! Run with: cargo run -p beo-sdk --example basic_control -- [address]

use std::time::Duration;

use beo_sdk::prelude::*;

#[tokio::main]
async fn main() -> Result<(), SdkError> {
    beo_sdk::logging::init_logging_from_env()?;

    println!("Beo SDK - Basic Control Example");
    println!("===============================");

    let orchestrator = Orchestrator::builder()
        .with_config(SdkConfig::from_env()?)
        .build();

    let device = match std::env::args().nth(1) {
        Some(address) => orchestrator.add_device("Command line", &address).await?,
        None => {
            println!("Discovering devices...");
            let found = orchestrator.discover().await;
            let Some(first) = found.first() else {
                println!("No devices found; pass an address to connect directly");
                return Ok(());
            };
            println!("Found {} device(s)", found.len());
            orchestrator.add_discovered(first).await?
        }
    };

    let selected = orchestrator
        .selected_device()
        .ok_or(SdkError::NoDeviceSelected)?;
    println!("\nUsing {} at {} (online: {})", device.display_name, device.address, selected.online);
    if !selected.online {
        println!("Device is not reachable");
        return Ok(());
    }

    for source in orchestrator.sources() {
        println!("   source: {} ({})", source.display_name, source.id);
    }

    let mut notices = orchestrator.subscribe_notices();
    tokio::spawn(async move {
        while let Ok(notice) = notices.recv().await {
            println!("   notice: {notice}");
        }
    });

    if let Some(state) = orchestrator.playback() {
        let level = state.volume.saturating_add(5);
        println!("\nVolume {} -> {}", state.volume, level);
        if let Err(e) = orchestrator.set_volume(level).await {
            println!("   volume change failed: {e}");
        }
    }

    let Some(mut playback) = orchestrator.watch_playback() else {
        return Ok(());
    };
    println!("\nWatching playback for 10 seconds...");
    let watch = async {
        while playback.changed().await.is_ok() {
            let state = playback.borrow_and_update().clone();
            let title = state
                .current_track
                .as_ref()
                .map(|t| t.title.as_str())
                .unwrap_or("-");
            println!(
                "   {} | {} | {}s | vol {} | {}",
                state.play_state, title, state.progress_secs, state.volume, state.play_mode
            );
        }
    };
    let _ = tokio::time::timeout(Duration::from_secs(10), watch).await;

    orchestrator.shutdown().await;
    println!("\nDone");
    Ok(())
}
