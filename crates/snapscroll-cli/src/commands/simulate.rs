use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tracing::info;

use snapscroll_core::timing::Clock;
use snapscroll_core::{
    AppConfig, DriverEvent, HostSignal, MemoryHost, ScrollHost, ScrollInput, SnapCommand,
    SnapController, SnapDriver,
};

/// Viewport height used when `ui.viewport_rows` is not set
const DEFAULT_VIEWPORT_ROWS: u16 = 20;

pub async fn run(config: &AppConfig, inputs: &[f64], interval_ms: u64, json: bool) -> Result<()> {
    let rows = if config.ui.viewport_rows > 0 {
        config.ui.viewport_rows
    } else {
        DEFAULT_VIEWPORT_ROWS
    };
    let host = MemoryHost::from_config(config, rows as f64).with_clock(Clock::monotonic());
    let controller = SnapController::new(config.demo_snap_config(), host)?;

    let (signal_tx, signal_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<DriverEvent>();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Setup signal handler for early shutdown
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let frame_interval = config.ui.animation_tick_duration();
    let driver = SnapDriver::new(controller)
        .with_frame_interval(frame_interval)
        .with_event_sender(event_tx);
    let driver_handle = tokio::spawn(driver.run(signal_rx, shutdown_rx));

    // Print events as they arrive; the channel closes when the driver stops
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event, json)?;
        }
        anyhow::Ok(())
    });

    info!(inputs = inputs.len(), interval_ms, "Replaying scroll input");
    signal_tx.send(HostSignal::Command(SnapCommand::Register))?;
    for &delta in inputs {
        tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        signal_tx.send(HostSignal::Input(ScrollInput::Wheel { delta }))?;
    }

    // Give the last snap time to settle before closing the signal channel
    let settle_ms = config
        .snap
        .snap_duration_ms
        .max(config.snap.initial_snap_duration_ms);
    tokio::time::sleep(Duration::from_millis(settle_ms) + frame_interval * 4).await;
    drop(signal_tx);

    let controller = driver_handle.await?;
    printer.await??;

    let state = controller.state();
    let section_id = controller
        .sections()
        .get(state.current_section_index)
        .map(|s| s.id.as_str())
        .unwrap_or("-");
    let offset = controller.host().scroll_offset();

    if json {
        let summary = serde_json::json!({
            "event": "final",
            "index": state.current_section_index,
            "section": section_id,
            "offset": offset,
            "direction": state.scroll_direction,
            "easing": state.easing_preset,
            "duration_ms": state.snap_duration_ms,
        });
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "final    section {} ({}) at offset {}, last direction {}",
            state.current_section_index, section_id, offset, state.scroll_direction
        );
    }

    Ok(())
}

fn print_event(event: &DriverEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    match event {
        DriverEvent::Snapped { from, to, direction } => {
            println!("snap     {} -> {} ({})", from, to, direction);
        }
        DriverEvent::Settled { index, offset } => {
            println!("settled  section {} at offset {}", index, offset);
        }
        DriverEvent::CommandFailed { command, message } => {
            println!("failed   {}: {}", command, message);
        }
    }
    Ok(())
}
