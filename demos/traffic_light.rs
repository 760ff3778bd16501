//! Traffic Light Demo
//!
//! Runs the signal on a fast cadence for a few cycles, then stops it and
//! prints the committed history.
//!
//! Key concepts:
//! - Cyclic state transitions (no final state)
//! - Every step waits on an async approval gate
//! - Start/stop lifecycle around a recurring timer
//!
//! Run with: cargo run --example traffic_light

use signal_light::config::SignalConfig;
use signal_light::presentation::TerminalPresentation;
use signal_light::SignalController;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== Traffic Light State Machine ===\n");

    let config = SignalConfig::default()
        .with_tick_interval(Duration::from_millis(500))
        .with_approval_delay(Duration::from_millis(100));

    let controller = SignalController::builder()
        .config(config)
        .presentation(TerminalPresentation::new())
        .build()?;

    controller.start();
    // Second start is a no-op
    controller.start();

    tokio::time::sleep(Duration::from_millis(3_200)).await;

    controller.stop();
    // Already stopped, only logs
    controller.stop();
    controller.wait_idle().await;

    println!("\nTransition history:");
    for transition in controller.history().transitions() {
        println!(
            "  #{} {} -> {} at {}",
            transition.attempt,
            transition.from,
            transition.to,
            transition.timestamp.format("%H:%M:%S%.3f")
        );
    }
    println!("\nFinal state: {}", controller.state());

    println!("\n=== Example Complete ===");
    Ok(())
}
