use anyhow::Context;
use signal_light::presentation::TerminalPresentation;
use signal_light::{SignalConfig, SignalController, StopListener, StopReason};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("{err:#}");
            1
        }
    };
    // The stdin reader parks a blocking thread that runtime shutdown would wait on.
    std::process::exit(code);
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("signal_light=info")),
        )
        .with_target(false)
        .init();

    let controller = SignalController::builder()
        .config(SignalConfig::default())
        .presentation(TerminalPresentation::new())
        .build()
        .context("failed to build signal controller")?;

    controller.start();
    tracing::info!("press 's' then Enter to stop, Ctrl-C to exit");

    let listener = StopListener::new(controller.clone());
    let stdin = BufReader::new(tokio::io::stdin());

    tokio::select! {
        reason = listener.listen(stdin) => {
            if reason.context("failed to read operator input")? == StopReason::InputClosed {
                tracing::info!("operator input closed, waiting for Ctrl-C");
                tokio::signal::ctrl_c().await?;
                controller.stop();
            }
        }
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl-C")?;
            controller.stop();
        }
    }

    // A transition already waiting on approval still gets to commit.
    controller.wait_idle().await;
    tracing::info!(state = %controller.state(), "signal-light exiting");
    Ok(())
}
