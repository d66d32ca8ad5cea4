mod args;
mod config;
mod mover;
mod pointer;

pub use args::Args;
pub use config::{
    Config, ConfigError, FileConfig, DEFAULT_DISTANCE, DEFAULT_INTERVAL, MAX_INTERVAL,
};
pub use mover::{MoveSummary, Mover, MoverGone, MoverHandle, MoverState};
pub use pointer::{EnigoPointer, Pointer, PointerError, Position};

use std::io::{stdout, Write};

use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub fn version_text() -> String {
    format!("{NAME} version {VERSION}\nCreated by {AUTHORS}")
}

pub fn banner(config: &Config) -> String {
    let title = format!("=== {NAME} v{VERSION} ===");
    format!(
        "{title}\n\
         Created by {AUTHORS}\n\
         Configuration:\n  \
         - Interval: {} seconds\n  \
         - Distance: {} pixels\n  \
         - Verbose:  {}\n\
         \n\
         Press Ctrl+C to stop\n\
         {}\n",
        config.interval_secs(),
        config.distance(),
        config.verbose(),
        "=".repeat(title.len()),
    )
}

/// Logs go to stderr so progress markers on stdout stay readable.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directive(verbose: bool) -> String {
    if verbose {
        format!("info,{}=debug", env!("CARGO_CRATE_NAME"))
    } else {
        "info".to_owned()
    }
}

/// Ends the line of `.` markers so the shutdown notices start on their own line.
fn finish_progress_line<W: Write>(out: &mut W, config: &Config) {
    if !config.verbose() {
        _ = writeln!(out);
        _ = out.flush();
    }
}

/// Resolves on the first interrupt or termination request.
#[cfg(unix)]
pub async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = interrupt.recv() => {}
        _ = terminate.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
pub async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

pub struct MouseMover<P> {
    config: Config,
    pointer: P,
}

impl<P: Pointer + 'static> MouseMover<P> {
    pub fn new(config: Config, pointer: P) -> Self {
        Self { config, pointer }
    }

    /// Moves the pointer until `shutdown` resolves, then waits for the mover to stop.
    pub async fn main_loop<F>(self, shutdown: F) -> Result<MoveSummary, MoverGone>
    where
        F: std::future::Future<Output = std::io::Result<()>>,
    {
        let local = LocalSet::new();
        local
            .run_until(async move {
                let config = self.config;
                let mover = Mover::new(config, self.pointer, stdout());
                let handle = MoverHandle::spawn(mover);

                if let Err(e) = shutdown.await {
                    tracing::error!("Cannot listen for shutdown signals: {e}");
                }
                finish_progress_line(&mut stdout(), &config);
                tracing::info!("Shutting down gracefully...");

                let summary = handle.shutdown().await?;
                tracing::info!("Shutdown complete");
                Ok::<_, MoverGone>(summary)
            })
            .await
    }
}
