use std::env;
use log::{info, LevelFilter};
use tokio_util::sync::CancellationToken;

use crate::config::types::SessionConfig;
use crate::device::connection::BtleStack;
use crate::device::session::{run_session, ConsoleSink, SessionOutcome};
use crate::error::AppRunError;

pub mod config;
pub mod device;
pub mod error;

pub fn init_logging() {
    let level = env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Ok(log_file) = env::var("LOG_FILE") {
        dispatch = dispatch.chain(
            fern::log_file(log_file).expect("Failed to open LOG_FILE")
        );
    }

    dispatch.apply().expect("Failed to initialize logger");
}

/// Runs one session against the platform bluetooth stack on a single-threaded runtime.
/// Ctrl-C ends the session early; an open connection is still released.
pub fn run(config: SessionConfig) -> Result<SessionOutcome, AppRunError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let outcome = runtime.block_on(async move {
        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted");
                interrupt.cancel();
            }
        });

        let stack = BtleStack::new().await?;
        run_session(&stack, &config, cancel, &mut ConsoleSink).await
    })?;

    Ok(outcome)
}
