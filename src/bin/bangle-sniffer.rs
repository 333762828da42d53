use clap::Parser;
use log::{error, info};
use bangle_sniffer::{init_logging, run};
use bangle_sniffer::config::types::SessionConfig;
use bangle_sniffer::error::AppRunError;

#[derive(Parser, Debug)]
#[command(author, version)]
#[command(about = "Finds a Bangle.js sleep tracker over bluetooth LE and prints its UART notifications for a short while.\n\nSet LOG_LEVEL=debug for more detail and LOG_FILE=<path> to also log to a file.", long_about = None)]
struct Args {}

fn main() -> Result<(), AppRunError> {
    let _args = Args::parse();

    init_logging();
    info!(concat!("Bangle sniffer ", env!("CARGO_PKG_VERSION")));

    match run(SessionConfig::default()) {
        Err(err) => {
            error!("Unexpected error: {}", err);
            Err(err)
        },
        Ok(outcome) => {
            info!("Session ended: {:?}", outcome);
            Ok(())
        },
    }
}
