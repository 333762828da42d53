use std::io;
use thiserror::Error;
use btleplug;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Error communicating with device (btleplug): {source}")]
    Btle { #[from] source: btleplug::Error },

    #[error("No bluetooth adapter is available")]
    NoAdapter,

    #[error("Peripheral {0} was not seen during the scan")]
    UnknownPeripheral(String),

    #[error("A required bluetooth characteristic is not available")]
    MissingCharacteristic,
}

#[derive(Error, Debug)]
pub enum AppRunError {
    #[error("Failed to start async runtime: {source}")]
    Runtime { #[from] source: io::Error },

    #[error("Bluetooth session failed: {source}")]
    Device { #[from] source: DeviceError },
}
