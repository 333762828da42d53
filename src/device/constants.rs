use uuid::Uuid;

/**
 * How long (milliseconds) to scan for advertising peripherals.
 */
pub const SCAN_TIMEOUT: u64 = 5000;

/**
 * How long (milliseconds) to stay subscribed and print notifications.
 */
pub const LISTEN_DURATION: u64 = 10_000;

/**
 * Case-insensitive substring the advertised name of the target must contain.
 */
pub const TARGET_NAME: &str = "bangle-sleeptracker";

/**
 * The UUID of the Nordic UART service exposed by the Bangle.js Espruino console.
 */
pub const UART_SERVICE: &str = "6e400001-b5a3-f393-e0a9-e50e24dcca9e";

/**
 * The UUID of the Nordic UART TX characteristic. The peripheral sends notifications on it.
 */
pub const UART_TX_CHARACTERISTIC: &str = "6e400003-b5a3-f393-e0a9-e50e24dcca9e";

pub const fn make_uart_service_uuid() -> Uuid {
    Uuid::from_u128(0x6e400001_b5a3_f393_e0a9_e50e24dcca9e)
}

pub const fn make_uart_tx_uuid() -> Uuid {
    Uuid::from_u128(0x6e400003_b5a3_f393_e0a9_e50e24dcca9e)
}
