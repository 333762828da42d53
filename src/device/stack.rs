use std::time::Duration;
use async_trait::async_trait;
use futures::stream::BoxStream;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::device::types::DiscoveredDevice;
use crate::error::DeviceError;

/// Payloads of the notifications received on one characteristic, in arrival order.
pub type NotificationStream = BoxStream<'static, Vec<u8>>;

/// The host side of the bluetooth stack: scanning and opening connections.
#[async_trait]
pub trait BleStack: Send + Sync {
    type Connection: BleConnection;

    /// Scans for advertising peripherals for `timeout` and returns everything seen.
    /// Stops early when `cancel` fires; scanning is stopped on every path.
    async fn discover(&self, timeout: Duration, cancel: &CancellationToken) -> Result<Vec<DiscoveredDevice>, DeviceError>;

    async fn connect(&self, address: &str) -> Result<Self::Connection, DeviceError>;
}

/// An open connection to a single peripheral. Must be released with [`BleConnection::close`].
#[async_trait]
pub trait BleConnection: Send {
    async fn subscribe(&mut self, characteristic: Uuid) -> Result<NotificationStream, DeviceError>;

    async fn unsubscribe(&mut self, characteristic: Uuid) -> Result<(), DeviceError>;

    async fn close(&mut self) -> Result<(), DeviceError>;
}
