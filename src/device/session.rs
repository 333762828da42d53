use futures::StreamExt;
use log::{debug, info, warn};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::config::types::SessionConfig;
use crate::device::decode::decode_notification;
use crate::device::selection::select_target;
use crate::device::stack::{BleConnection, BleStack};
use crate::device::types::SessionEvent;
use crate::error::DeviceError;

/// Receives the events of a session as they happen.
pub trait EventSink {
    fn emit(&mut self, event: SessionEvent);
}

/// Prints every event as one line on stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: SessionEvent) {
        println!("{}", event);
    }
}

impl EventSink for Vec<SessionEvent> {
    fn emit(&mut self, event: SessionEvent) {
        self.push(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// No advertised name matched; nothing was connected.
    NotFound,
    /// Interrupted while scanning; nothing was connected.
    Cancelled,
    /// Listened and disconnected. Counts the notifications received.
    Finished { notifications: usize },
}

/// Scans, connects to the first matching peripheral, prints its notifications for
/// `config.listen_for` and disconnects.
///
/// Once connected the connection is always closed before returning, also when
/// subscribing fails or `cancel` fires.
pub async fn run_session<S: BleStack>(
    stack: &S,
    config: &SessionConfig,
    cancel: CancellationToken,
    sink: &mut impl EventSink,
) -> Result<SessionOutcome, DeviceError> {
    sink.emit(SessionEvent::Scanning);

    let devices = stack.discover(config.scan_timeout, &cancel).await?;
    if cancel.is_cancelled() {
        return Ok(SessionOutcome::Cancelled);
    }
    debug!("Scan returned {} peripheral(s)", devices.len());

    let target = match select_target(&devices, &config.target_name) {
        None => {
            sink.emit(SessionEvent::NotFound);
            return Ok(SessionOutcome::NotFound);
        },
        Some(target) => target.clone(),
    };
    sink.emit(SessionEvent::Found(target.clone()));

    let mut connection = stack.connect(&target.address).await?;
    sink.emit(SessionEvent::Connected);

    let listened = listen(&mut connection, config, &cancel, sink).await;
    let closed = connection.close().await;

    let notifications = listened?;
    closed?;

    info!("Disconnected from {}", target.address);
    sink.emit(SessionEvent::Done);
    Ok(SessionOutcome::Finished { notifications })
}

async fn listen<C: BleConnection>(
    connection: &mut C,
    config: &SessionConfig,
    cancel: &CancellationToken,
    sink: &mut impl EventSink,
) -> Result<usize, DeviceError> {
    let mut notifications = connection.subscribe(config.characteristic).await?;
    sink.emit(SessionEvent::Listening(config.listen_for));

    let deadline = sleep(config.listen_for);
    tokio::pin!(deadline);

    let mut received = 0;
    let mut stream_open = true;

    'mainloop: loop {
        tokio::select! {
            _ = &mut deadline => {
                break 'mainloop;
            },
            _ = cancel.cancelled() => {
                info!("Listening cancelled");
                break 'mainloop;
            },
            data = notifications.next(), if stream_open => match data {
                Some(data) => {
                    received += 1;
                    debug!("Notification #{} ({} bytes)", received, data.len());

                    for line in decode_notification(&data) {
                        sink.emit(SessionEvent::Line(line));
                    }
                },
                None => {
                    warn!("Notification stream ended before the listening window closed");
                    stream_open = false;
                },
            },
        }
    }

    drop(notifications);
    connection.unsubscribe(config.characteristic).await?;
    Ok(received)
}
