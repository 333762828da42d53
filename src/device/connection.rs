use std::collections::HashMap;
use std::sync::Mutex;
use async_trait::async_trait;
use futures::{future, StreamExt};
use btleplug::api::{BDAddr, Central, Characteristic, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, Peripheral};
use log::{debug, info, warn};
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::device::constants::make_uart_service_uuid;
use crate::device::stack::{BleConnection, BleStack, NotificationStream};
use crate::device::types::DiscoveredDevice;
use crate::error::DeviceError;

/// [`BleStack`] backed by the platform bluetooth stack through btleplug.
pub struct BtleStack {
    manager: Manager,
    // peripherals seen by the last scan, keyed by the address handed out in DiscoveredDevice
    peripherals: Mutex<HashMap<String, Peripheral>>,
}

impl BtleStack {
    pub async fn new() -> Result<Self, DeviceError> {
        Ok(BtleStack {
            manager: Manager::new().await?,
            peripherals: Mutex::new(HashMap::new()),
        })
    }
}

fn peripheral_address(peripheral: &Peripheral, address: BDAddr) -> String {
    // macOS does not expose MAC addresses, only an opaque per-host identifier
    if address.into_inner() == [0u8; 6] {
        format!("{:?}", peripheral.id())
    } else {
        address.to_string()
    }
}

async fn stop_scanning(adapters: &[Adapter]) {
    for adapter in adapters {
        if let Err(err) = adapter.stop_scan().await {
            warn!("Failed to stop scanning: {:?}", err);
        }
    }
}

#[async_trait]
impl BleStack for BtleStack {
    type Connection = BtleConnection;

    async fn discover(&self, timeout: Duration, cancel: &CancellationToken) -> Result<Vec<DiscoveredDevice>, DeviceError> {
        let adapters = self.manager.adapters().await?;
        if adapters.is_empty() {
            return Err(DeviceError::NoAdapter);
        }

        for (started, adapter) in adapters.iter().enumerate() {
            info!("Scanning using adapter {}...", adapter.adapter_info().await.unwrap_or("UNKNOWN".to_string()));
            if let Err(err) = adapter.start_scan(ScanFilter::default()).await {
                stop_scanning(&adapters[..started]).await;
                return Err(err.into());
            }
        }

        tokio::select! {
            _ = sleep(timeout) => {},
            _ = cancel.cancelled() => {
                info!("Scan cancelled");
                stop_scanning(&adapters).await;
                return Ok(Vec::new());
            },
        }

        let mut devices = Vec::new();
        let mut seen = HashMap::new();

        for adapter in &adapters {
            adapter.stop_scan().await?;

            for peripheral in adapter.peripherals().await? {
                match peripheral.properties().await {
                    Err(err) => {
                        warn!("Could not query peripheral for properties: {:?}", err);
                    },
                    Ok(None) => {
                        warn!("Peripheral has no properties");
                    },
                    Ok(Some(properties)) => {
                        let address = peripheral_address(&peripheral, properties.address);
                        debug!(
                            "Seen peripheral {} {} rssi={:?}",
                            address,
                            properties.local_name.as_deref().unwrap_or("NONE"),
                            properties.rssi,
                        );

                        devices.push(DiscoveredDevice {
                            address: address.clone(),
                            name: properties.local_name,
                        });
                        seen.insert(address, peripheral);
                    },
                }
            }
        }

        *self.peripherals.lock().expect("Failed to lock peripherals") = seen;
        Ok(devices)
    }

    async fn connect(&self, address: &str) -> Result<BtleConnection, DeviceError> {
        let peripheral = self.peripherals.lock()
            .expect("Failed to lock peripherals")
            .get(address)
            .cloned()
            .ok_or_else(|| DeviceError::UnknownPeripheral(address.to_string()))?;

        info!("Connecting to peripheral {}...", address);
        peripheral.connect().await?;

        info!("Connected; Discovering services...");
        if let Err(err) = peripheral.discover_services().await {
            if let Err(disconnect_err) = peripheral.disconnect().await {
                warn!("Failed to disconnect after service discovery failed: {:?}", disconnect_err);
            }
            return Err(err.into());
        }

        Ok(BtleConnection { peripheral })
    }
}

pub struct BtleConnection {
    peripheral: Peripheral,
}

impl BtleConnection {
    fn find_characteristic(&self, uuid: Uuid) -> Result<Characteristic, DeviceError> {
        let uart_service_uuid = make_uart_service_uuid();
        let services = self.peripheral.services();

        // prefer the UART service, but some firmwares expose the same characteristic elsewhere
        let preferred = services.iter().filter(|service| service.uuid == uart_service_uuid);
        let others = services.iter().filter(|service| service.uuid != uart_service_uuid);

        preferred
            .chain(others)
            .flat_map(|service| service.characteristics.iter())
            .find(|characteristic| characteristic.uuid == uuid)
            .cloned()
            .ok_or(DeviceError::MissingCharacteristic)
    }
}

#[async_trait]
impl BleConnection for BtleConnection {
    async fn subscribe(&mut self, characteristic: Uuid) -> Result<NotificationStream, DeviceError> {
        let found = self.find_characteristic(characteristic)?;

        // open the stream first so nothing sent right after subscribing is missed
        let notifications = self.peripheral.notifications().await?;

        info!("Subscribing to characteristic {:?} {:?}", found.service_uuid, found.uuid);
        self.peripheral.subscribe(&found).await?;

        Ok(notifications
            .filter_map(move |notification| {
                future::ready((notification.uuid == characteristic).then_some(notification.value))
            })
            .boxed())
    }

    async fn unsubscribe(&mut self, characteristic: Uuid) -> Result<(), DeviceError> {
        let found = self.find_characteristic(characteristic)?;
        info!("Unsubscribing from characteristic {:?}", found.uuid);
        self.peripheral.unsubscribe(&found).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DeviceError> {
        info!("Disconnecting from peripheral...");
        self.peripheral.disconnect().await?;
        Ok(())
    }
}
