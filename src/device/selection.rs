use crate::device::types::DiscoveredDevice;

/// Returns the first device, in scan order, whose advertised name contains `needle`
/// ignoring case. Devices without a name, or with an empty one, never match.
pub fn select_target<'a>(devices: &'a [DiscoveredDevice], needle: &str) -> Option<&'a DiscoveredDevice> {
    let needle = needle.to_lowercase();

    devices.iter().find(|device| match device.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_lowercase().contains(&needle),
        _ => false,
    })
}
