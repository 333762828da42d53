use std::fmt;
use std::time::Duration;
use serde_json::Value;

/// A peripheral seen during a discovery scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    pub address: String,
    pub name: Option<String>,
}

impl DiscoveredDevice {
    pub fn new(address: impl Into<String>, name: Option<&str>) -> Self {
        DiscoveredDevice {
            address: address.into(),
            name: name.map(String::from),
        }
    }
}

/// One newline-delimited record taken from a notification payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedLine {
    Json(Value),
    Raw(String),
}

impl fmt::Display for ClassifiedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifiedLine::Json(value) => write!(f, "📦 JSON: {}", value),
            ClassifiedLine::Raw(line) => write!(f, "📥 RAW: {}", line),
        }
    }
}

/// Everything a session reports to the console, in the order it happens.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Scanning,
    NotFound,
    Found(DiscoveredDevice),
    Connected,
    Listening(Duration),
    Line(ClassifiedLine),
    Done,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::Scanning => write!(f, "🔍 Scanning for Bangle…"),
            SessionEvent::NotFound => {
                write!(f, "⚠️ Bangle not found—make sure it's advertising and in range.")
            },
            SessionEvent::Found(device) => write!(
                f,
                "✅ Found {} ({})",
                device.name.as_deref().unwrap_or("NONE"),
                device.address,
            ),
            SessionEvent::Connected => write!(f, "🔗 Connected, subscribing to notifications…"),
            SessionEvent::Listening(duration) => write!(
                f,
                "🟢 Listening for {}—send pings on your watch now",
                humantime::format_duration(*duration),
            ),
            SessionEvent::Line(line) => write!(f, "{}", line),
            SessionEvent::Done => write!(f, "🔌 Done."),
        }
    }
}
