use std::sync::LazyLock;
use regex::Regex;

use crate::device::types::ClassifiedLine;

// CSI sequences written by the Espruino console, e.g. "\x1b[J" to clear the line
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("ANSI escape pattern is valid")
});

/// Decodes bytes as UTF-8, dropping every invalid sequence instead of replacing it.
pub fn decode_lossy(data: &[u8]) -> String {
    let mut text = String::with_capacity(data.len());
    for chunk in data.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Removes console escape sequences, and the `>` prompt the console puts in front of a payload.
fn strip_console_noise(text: &str) -> String {
    let text = ANSI_ESCAPE.replace_all(text, "");
    text.trim_start_matches('>').to_string()
}

pub fn classify_line(line: String) -> ClassifiedLine {
    match serde_json::from_str(&line) {
        Ok(value) => ClassifiedLine::Json(value),
        Err(_) => ClassifiedLine::Raw(line),
    }
}

/// Splits a notification payload into records and classifies each non-empty one.
pub fn decode_notification(data: &[u8]) -> Vec<ClassifiedLine> {
    strip_console_noise(&decode_lossy(data))
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| classify_line(line.to_string()))
        .collect()
}
