//! Line formatting: timestamp, PID column, level tag and payload rendering.

use crate::config::JsonIndent;
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const TIME_FORMAT: &str = "%Y.%m.%d %H:%M:%S";
const TIME_FORMAT_MILLIS: &str = "%Y.%m.%d %H:%M:%S%.3f";

/// Severity tag placed between the header and the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Plain,
    Success,
    Warn,
    Error,
    Debug,
    Info,
}

impl Level {
    pub fn tag(self) -> &'static str {
        match self {
            Level::Plain => "",
            Level::Success => "success|",
            Level::Warn => "warn   |",
            Level::Error => "error  |",
            Level::Debug => "debug  |",
            Level::Info => "info   |",
        }
    }
}

/// `YYYY.MM.DD HH:MM:SS[.mmm]`, zero padded.
pub fn timestamp<Tz>(at: &DateTime<Tz>, millis: bool) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let format = if millis { TIME_FORMAT_MILLIS } else { TIME_FORMAT };
    at.format(format).to_string()
}

/// Renders a payload. Strings pass through unquoted, everything else is JSON.
pub fn render_payload<T>(payload: &T, indent: Option<&JsonIndent>) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
{
    let compact = serde_json::to_string(payload)?;
    if compact.starts_with('"') {
        return serde_json::from_str::<String>(&compact);
    }

    match indent.and_then(JsonIndent::unit) {
        Some(unit) if compact.starts_with('{') || compact.starts_with('[') => {
            let mut buf = Vec::with_capacity(compact.len() * 2);
            let formatter = PrettyFormatter::with_indent(unit.as_bytes());
            let mut ser = Serializer::with_formatter(&mut buf, formatter);
            payload.serialize(&mut ser)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
        _ => Ok(compact),
    }
}

pub fn compose_line(timestamp: &str, pid: Option<u32>, level: Level, payload: &str) -> String {
    match pid {
        Some(pid) => format!("{}|{}|{}{}", timestamp, pid, level.tag(), payload),
        None => format!("{}|{}{}", timestamp, level.tag(), payload),
    }
}

/// Cuts `text` to at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
