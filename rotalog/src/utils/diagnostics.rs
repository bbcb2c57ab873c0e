//! `tracing` subscriber for the crate's own diagnostic events.

use crate::format;
use chrono::Local;
use nu_ansi_term::{Color, Style};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    prelude::*,
    registry::LookupSpan,
    util::TryInitError,
    EnvFilter,
};

/// Installs a stderr subscriber for the crate's own `tracing` events
/// (file opens, rotations, redundant closes).
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn setup_diagnostics(default_filter: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .event_format(DiagnosticFormatter)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).try_init()
}

struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// `<timestamp>|<level>|<target>: <message>` in the same timestamp layout
/// as log lines.
pub struct DiagnosticFormatter;

impl DiagnosticFormatter {
    fn level_style(level: &Level) -> Style {
        match *level {
            Level::ERROR => Style::new().fg(Color::LightRed).bold(),
            Level::WARN => Style::new().fg(Color::Yellow),
            Level::INFO => Style::new().fg(Color::LightBlue),
            Level::DEBUG => Style::new().fg(Color::DarkGray),
            Level::TRACE => Style::new().dimmed(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for DiagnosticFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let timestamp = format::timestamp(&Local::now(), true);
        let level = format!("{:<5}", metadata.level());

        let mut msg_visitor = MessageVisitor {
            message: String::new(),
        };
        event.record(&mut msg_visitor);

        if writer.has_ansi_escapes() {
            let level_style = Self::level_style(metadata.level());
            write!(
                writer,
                "{}|{}|{}: ",
                Style::new().dimmed().paint(timestamp),
                level_style.paint(level),
                Style::new().dimmed().paint(metadata.target())
            )?;
        } else {
            write!(writer, "{}|{}|{}: ", timestamp, level, metadata.target())?;
        }
        writeln!(writer, "{}", msg_visitor.message)
    }
}
