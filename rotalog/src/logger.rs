//! The `Logger`: formats one line per call and dispatches it to the console
//! and the rotating file sinks.

use crate::config::{JsonIndent, LoggerConfig, WriteMode};
use crate::error::LoggerError;
use crate::format::{self, Level};
use crate::sink::{resolve_location, Console, RotatingFile, StdConsole};
use crate::style::{Background, Color, Modifier, StyleSet};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Per-call overrides for [`Logger::log_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub style: StyleSet,
    /// Routes the line to stderr and to the error file when one exists.
    pub error: bool,
    /// Defaults to `console+file`.
    pub write_mode: Option<WriteMode>,
}

impl LogSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.style.color = Some(color);
        self
    }

    pub fn background(mut self, background: Background) -> Self {
        self.style.background = Some(background);
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.style.modifiers.push(modifier);
        self
    }

    pub fn error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = Some(mode);
        self
    }
}

type Clock = Box<dyn Fn() -> DateTime<Local> + Send>;

/// Builds a [`Logger`] with injected collaborators.
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Box<dyn Console>,
    pid: u32,
    clock: Clock,
}

impl LoggerBuilder {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            console: Box::new(StdConsole),
            pid: std::process::id(),
            clock: Box::new(Local::now),
        }
    }

    pub fn console(mut self, console: impl Console + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    pub fn pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    pub fn clock(mut self, clock: impl Fn() -> DateTime<Local> + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Opens the primary file (and the error file, if configured).
    pub fn build(self) -> Result<Logger, LoggerError> {
        let config = self.config;
        config.validate()?;

        let max_bytes = config.max_bytes();
        let mode = config.file_write_mode;
        let primary = RotatingFile::open(config.primary_location()?, max_bytes, mode)?;
        let error_file = match config.error_location()? {
            Some(location) => {
                let location = resolve_location(location)?;
                if &location == primary.location() {
                    debug!(
                        "Error file {} is the primary file, sharing one handle",
                        primary.path().display()
                    );
                    None
                } else {
                    Some(RotatingFile::open(location, max_bytes, mode)?)
                }
            }
            None => None,
        };

        Ok(Logger {
            primary,
            error_file,
            console: self.console,
            pid: self.pid,
            clock: self.clock,
            debug_write_mode: config.debug_write_mode,
            use_milliseconds: config.use_milliseconds,
            show_pid: config.show_pid,
            json_indent: config.json_indent,
            colored_file_output: config.colored_file_output,
            max_console_length: config.max_console_length,
        })
    }
}

/// Timestamped, color-tagged logger writing to the console and a rotating file.
pub struct Logger {
    primary: RotatingFile,
    /// `None` sends error lines to `primary`.
    error_file: Option<RotatingFile>,
    console: Box<dyn Console>,
    pid: u32,
    clock: Clock,
    debug_write_mode: WriteMode,
    use_milliseconds: bool,
    show_pid: bool,
    json_indent: Option<JsonIndent>,
    colored_file_output: bool,
    max_console_length: Option<usize>,
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Result<Self, LoggerError> {
        LoggerBuilder::new(config).build()
    }

    pub fn builder(config: LoggerConfig) -> LoggerBuilder {
        LoggerBuilder::new(config)
    }

    pub fn log<T: Serialize + ?Sized>(&mut self, payload: &T) -> Result<(), LoggerError> {
        self.write(payload, Level::Plain, &LogSettings::default())
    }

    pub fn log_with<T: Serialize + ?Sized>(
        &mut self,
        payload: &T,
        settings: &LogSettings,
    ) -> Result<(), LoggerError> {
        self.write(payload, Level::Plain, settings)
    }

    pub fn success<T: Serialize + ?Sized>(&mut self, payload: &T) -> Result<(), LoggerError> {
        self.write(payload, Level::Success, &LogSettings::new().color(Color::GreenBright))
    }

    pub fn warn<T: Serialize + ?Sized>(&mut self, payload: &T) -> Result<(), LoggerError> {
        self.write(payload, Level::Warn, &LogSettings::new().color(Color::Yellow))
    }

    pub fn info<T: Serialize + ?Sized>(&mut self, payload: &T) -> Result<(), LoggerError> {
        self.write(payload, Level::Info, &LogSettings::new().color(Color::BlueBright))
    }

    pub fn error<T: Serialize + ?Sized>(&mut self, payload: &T) -> Result<(), LoggerError> {
        let settings = LogSettings::new().color(Color::RedBright).error(true);
        self.write(payload, Level::Error, &settings)
    }

    /// Routed by the configured debug write mode; `none` skips all work.
    pub fn debug<T: Serialize + ?Sized>(&mut self, payload: &T) -> Result<(), LoggerError> {
        if self.debug_write_mode == WriteMode::None {
            return Ok(());
        }
        let settings = LogSettings::new()
            .color(Color::Yellow)
            .write_mode(self.debug_write_mode);
        self.write(payload, Level::Debug, &settings)
    }

    fn write<T: Serialize + ?Sized>(
        &mut self,
        payload: &T,
        level: Level,
        settings: &LogSettings,
    ) -> Result<(), LoggerError> {
        let mode = settings.write_mode.unwrap_or_default();
        if mode == WriteMode::None {
            return Ok(());
        }

        let text = format::render_payload(payload, self.json_indent.as_ref())?;
        let now = (self.clock)();
        let timestamp = format::timestamp(&now, self.use_milliseconds);
        let pid = self.show_pid.then_some(self.pid);

        // A console failure is reported only after the file write.
        let mut console_result = Ok(());
        if mode.to_console() {
            let shown = match self.max_console_length {
                Some(max) => format::truncate_chars(&text, max),
                None => text.as_str(),
            };
            let line = format::compose_line(&timestamp, pid, level, shown);
            let painted = settings.style.paint(&line);
            console_result = if settings.error {
                self.console.err(&painted)
            } else {
                self.console.out(&painted)
            };
        }

        if mode.to_file() {
            let line = format::compose_line(&timestamp, pid, level, &text);
            let painted = settings.style.paint(&line);
            let file_line = if self.colored_file_output {
                painted
            } else {
                strip_ansi_escapes::strip_str(&painted)
            };
            self.file_for(settings.error).write_line(&file_line)?;
        }

        console_result.map_err(LoggerError::Console)
    }

    fn file_for(&mut self, error: bool) -> &mut RotatingFile {
        match (&mut self.error_file, error) {
            (Some(file), true) => file,
            _ => &mut self.primary,
        }
    }

    /// Releases every file handle. Safe to call more than once.
    pub fn close(&mut self) -> Result<(), LoggerError> {
        let primary = self.primary.close();
        let error_file = match self.error_file.as_mut() {
            Some(file) => file.close(),
            None => Ok(()),
        };
        primary.and(error_file)
    }

    pub fn current_file(&self) -> PathBuf {
        self.primary.path()
    }

    pub fn error_file(&self) -> Option<PathBuf> {
        self.error_file.as_ref().map(RotatingFile::path)
    }

    pub fn sequence_id(&self) -> u64 {
        self.primary.sequence_id()
    }

    pub fn bytes_written(&self) -> u64 {
        self.primary.bytes_written()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
