//! # Rotalog - Console and Rotating-File Logging
//!
//! A drop-in logger for single-process applications. Each call formats one
//! line (timestamp, optional PID, level tag, payload), paints it for the
//! terminal and dispatches it to the console and/or a size-rotated file.
//!
//! ## Modules
//!
//! - [`config`] - Logger configuration, write modes and rotation thresholds
//! - [`error`] - Typed error handling with thiserror
//! - [`format`] - Timestamp, level tag and payload rendering
//! - [`logger`] - The `Logger` itself and per-call settings
//! - [`sink`] - Console collaborator and rotating file sink
//! - [`style`] - Terminal colors and modifiers

pub mod config;
pub mod error;
pub mod format;
pub mod logger;
pub mod sink;
pub mod style;
pub(crate) mod utils;

pub use crate::config::{
    FileLocation, FileWriteMode, JsonIndent, LoggerConfig, RotateSize, SizeUnit, WriteMode,
};
pub use error::{ConfigError, LoggerError};
pub use format::Level;
pub use logger::{LogSettings, Logger, LoggerBuilder};
pub use sink::{Console, MemoryConsole, RotatingFile, StdConsole};
pub use style::{Background, Color, Modifier, StyleSet};

pub use utils::setup_diagnostics;
