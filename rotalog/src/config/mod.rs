//! Logger configuration: output location, rotation threshold, write modes
//! and formatting toggles. Loadable from TOML, JSON or YAML.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Selects which sink(s) receive a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WriteMode {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "console")]
    Console,
    #[serde(rename = "file")]
    File,
    #[default]
    #[serde(rename = "console+file")]
    ConsoleAndFile,
}

impl WriteMode {
    pub fn to_console(self) -> bool {
        matches!(self, WriteMode::Console | WriteMode::ConsoleAndFile)
    }

    pub fn to_file(self) -> bool {
        matches!(self, WriteMode::File | WriteMode::ConsoleAndFile)
    }
}

impl FromStr for WriteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(WriteMode::None),
            "console" => Ok(WriteMode::Console),
            "file" => Ok(WriteMode::File),
            "console+file" => Ok(WriteMode::ConsoleAndFile),
            other => Err(ConfigError::invalid(
                "write_mode",
                format!("'{}' is not one of none, console, file, console+file", other),
            )),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WriteMode::None => "none",
            WriteMode::Console => "console",
            WriteMode::File => "file",
            WriteMode::ConsoleAndFile => "console+file",
        };
        f.write_str(s)
    }
}

/// Size unit of the rotation threshold. Units are powers of 1024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeUnit {
    B,
    K,
    M,
    G,
}

impl SizeUnit {
    pub fn multiplier(self) -> u64 {
        match self {
            SizeUnit::B => 1,
            SizeUnit::K => 1024,
            SizeUnit::M => 1024 * 1024,
            SizeUnit::G => 1024 * 1024 * 1024,
        }
    }
}

impl FromStr for SizeUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "B" | "b" => Ok(SizeUnit::B),
            "K" | "k" => Ok(SizeUnit::K),
            "M" | "m" => Ok(SizeUnit::M),
            "G" | "g" => Ok(SizeUnit::G),
            other => Err(ConfigError::invalid(
                "rotate_file.unit",
                format!("'{}' is not one of B, K, M, G", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateSize {
    pub size: u64,
    pub unit: SizeUnit,
}

impl Default for RotateSize {
    fn default() -> Self {
        Self {
            size: 10,
            unit: SizeUnit::M,
        }
    }
}

impl RotateSize {
    pub fn new(size: u64, unit: SizeUnit) -> Self {
        Self { size, unit }
    }

    pub fn bytes(&self) -> u64 {
        self.size.saturating_mul(self.unit.multiplier())
    }
}

/// JSON indentation for non-string payloads.
///
/// A number is a count of spaces, a string is used literally. Both are capped
/// at 10; zero or empty means compact output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonIndent {
    Spaces(usize),
    Text(String),
}

impl JsonIndent {
    const MAX_WIDTH: usize = 10;

    /// Returns the indent unit, or `None` when output should stay compact.
    pub fn unit(&self) -> Option<String> {
        let unit = match self {
            JsonIndent::Spaces(n) => " ".repeat((*n).min(Self::MAX_WIDTH)),
            JsonIndent::Text(s) => s.chars().take(Self::MAX_WIDTH).collect(),
        };
        if unit.is_empty() {
            None
        } else {
            Some(unit)
        }
    }
}

/// How file sinks hand lines to the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileWriteMode {
    /// Every line is written to the file before the call returns.
    #[default]
    Blocking,
    /// Lines are queued to a background worker and flushed on close.
    ///
    /// Closing waits for the worker for roughly one second at most; a
    /// backlog larger than the worker can drain in that window may be
    /// dropped. Write errors on the worker are not reported.
    NonBlocking,
}

/// Directory, base name and extension of a rotating file family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    pub dir: PathBuf,
    pub name: String,
    pub ext: String,
}

impl FileLocation {
    pub fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}.{}.{}", self.name, id, self.ext))
    }

    /// Parses `<name>.<id>.<ext>` and returns the id.
    pub fn sequence_of(&self, file_name: &str) -> Option<u64> {
        let rest = file_name.strip_prefix(self.name.as_str())?.strip_prefix('.')?;
        let digits = rest.strip_suffix(self.ext.as_str())?.strip_suffix('.')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub dir_path: PathBuf,
    /// Explicit file path. Overrides `dir_path`, `file_name` and `file_ext`.
    pub file_path: Option<PathBuf>,
    pub file_name: String,
    pub file_ext: String,
    /// Separate file for `error` lines: a bare name in the log directory, or
    /// a path with its own parent directory.
    pub error_file: Option<PathBuf>,
    pub rotate_file: RotateSize,
    pub debug_write_mode: WriteMode,
    pub use_milliseconds: bool,
    pub show_pid: bool,
    pub json_indent: Option<JsonIndent>,
    pub colored_file_output: bool,
    pub max_console_length: Option<usize>,
    pub file_write_mode: FileWriteMode,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            dir_path: PathBuf::from("logs"),
            file_path: None,
            file_name: "log".to_string(),
            file_ext: "ansi".to_string(),
            error_file: None,
            rotate_file: RotateSize::default(),
            debug_write_mode: WriteMode::ConsoleAndFile,
            use_milliseconds: true,
            show_pid: false,
            json_indent: None,
            colored_file_output: true,
            max_console_length: None,
            file_write_mode: FileWriteMode::Blocking,
        }
    }
}

impl LoggerConfig {
    pub fn new(dir_path: impl Into<PathBuf>) -> Self {
        Self {
            dir_path: dir_path.into(),
            ..Default::default()
        }
    }

    /// Loads a config file (TOML, JSON or YAML, chosen by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let load_err = |e: ::config::ConfigError| ConfigError::Load {
            path: path.display().to_string(),
            msg: e.to_string(),
        };

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()
            .map_err(load_err)?;

        let config: Self = settings.try_deserialize().map_err(load_err)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn with_file_ext(mut self, ext: impl Into<String>) -> Self {
        self.file_ext = ext.into();
        self
    }

    pub fn with_error_file(mut self, error_file: impl Into<PathBuf>) -> Self {
        self.error_file = Some(error_file.into());
        self
    }

    pub fn with_rotation(mut self, size: u64, unit: SizeUnit) -> Self {
        self.rotate_file = RotateSize::new(size, unit);
        self
    }

    pub fn with_debug_write_mode(mut self, mode: WriteMode) -> Self {
        self.debug_write_mode = mode;
        self
    }

    pub fn with_milliseconds(mut self, enabled: bool) -> Self {
        self.use_milliseconds = enabled;
        self
    }

    pub fn with_pid(mut self, enabled: bool) -> Self {
        self.show_pid = enabled;
        self
    }

    pub fn with_json_indent(mut self, indent: JsonIndent) -> Self {
        self.json_indent = Some(indent);
        self
    }

    pub fn with_colored_file_output(mut self, enabled: bool) -> Self {
        self.colored_file_output = enabled;
        self
    }

    pub fn with_max_console_length(mut self, max: usize) -> Self {
        self.max_console_length = Some(max);
        self
    }

    pub fn with_file_write_mode(mut self, mode: FileWriteMode) -> Self {
        self.file_write_mode = mode;
        self
    }

    pub fn max_bytes(&self) -> u64 {
        self.rotate_file.bytes()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.primary_location()?;
        self.error_location()?;
        Ok(())
    }

    /// Resolves where the primary file family lives.
    pub fn primary_location(&self) -> Result<FileLocation, ConfigError> {
        let location = match &self.file_path {
            Some(path) => {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .ok_or_else(|| ConfigError::invalid("file_path", "path has no file name"))?;
                let ext = path
                    .extension()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| self.file_ext.clone());
                FileLocation {
                    dir: parent_or_current(path),
                    name,
                    ext,
                }
            }
            None => FileLocation {
                dir: self.dir_path.clone(),
                name: self.file_name.clone(),
                ext: self.file_ext.clone(),
            },
        };

        check_segment("file_name", &location.name)?;
        check_segment("file_ext", &location.ext)?;
        Ok(location)
    }

    /// Resolves the error file family. `None` means error lines share the
    /// primary file.
    pub fn error_location(&self) -> Result<Option<FileLocation>, ConfigError> {
        let Some(path) = &self.error_file else {
            return Ok(None);
        };
        let primary = self.primary_location()?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| ConfigError::invalid("error_file", "path has no file name"))?;
        let ext = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| primary.ext.clone());
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => primary.dir.clone(),
        };

        check_segment("error_file", &name)?;
        check_segment("error_file", &ext)?;

        let location = FileLocation { dir, name, ext };
        if location == primary {
            return Ok(None);
        }
        Ok(Some(location))
    }
}

fn parent_or_current(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn check_segment(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingField {
            field: field.to_string(),
        });
    }
    if value.contains(['/', '\\']) {
        return Err(ConfigError::invalid(
            field,
            format!("'{}' must not contain path separators", value),
        ));
    }
    Ok(())
}
