//! Size-rotated log files named `<name>.<seq>.<ext>`.

use crate::config::{FileLocation, FileWriteMode};
use crate::error::LoggerError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};

enum Stream {
    Blocking(File),
    NonBlocking {
        // Field order matters: the writer must drop before the guard joins
        // the worker.
        writer: NonBlocking,
        guard: WorkerGuard,
    },
}

impl Stream {
    fn open(path: &Path, mode: FileWriteMode) -> Result<Self, LoggerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::io(path, e))?;

        Ok(match mode {
            FileWriteMode::Blocking => Stream::Blocking(file),
            FileWriteMode::NonBlocking => {
                let (writer, guard) = NonBlockingBuilder::default()
                    .lossy(false)
                    .thread_name("rotalog-writer")
                    .finish(file);
                Stream::NonBlocking { writer, guard }
            }
        })
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Stream::Blocking(file) => file.write_all(bytes),
            Stream::NonBlocking { writer, .. } => writer.write_all(bytes),
        }
    }

    /// Flushes and releases the handle. For the non-blocking stream this
    /// waits for the worker to drain its queue, bounded by the guard's
    /// shutdown timeout (about one second).
    fn shutdown(self) -> io::Result<()> {
        match self {
            Stream::Blocking(mut file) => file.flush(),
            Stream::NonBlocking { writer, guard } => {
                drop(writer);
                drop(guard);
                Ok(())
            }
        }
    }
}

/// A family of `<name>.<seq>.<ext>` files where only the highest sequence id
/// is written to.
///
/// Before every write the byte counter is compared against the threshold;
/// once it is strictly greater, the current file is closed and the next
/// sequence id is opened with a fresh counter. A rotated file therefore
/// exceeds the threshold by at most one line.
pub struct RotatingFile {
    location: FileLocation,
    mode: FileWriteMode,
    max_bytes: u64,
    id: u64,
    written: u64,
    stream: Option<Stream>,
    closed: bool,
}

impl RotatingFile {
    /// Creates the directory if needed and resumes the highest existing
    /// sequence, seeding the byte counter from its size.
    pub fn open(
        location: FileLocation,
        max_bytes: u64,
        mode: FileWriteMode,
    ) -> Result<Self, LoggerError> {
        let location = resolve_location(location)?;

        let mut id = highest_sequence(&location)?;
        let existing = location.path_for(id);
        let mut written = match fs::metadata(&existing) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => return Err(LoggerError::io(&existing, e)),
        };
        if written > max_bytes {
            debug!(
                "{} holds {} bytes (limit {}), starting at sequence {}",
                existing.display(),
                written,
                max_bytes,
                id + 1
            );
            id += 1;
            written = 0;
        }

        let path = location.path_for(id);
        let stream = Stream::open(&path, mode)?;
        debug!("Opened log file {} at {} bytes", path.display(), written);

        Ok(Self {
            location,
            mode,
            max_bytes,
            id,
            written,
            stream: Some(stream),
            closed: false,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.location.path_for(self.id)
    }

    pub fn location(&self) -> &FileLocation {
        &self.location
    }

    pub fn sequence_id(&self) -> u64 {
        self.id
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Appends `line` plus a newline, rotating first if the active file is
    /// already over the threshold.
    pub fn write_line(&mut self, line: &str) -> Result<(), LoggerError> {
        if self.closed {
            return Err(LoggerError::Closed {
                path: self.path().display().to_string(),
            });
        }
        if self.written > self.max_bytes {
            self.rotate()?;
        }

        let path = self.path();
        // A failed rotation leaves no stream; the next write retries the open.
        let mut stream = match self.stream.take() {
            Some(stream) => stream,
            None => Stream::open(&path, self.mode)?,
        };

        let mut text = String::with_capacity(line.len() + 1);
        text.push_str(line);
        text.push('\n');

        let result = stream.write_all(text.as_bytes());
        self.stream = Some(stream);
        result.map_err(|e| LoggerError::io(&path, e))?;

        self.written += text.len() as u64;
        Ok(())
    }

    fn rotate(&mut self) -> Result<(), LoggerError> {
        let old = self.path();
        if let Some(stream) = self.stream.take() {
            stream.shutdown().map_err(|e| LoggerError::io(&old, e))?;
        }

        self.id += 1;
        self.written = 0;
        let path = self.path();
        debug!("Rotating {} -> {}", old.display(), path.display());

        self.stream = Some(Stream::open(&path, self.mode)?);
        Ok(())
    }

    /// Flushes and releases the handle. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), LoggerError> {
        if self.closed {
            debug!("{} already closed, ignoring", self.path().display());
            return Ok(());
        }
        self.closed = true;

        if let Some(stream) = self.stream.take() {
            let path = self.path();
            stream.shutdown().map_err(|e| LoggerError::io(&path, e))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path())
            .field("mode", &self.mode)
            .field("max_bytes", &self.max_bytes)
            .field("written", &self.written)
            .field("closed", &self.closed)
            .finish()
    }
}

/// Creates the directory and rewrites it in canonical form, so two spellings
/// of the same directory compare equal.
pub fn resolve_location(location: FileLocation) -> Result<FileLocation, LoggerError> {
    fs::create_dir_all(&location.dir).map_err(|e| LoggerError::io(&location.dir, e))?;
    let dir = fs::canonicalize(&location.dir).map_err(|e| LoggerError::io(&location.dir, e))?;
    Ok(FileLocation { dir, ..location })
}

/// Highest `<name>.<seq>.<ext>` id in the directory, 0 when there is none.
pub fn highest_sequence(location: &FileLocation) -> Result<u64, LoggerError> {
    let entries = fs::read_dir(&location.dir).map_err(|e| LoggerError::io(&location.dir, e))?;

    Ok(entries
        .filter_map(|res| res.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            location.sequence_of(name.to_str()?)
        })
        .max()
        .unwrap_or(0))
}
