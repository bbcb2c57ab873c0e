//! Console collaborator: process stdout/stderr or an in-memory capture.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Console collaborator. Lines arrive without a trailing newline.
pub trait Console: Send {
    fn out(&mut self, line: &str) -> io::Result<()>;
    fn err(&mut self, line: &str) -> io::Result<()>;
}

/// Process stdout/stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn out(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)
    }

    fn err(&mut self, line: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", line)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedLines {
    pub out: Vec<String>,
    pub err: Vec<String>,
}

/// In-memory console. Clones share the same buffer, so a test can keep one
/// handle and give another to the logger.
#[derive(Debug, Default, Clone)]
pub struct MemoryConsole {
    lines: Arc<Mutex<CapturedLines>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn out_lines(&self) -> Vec<String> {
        self.lock().out.clone()
    }

    pub fn err_lines(&self) -> Vec<String> {
        self.lock().err.clone()
    }

    pub fn is_empty(&self) -> bool {
        let lines = self.lock();
        lines.out.is_empty() && lines.err.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, CapturedLines> {
        // Poisoning is ignored; captured lines stay readable.
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Console for MemoryConsole {
    fn out(&mut self, line: &str) -> io::Result<()> {
        self.lock().out.push(line.to_string());
        Ok(())
    }

    fn err(&mut self, line: &str) -> io::Result<()> {
        self.lock().err.push(line.to_string());
        Ok(())
    }
}
