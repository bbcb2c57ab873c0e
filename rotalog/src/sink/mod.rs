//! Output sinks: the console collaborator and size-rotated files.

pub mod console;
pub mod rotating;

pub use console::{CapturedLines, Console, MemoryConsole, StdConsole};
pub use rotating::{resolve_location, RotatingFile};
