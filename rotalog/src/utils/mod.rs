//! # Utilities Module
//!
//! Internal utility modules for the rotalog crate.

pub(crate) mod diagnostics;

pub use diagnostics::setup_diagnostics;
