//! Capability traits consumed at the edges.
//!
//! The core never touches the filesystem; callers hand in whatever
//! `Source`/`Sink`/`Logger` they like. `MemorySink` and `NullLogger` cover
//! tests and library use.

use indexmap::IndexMap;

/// Where input schemas come from.
pub trait Source {
    fn read(&mut self, name: &str) -> std::io::Result<String>;
}

/// Where emitted files go.
pub trait Sink {
    fn write(&mut self, name: &str, text: &str) -> std::io::Result<()>;
}

/// User-visible diagnostics.
pub trait Logger {
    fn info(&mut self, message: &str);
    fn warn(&mut self, message: &str);
}

/// A sink that keeps files in memory, in write order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: IndexMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, name: &str, text: &str) -> std::io::Result<()> {
        self.files.insert(name.to_string(), text.to_string());
        Ok(())
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
}
