//! Where demonstrations write their observable output.

use std::sync::{Mutex, PoisonError};

use colored::Colorize;
use tracing::info;

pub trait Sink: Send + Sync {
    fn emit(&self, line: &str);

    /// Marks the start of a demonstration.
    fn heading(&self, title: &str) {
        self.emit(&format!("=== {title} ==="));
    }
}

/// Prints to stdout, optionally colouring headings.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, line: &str) {
        println!("{line}");
    }

    fn heading(&self, title: &str) {
        let title = format!("=== {title} ===");
        if self.color {
            println!("\n{}", title.bold().cyan());
        } else {
            println!("\n{title}");
        }
    }
}

/// Routes each line through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Sink for LogSink {
    fn emit(&self, line: &str) {
        info!(target: "design_patterns::output", "{line}");
    }

    fn heading(&self, title: &str) {
        info!(target: "design_patterns::output", demo = title, "starting demonstration");
    }
}

/// Keeps every line in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    /// Index of the first line containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.lines().iter().position(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
