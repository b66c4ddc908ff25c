//! Human-readable trace of a selection run.
//!
//! Lines are only formatted when tracing is enabled; each recorded line is
//! also forwarded to the `log` facade under [`TRACE_TARGET`] so hosts that
//! install a logger see the trace on their console.

use std::fmt;

/// `log` target used for trace lines.
pub const TRACE_TARGET: &str = "alt_face_loops::trace";

#[derive(Clone, Debug, Default)]
pub struct Trace {
    enabled: bool,
    lines: Vec<String>,
}

impl Trace {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            lines: Vec::new(),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one line; a no-op when disabled.
    pub fn record(&mut self, args: fmt::Arguments<'_>) {
        if !self.enabled {
            return;
        }
        let line = args.to_string();
        log::debug!(target: TRACE_TARGET, "{line}");
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
