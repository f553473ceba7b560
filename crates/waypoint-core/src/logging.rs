//! Minimal structured logging.
//!
//! The router carries its own small logger rather than pulling in an
//! observability stack: a level threshold plus a pluggable sink. The
//! default sink writes to stderr; tests swap in a capturing sink.

use std::sync::Arc;

/// Log severity, ordered from silent to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing is emitted.
    Off,
    /// Failures only.
    Error,
    /// Request-level events.
    Info,
    /// Everything, including per-dispatch detail.
    Debug,
}

impl LogLevel {
    /// Returns the fixed-width label used by the default sink.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Error => "ERROR",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

type Sink = Arc<dyn Fn(LogLevel, &str, &str) + Send + Sync>;

/// A level-filtered logger with a pluggable sink.
#[derive(Clone)]
pub struct Logger {
    threshold: LogLevel,
    sink: Sink,
}

impl Logger {
    /// Create a logger writing to stderr at the given threshold.
    #[must_use]
    pub fn new(threshold: LogLevel) -> Self {
        Self {
            threshold,
            sink: Arc::new(|level, target, message| {
                eprintln!("{} {target}: {message}", level.label());
            }),
        }
    }

    /// Create a silent logger.
    #[must_use]
    pub fn off() -> Self {
        Self::new(LogLevel::Off)
    }

    /// Create a logger with a custom sink.
    pub fn with_sink<F>(threshold: LogLevel, sink: F) -> Self
    where
        F: Fn(LogLevel, &str, &str) + Send + Sync + 'static,
    {
        Self {
            threshold,
            sink: Arc::new(sink),
        }
    }

    /// Returns true if `level` passes the threshold.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level <= self.threshold
    }

    /// Emit a record if `level` passes the threshold.
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if self.enabled(level) {
            (self.sink)(level, target, message);
        }
    }

    /// Emit at [`LogLevel::Error`].
    pub fn error(&self, target: &str, message: &str) {
        self.log(LogLevel::Error, target, message);
    }

    /// Emit at [`LogLevel::Info`].
    pub fn info(&self, target: &str, message: &str) {
        self.log(LogLevel::Info, target, message);
    }

    /// Emit at [`LogLevel::Debug`].
    pub fn debug(&self, target: &str, message: &str) {
        self.log(LogLevel::Debug, target, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::off()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
