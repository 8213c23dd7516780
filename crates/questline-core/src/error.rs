//! Engine error types.
//!
//! Nothing in the core dispatch cascade is fatal to the process: routing
//! misses and cascade-guard hits are silent discards, configuration
//! anomalies are logged and skipped. The variants here cover the remaining
//! genuinely fallible paths (template I/O and parsing, condition predicates
//! that perform their own I/O).

use std::path::PathBuf;

use thiserror::Error;

/// Top-level engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A filesystem operation failed while loading templates.
    #[error("template I/O error at {path}: {source}")]
    TemplateIo {
        /// The path involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A template file could not be parsed.
    #[error("template parse error at {path}: {message}")]
    TemplateParse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The parser's diagnostic.
        message: String,
    },

    /// A template task references an objective type that is not registered.
    #[error("unknown objective type: {0}")]
    UnknownObjective(String),

    /// A condition predicate failed while evaluating (e.g. external I/O).
    ///
    /// Caught at the per-task boundary and treated as "condition not
    /// satisfied" for that evaluation.
    #[error("condition evaluation failed: {0}")]
    Condition(String),

    /// Invalid engine configuration.
    #[error("configuration error: {0}")]
    Config(String),
}
