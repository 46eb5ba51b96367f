//! Error types for the settings subsystem.
//!
//! Three families cover every failure the subsystem can surface: unknown key
//! lookups, rejected values, and persistence failures. None of them is
//! process-fatal; schema-authoring defects (a key without a default, a
//! duplicate entry in the input code table) are caught at startup instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::InputCode;
use crate::keys::Domain;

/// A rejected setting value. The store is left unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Server port outside `[1, 65535]`.
    #[error("port {0} is out of range (expected 1-65535)")]
    PortOutOfRange(i64),

    /// Mouse sensitivity outside `(0, max]`.
    #[error("mouse sensitivity {value} is out of range (expected 0 < value <= {max})")]
    SensitivityOutOfRange {
        /// The rejected value.
        value: f32,
        /// The configured upper bound.
        max: f32,
    },

    /// A binding referenced an input code that is not in the code table.
    #[error("input code {0} is not a recognized physical input")]
    UnknownInputCode(InputCode),

    /// Two bindings in the same aggregate resolved to the same physical input.
    #[error("`{second}` would map to input code {code}, already held by `{first}`")]
    DuplicateBinding {
        /// Qualified name of the key that already holds the code.
        first: String,
        /// Qualified name of the key being assigned.
        second: String,
        /// The contested input code.
        code: InputCode,
    },

    /// A value of the wrong kind was offered for a key (e.g. a port number
    /// for a button binding).
    #[error("`{key}` does not accept {kind} values")]
    WrongKind {
        /// Qualified name of the target key.
        key: String,
        /// Kind name of the offered value.
        kind: &'static str,
    },
}

/// A persistence failure on load or save.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {path}")]
    Read {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The settings file could not be parsed as TOML.
    #[error("failed to parse settings file {path}")]
    Parse {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The in-memory settings could not be serialized.
    #[error("failed to serialize settings")]
    Serialize(#[from] toml::ser::Error),

    /// The settings file (or its temp sibling) could not be written.
    #[error("failed to write settings file {path}")]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// No platform config directory could be determined and no override was set.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}

/// Top-level error type for store operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A symbolic key name did not resolve in the registry.
    #[error("unknown {domain} key `{name}`")]
    NotFound {
        /// Domain the lookup was scoped to.
        domain: Domain,
        /// The name that failed to resolve.
        name: String,
    },

    /// The offered value was rejected by the validator.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Persistence failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
