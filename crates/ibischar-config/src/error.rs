//! Errors raised while loading a configuration (flat or structured form)
//! into a [`ibischar_core::Document`].

use thiserror::Error;

/// A configuration-loading failure: malformed or incomplete input, an
/// unknown model type, an unresolved model/pin reference, or an invalid
/// numeric literal (spec §7, `ConfigError`).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Core(#[from] ibischar_core::CoreError),

    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("unknown model type {0:?}")]
    UnknownModelType(String),

    #[error("unknown polarity {0:?}")]
    UnknownPolarity(String),

    #[error("unknown enable polarity {0:?}")]
    UnknownEnablePolarity(String),

    #[error("unknown simulator {0:?}")]
    UnknownSimulator(String),

    #[error("missing required field {0}")]
    MissingField(String),

    #[error("pin {pin} references unresolved model {model}")]
    UnresolvedModel { pin: String, model: String },

    #[error("json structure error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed structured value: {0}")]
    Structured(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
