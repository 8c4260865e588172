use crate::attributes::AttributeKind;
use thiserror::Error;

/// Error type produced by a widget's render capability.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Malformed attribute `{name}`: {source}")]
    MalformedAttribute {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Render failed: {0}")]
    RenderFailure(#[source] RenderError),

    #[error("Attribute `{name}` expects a {expected} value")]
    TypeMismatch { name: String, expected: AttributeKind },

    #[error("Component name already registered: {0}")]
    DuplicateRegistration(String),

    #[error("Invalid component name: {0}")]
    InvalidName(String),

    #[error("Host error: {0}")]
    Host(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
