//! Error types for arm model loading and validation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to parse JSON
    #[error("Failed to parse model JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Failed to read the model file
    #[error("Failed to read model file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A chain needs at least one link
    #[error("Model '{0}' has no links")]
    NoLinks(String),

    /// Symbol names must be plain identifiers
    #[error("Invalid symbol name '{name}' for {role}")]
    InvalidName { name: String, role: String },

    /// The same symbol is declared twice
    #[error("Duplicate symbol '{name}'")]
    DuplicateSymbol { name: String },

    /// A symbol would print like a coordinate derivative or a renamed inertia
    #[error("Symbol '{name}' is reserved for the {holder}")]
    ReservedName { name: String, holder: String },

    /// A bound value contradicts the declared assumption
    #[error("Parameter '{name}' = {value} violates assumption: {assumption}")]
    AssumptionViolated {
        name: String,
        value: f64,
        assumption: String,
    },

    /// A parameter of the model has no bound value
    #[error("Parameter '{0}' has no value")]
    MissingValue(String),
}

impl ModelError {
    pub fn invalid_name(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            role: role.into(),
        }
    }
}
