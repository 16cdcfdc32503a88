//! Error types for catalog construction and loading.

use thiserror::Error;

/// Errors that can occur while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A recommendation was declared for a pizza the catalog does not list.
    #[error("unknown pizza '{0}'")]
    UnknownPizza(String),

    /// A recommended or available topping is not a known topping.
    #[error("unknown topping '{topping}' referenced by {context}")]
    UnknownTopping { topping: String, context: String },

    /// A pizza or topping name is blank.
    #[error("empty {0} name")]
    EmptyName(&'static str),

    /// The same pizza or topping is listed twice (ignoring case).
    #[error("duplicate {kind} '{name}'")]
    DuplicateEntry { kind: &'static str, name: String },

    /// The file extension names no supported format.
    #[error("unsupported catalog file '{0}': expected .yaml, .yml or .json")]
    UnsupportedFormat(String),
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
