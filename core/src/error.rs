//! Error types for command definition, parsing and invocation.
//!
//! Three families are kept apart:
//!
//! - [`UsageError`]: problems with what the user typed. Collected, never fatal.
//! - [`DefinitionError`]: defects in the static command tree, raised once by
//!   [`CommandTree::new`](crate::CommandTree::new).
//! - [`ActionError`]: failures raised by a terminal action.

use thiserror::Error;

use crate::ValueType;

/// A user-input error found while parsing or validating a command line.
///
/// # Examples
///
/// ```
/// use kubepizza_core::UsageError;
///
/// let err = UsageError::ValueNotInAllowedSet {
///     option: "--size".into(),
///     value: "huge".into(),
///     allowed: vec!["small".into(), "medium".into(), "large".into()],
/// };
/// assert_eq!(
///     err.to_string(),
///     "argument 'huge' not recognized for option '--size'; must be one of: small, medium, large"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// A token in subcommand position matched no child of the resolved node.
    #[error("unrecognized command '{token}' for '{path}'")]
    UnrecognizedSubcommand { token: String, path: String },
    /// A token matched no visible option and is not a value of one.
    #[error("unrecognized argument '{token}' for '{path}'")]
    UnrecognizedArgument { token: String, path: String },
    /// A required option was not supplied.
    #[error("option '{option}' is required")]
    MissingRequiredValue { option: String },
    /// An option that needs a value was given without one.
    #[error("option '{option}' expects a value")]
    MissingOptionValue { option: String },
    /// A value outside an option's closed set of accepted values.
    #[error(
        "argument '{value}' not recognized for option '{option}'; must be one of: {}",
        .allowed.join(", ")
    )]
    ValueNotInAllowedSet {
        option: String,
        value: String,
        allowed: Vec<String>,
    },
    /// A token could not be converted to the option's value type.
    #[error("cannot parse '{value}' as {expected} for option '{option}'")]
    TypeCoercionFailed {
        option: String,
        value: String,
        expected: ValueType,
    },
    /// A command-level rule spanning several options was violated.
    #[error("{message}")]
    CrossOptionRule { message: String },
}

impl UsageError {
    /// Builds a command-level rule violation.
    pub fn rule(message: impl Into<String>) -> Self {
        Self::CrossOptionRule {
            message: message.into(),
        }
    }
}

/// A defect in a command tree definition.
///
/// Raised when a tree is assembled; a program should refuse to start when
/// it sees one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Command name or alias contains characters outside `[a-z0-9-]`.
    #[error("invalid command name: {0}")]
    InvalidCommandName(String),
    /// Two siblings share a name or alias.
    #[error("duplicate subcommand name or alias '{name}' under '{path}'")]
    DuplicateSubcommand { path: String, name: String },
    /// Option name is not a `--long` or `-s` spelling.
    #[error("invalid option name: {0}")]
    InvalidOptionName(String),
    /// Option name collides with the built-in help option.
    #[error("option name is reserved for help: {0}")]
    ReservedOptionName(String),
    /// Two different options visible at one node share a spelling.
    #[error("duplicate option '{name}' visible at '{path}'")]
    DuplicateOption { path: String, name: String },
    /// Required options never consult a default.
    #[error("required option '{0}' cannot declare a default value")]
    RequiredWithDefault(String),
    /// An allowed-value set with nothing in it.
    #[error("option '{0}' declares an empty set of allowed values")]
    EmptyAllowedValues(String),
}

/// Failure raised by a terminal action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The cancellation token fired before the action finished.
    #[error("operation cancelled")]
    Cancelled,

    /// Writing to the output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering a result failed.
    #[error("output error: {0}")]
    Output(String),

    /// Any other action failure.
    #[error("{0}")]
    Failed(String),
}
