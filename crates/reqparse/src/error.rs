//! Error types for binding and validation.
//!
//! Every failure the engine can report is a [`BindError`]. Its `Display`
//! output is the user-facing rendering: `"<key>: <message>"` for
//! field-scoped failures, and a bare message for unknown validator names
//! and arity mismatches, which belong to the directive rather than to a
//! parameter.

use crate::value::FieldKind;

/// Error type for a record binding pass.
///
/// The first error encountered aborts the whole pass; there is no
/// aggregation of multiple failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// A `Required` parameter is absent from the value source.
    #[error("{key}: missing required parameter '{key}'")]
    MissingRequired { key: String },

    /// A directive fragment does not match the `Name(args)` call grammar.
    #[error("{key}: '{directive}' is not valid tag")]
    MalformedDirective { key: String, directive: String },

    /// A directive names a validator that is not registered.
    #[error("invalid function name '{name}'")]
    UnknownValidator { name: String },

    /// Fewer raw arguments than the validator declares.
    #[error("call func '{name}' with too few input arguments")]
    TooFewArguments {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// More raw arguments than the validator declares.
    #[error("call func '{name}' with too many input arguments")]
    TooManyArguments {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A directive argument cannot be converted to the declared parameter kind.
    #[error("{key}: invalid argument '{arg}' for '{name}': {reason}")]
    InvalidArgument {
        key: String,
        name: String,
        arg: String,
        reason: String,
    },

    /// The supplied value cannot be converted to the field's type.
    #[error("{key}: {message}")]
    InvalidValue { key: String, message: String },

    /// A `Default(...)` directive cannot be applied to the field.
    #[error("{key}: {message}")]
    InvalidDefault { key: String, message: String },

    /// A built-in, registered, or custom validator rejected the value.
    #[error("{key}: {message}")]
    Validation { key: String, message: String },

    /// The field kind has no rule for the requested operation.
    #[error("{key}: '{kind}' is unsupported value type")]
    UnsupportedKind { key: String, kind: FieldKind },
}

impl BindError {
    /// Parameter key the error is scoped to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { key }
            | Self::MalformedDirective { key, .. }
            | Self::InvalidArgument { key, .. }
            | Self::InvalidValue { key, .. }
            | Self::InvalidDefault { key, .. }
            | Self::Validation { key, .. }
            | Self::UnsupportedKind { key, .. } => Some(key),
            Self::UnknownValidator { .. }
            | Self::TooFewArguments { .. }
            | Self::TooManyArguments { .. } => None,
        }
    }

    /// Message without the key prefix.
    #[must_use]
    pub fn message(&self) -> String {
        let rendered = self.to_string();
        match self.key() {
            Some(key) => rendered
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix(": "))
                .map_or_else(|| rendered.clone(), str::to_owned),
            None => rendered,
        }
    }

    /// Broad error category for grouping in logs and metrics.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingRequired { .. } => "missing",
            Self::MalformedDirective { .. }
            | Self::UnknownValidator { .. }
            | Self::TooFewArguments { .. }
            | Self::TooManyArguments { .. }
            | Self::InvalidArgument { .. }
            | Self::InvalidDefault { .. } => "directive",
            Self::InvalidValue { .. } | Self::UnsupportedKind { .. } => "type",
            Self::Validation { .. } => "validation",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequired { .. } => "BIND_MISSING_REQUIRED",
            Self::MalformedDirective { .. } => "BIND_MALFORMED_DIRECTIVE",
            Self::UnknownValidator { .. } => "BIND_UNKNOWN_VALIDATOR",
            Self::TooFewArguments { .. } => "BIND_TOO_FEW_ARGUMENTS",
            Self::TooManyArguments { .. } => "BIND_TOO_MANY_ARGUMENTS",
            Self::InvalidArgument { .. } => "BIND_INVALID_ARGUMENT",
            Self::InvalidValue { .. } => "BIND_INVALID_VALUE",
            Self::InvalidDefault { .. } => "BIND_INVALID_DEFAULT",
            Self::Validation { .. } => "BIND_VALIDATION",
            Self::UnsupportedKind { .. } => "BIND_UNSUPPORTED_KIND",
        }
    }
}

/// Error raised by a [`ValueSource`](crate::source::ValueSource) typed getter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The key is not present in any location.
    #[error("parameter not found: `{key}`")]
    NotFound { key: String },

    /// The value is present but does not parse as the requested type.
    #[error("cannot parse `{value}` as {expected} for `{key}`")]
    Parse {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Error raised when registering a validator capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Capability names must be non-empty word characters.
    #[error("invalid validator name `{name}`")]
    InvalidName { name: String },

    /// The name is handled by the directive grammar itself.
    #[error("validator name `{name}` is reserved")]
    Reserved { name: String },

    /// A capability with this name already exists.
    #[error("validator already registered: `{name}`")]
    AlreadyExists { name: String },

    /// A list parameter consumes every remaining argument, so it must be last.
    #[error("validator `{name}`: list parameter must be the last parameter")]
    ListNotLast { name: String },
}

/// Error returned by a custom per-field validation hook.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Create a hook error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The hook's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
