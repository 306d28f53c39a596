//! Validator registry.
//!
//! Maps a directive name to a capability with declared parameter kinds.
//! Parameter lists are checked when a capability is registered; arguments
//! are checked against them on every call, arity first, then coercion.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::directive::{self, ValidatorCall};
use crate::error::{BindError, RegistryError};
use crate::validators;
use crate::value::{FieldKind, Value};

// ==================== Parameters ====================

/// Declared kind of one capability parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Passed through verbatim.
    Str,
    /// Parsed as a base-10 `i64`.
    Int,
    /// Consumes every remaining argument. Only valid as the last parameter.
    List,
}

/// A coerced capability argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Str(String),
    Int(i64),
    List(Vec<String>),
}

impl Arg {
    /// Try to get the argument as a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the argument as an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the argument as a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

// ==================== Context ====================

/// The field a capability is invoked against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    key: &'a str,
    value: &'a Value,
}

impl<'a> ValidationContext<'a> {
    /// Create a context for the field with external key `key`.
    #[must_use]
    pub fn new(key: &'a str, value: &'a Value) -> Self {
        Self { key, value }
    }

    /// External key of the field.
    #[must_use]
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Current value of the field.
    #[must_use]
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Kind of the current value.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }

    /// A validation failure scoped to this field.
    pub fn reject(&self, message: impl Into<String>) -> BindError {
        BindError::Validation {
            key: self.key.to_owned(),
            message: message.into(),
        }
    }

    /// An unsupported-kind failure scoped to this field.
    #[must_use]
    pub fn unsupported(&self) -> BindError {
        BindError::UnsupportedKind {
            key: self.key.to_owned(),
            kind: self.kind(),
        }
    }
}

// ==================== Capability ====================

type CheckFn =
    Arc<dyn Fn(&ValidationContext<'_>, &[Arg]) -> Result<(), BindError> + Send + Sync>;

/// A named, arity-checked validator.
#[derive(Clone)]
pub struct Capability {
    name: String,
    params: Vec<ParamKind>,
    check: CheckFn,
}

impl Capability {
    /// Capability name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter kinds, in order.
    #[must_use]
    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    fn takes_list(&self) -> bool {
        self.params.last() == Some(&ParamKind::List)
    }

    fn check_arity(&self, actual: usize) -> Result<(), BindError> {
        let expected = self.params.len();
        if actual < expected {
            return Err(BindError::TooFewArguments {
                name: self.name.clone(),
                expected,
                actual,
            });
        }
        if actual > expected && !self.takes_list() {
            return Err(BindError::TooManyArguments {
                name: self.name.clone(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn coerce(&self, key: &str, raw: &[String]) -> Result<Vec<Arg>, BindError> {
        let mut args = Vec::with_capacity(self.params.len());
        for (index, kind) in self.params.iter().enumerate() {
            let arg = match kind {
                ParamKind::Str => Arg::Str(raw[index].clone()),
                ParamKind::Int => {
                    let text = &raw[index];
                    let n = text.parse().map_err(|e: std::num::ParseIntError| {
                        BindError::InvalidArgument {
                            key: key.to_owned(),
                            name: self.name.clone(),
                            arg: text.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                    Arg::Int(n)
                }
                ParamKind::List => Arg::List(raw[index..].to_vec()),
            };
            args.push(arg);
        }
        Ok(args)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

// ==================== Registry ====================

/// Set of capabilities a parser resolves directive names against.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    capabilities: HashMap<String, Capability>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `Required`, `Range(min, max)`, and `Choices(list)`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert("Required", Vec::new(), Arc::new(validators::required));
        registry.insert(
            "Range",
            vec![ParamKind::Int, ParamKind::Int],
            Arc::new(validators::range),
        );
        registry.insert("Choices", vec![ParamKind::List], Arc::new(validators::choices));
        registry
    }

    /// Register a capability.
    ///
    /// # Errors
    ///
    /// Fails when `name` is not a word, is the reserved `Default`, is
    /// already registered, or when a [`ParamKind::List`] parameter is not
    /// the last one.
    pub fn register<F>(
        &mut self,
        name: &str,
        params: &[ParamKind],
        check: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&ValidationContext<'_>, &[Arg]) -> Result<(), BindError> + Send + Sync + 'static,
    {
        if !directive::is_valid_name(name) {
            return Err(RegistryError::InvalidName {
                name: name.to_owned(),
            });
        }
        if name == directive::DEFAULT {
            return Err(RegistryError::Reserved {
                name: name.to_owned(),
            });
        }
        if self.capabilities.contains_key(name) {
            return Err(RegistryError::AlreadyExists {
                name: name.to_owned(),
            });
        }
        if let Some(pos) = params.iter().position(|p| *p == ParamKind::List) {
            if pos + 1 != params.len() {
                return Err(RegistryError::ListNotLast {
                    name: name.to_owned(),
                });
            }
        }

        self.insert(name, params.to_vec(), Arc::new(check));
        trace!(validator = name, "registered validator");
        Ok(())
    }

    fn insert(&mut self, name: &str, params: Vec<ParamKind>, check: CheckFn) {
        self.capabilities.insert(
            name.to_owned(),
            Capability {
                name: name.to_owned(),
                params,
                check,
            },
        );
    }

    /// Look up a capability by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.capabilities.get(name)
    }

    /// Whether a capability is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.capabilities.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.capabilities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Run one validator call against a field.
    ///
    /// # Errors
    ///
    /// [`BindError::UnknownValidator`] for an unregistered name, an arity
    /// error when the raw argument count does not fit the declared
    /// parameters, [`BindError::InvalidArgument`] when an argument does not
    /// coerce, or whatever the capability itself reports.
    pub fn invoke(
        &self,
        call: &ValidatorCall,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), BindError> {
        let capability = self
            .capabilities
            .get(&call.name)
            .ok_or_else(|| BindError::UnknownValidator {
                name: call.name.clone(),
            })?;

        capability.check_arity(call.args.len())?;
        let args = capability.coerce(ctx.key(), &call.args)?;

        trace!(
            key = ctx.key(),
            validator = %call.name,
            value = %ctx.value(),
            "invoking validator"
        );
        (capability.check)(ctx, &args)
    }
}
