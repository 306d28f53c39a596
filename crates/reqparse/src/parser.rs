//! The binding engine.
//!
//! [`RequestParser::parse_args`] walks a record's fields in declaration
//! order. For each settable field it:
//!
//! 1. recurses into nested records;
//! 2. builds the field's [`FieldPlan`];
//! 3. checks presence in the [`ValueSource`], failing on a missing required
//!    key, otherwise applying the default or zero value and moving on;
//! 4. coerces the raw value to the field's kind and assigns it;
//! 5. runs the validator chain in tag order;
//! 6. runs the record's custom hook for the field, if any.
//!
//! The first error aborts the pass. Fields bound before the failing one keep
//! their new values; use [`RequestParser::parse_args_atomic`] when that is
//! not acceptable.

use http::StatusCode;
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::directive::Directive;
use crate::error::BindError;
use crate::hooks::hook_name;
use crate::plan::FieldPlan;
use crate::record::{FieldMut, Record};
use crate::registry::{Registry, ValidationContext};
use crate::source::ValueSource;
use crate::value::{FieldKind, Slot, Value};

/// A caller-owned binding engine.
///
/// Holds read-only configuration and the validator registry; one parser can
/// serve any number of concurrent passes over distinct records.
#[derive(Debug, Clone)]
pub struct RequestParser {
    config: ParserConfig,
    registry: Registry,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl RequestParser {
    /// Create a parser with the built-in validators.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self::with_registry(config, Registry::builtin())
    }

    /// Create a parser resolving directives against `registry`.
    #[must_use]
    pub fn with_registry(config: ParserConfig, registry: Registry) -> Self {
        Self { config, registry }
    }

    /// The parser's configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The validator registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Status code hosts should answer binding failures with.
    #[must_use]
    pub fn error_status(&self) -> StatusCode {
        self.config.error_status()
    }

    /// Bind every settable field of `record` from `source`.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindError`] encountered. The record is not rolled
    /// back.
    pub fn parse_args<S>(&self, source: &S, record: &mut dyn Record) -> Result<(), BindError>
    where
        S: ValueSource + ?Sized,
    {
        self.bind_record(source, record).inspect_err(|err| {
            debug!(
                code = err.code(),
                key = err.key().unwrap_or_default(),
                error = %err,
                "record binding failed"
            );
        })
    }

    /// Like [`parse_args`](Self::parse_args), but binds a copy of `record`
    /// and writes it back only when every field succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindError`] encountered; `record` is unchanged.
    pub fn parse_args_atomic<S, R>(&self, source: &S, record: &mut R) -> Result<(), BindError>
    where
        S: ValueSource + ?Sized,
        R: Record + Clone,
    {
        let mut scratch = record.clone();
        self.parse_args(source, &mut scratch)?;
        *record = scratch;
        Ok(())
    }

    /// Run a validator chain against `value`, left to right.
    ///
    /// # Errors
    ///
    /// Returns the first failing directive's error.
    pub fn validate(
        &self,
        key: &str,
        directives: &[Directive],
        value: &Value,
    ) -> Result<(), BindError> {
        let ctx = ValidationContext::new(key, value);
        for directive in directives {
            match directive {
                Directive::Call(call) => self.registry.invoke(call, &ctx)?,
                Directive::Malformed(fragment) => {
                    return Err(BindError::MalformedDirective {
                        key: key.to_owned(),
                        directive: fragment.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn bind_record<S>(&self, source: &S, record: &mut dyn Record) -> Result<(), BindError>
    where
        S: ValueSource + ?Sized,
    {
        let fields = record.fields();
        for (index, field) in fields.iter().enumerate() {
            if !field.settable {
                trace!(field = field.name, "field not settable, skipped");
                continue;
            }
            let slot = match record.field_mut(index) {
                Some(FieldMut::Scalar(slot)) => slot,
                Some(FieldMut::Nested(nested)) => {
                    trace!(field = field.name, "binding nested record");
                    self.bind_record(source, nested)?;
                    continue;
                }
                None => continue,
            };

            let plan = FieldPlan::for_field(field, &self.config);
            trace!(field = field.name, key = %plan.key, "binding field");

            if !source.contains(&plan.key) {
                if plan.required {
                    debug!(key = %plan.key, "required parameter missing");
                    return Err(BindError::MissingRequired { key: plan.key });
                }
                apply_default(&plan, slot)?;
                continue;
            }

            let value = coerce(source, &plan.key, slot.kind())?;
            if !slot.assign(&value) {
                return Err(invalid_value(&plan.key, &value.to_string(), slot.kind()));
            }
            let value = slot.value();

            self.validate(&plan.key, &plan.validators, &value)?;

            if let Some(Err(err)) = record.custom_hook(&hook_name(&plan.key), &value) {
                return Err(BindError::Validation {
                    key: plan.key,
                    message: err.message().to_owned(),
                });
            }
        }
        Ok(())
    }
}

fn apply_default(plan: &FieldPlan, slot: &mut dyn Slot) -> Result<(), BindError> {
    let call = match &plan.default {
        None => {
            slot.reset();
            trace!(key = %plan.key, "parameter absent, reset to zero value");
            return Ok(());
        }
        Some(Directive::Malformed(fragment)) => {
            return Err(BindError::MalformedDirective {
                key: plan.key.clone(),
                directive: fragment.clone(),
            });
        }
        Some(Directive::Call(call)) => call,
    };

    let Some(raw) = call.args.first() else {
        return Err(BindError::InvalidDefault {
            key: plan.key.clone(),
            message: "can't set default value".to_owned(),
        });
    };

    let assigned = Value::parse(slot.kind(), raw).is_some_and(|value| slot.assign(&value));
    if !assigned {
        return Err(BindError::InvalidDefault {
            key: plan.key.clone(),
            message: format!("can't set default value '{raw}' for '{}' field", slot.kind()),
        });
    }
    debug!(key = %plan.key, default = %raw, "parameter absent, default applied");
    Ok(())
}

fn coerce<S>(source: &S, key: &str, kind: FieldKind) -> Result<Value, BindError>
where
    S: ValueSource + ?Sized,
{
    let raw = move || source.get_string(key).unwrap_or_default();
    let value = match kind {
        FieldKind::Text => Some(Value::Text(raw().to_owned())),
        FieldKind::Signed => source.get_i64(key).ok().map(Value::Int),
        FieldKind::Unsigned => source.get_u64(key).ok().map(Value::Uint),
        FieldKind::Float => source.get_f64(key).ok().map(Value::Float),
        FieldKind::Bool => source.get_bool(key).ok().map(Value::Bool),
        FieldKind::Nested => {
            return Err(BindError::UnsupportedKind {
                key: key.to_owned(),
                kind,
            });
        }
    };
    value.ok_or_else(|| invalid_value(key, raw(), kind))
}

fn invalid_value(key: &str, raw: &str, kind: FieldKind) -> BindError {
    let message = match kind {
        FieldKind::Float => format!("'{raw}' is not a valid number"),
        FieldKind::Bool => format!("'{raw}' is not a valid boolean"),
        _ => format!("'{raw}' is not a valid choice"),
    };
    BindError::InvalidValue {
        key: key.to_owned(),
        message,
    }
}
