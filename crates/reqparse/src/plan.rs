//! Per-field binding plans.

use crate::config::ParserConfig;
use crate::directive::{self, Directive};
use crate::record::FieldDescriptor;

/// How one field is sourced, defaulted, and validated.
///
/// Built fresh from the field's tag on every binding pass and discarded
/// afterwards. Directive order is preserved exactly, since it decides which
/// error a caller sees first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    /// External parameter name.
    pub key: String,
    /// Whether the parameter must be present in the source.
    pub required: bool,
    /// The `Default(...)` directive, if any. The last one wins.
    pub default: Option<Directive>,
    /// Every other directive, in tag order.
    pub validators: Vec<Directive>,
}

impl FieldPlan {
    /// Build the plan for a field from its tag.
    ///
    /// An empty key segment falls back to the field name, lower-cased unless
    /// [`ParserConfig::disable_auto_lower`] is set.
    #[must_use]
    pub fn build(field_name: &str, tag: &str, config: &ParserConfig) -> Self {
        let raw = directive::split_tag(tag);

        let key = if raw.key.is_empty() {
            if config.disable_auto_lower {
                field_name.to_owned()
            } else {
                field_name.to_lowercase()
            }
        } else {
            raw.key.to_owned()
        };

        let mut required = false;
        let mut default = None;
        let mut validators = Vec::with_capacity(raw.directives.len());

        for segment in raw.directives {
            if directive::is_required(segment) {
                required = true;
            } else if directive::is_default(segment) {
                default = Some(Directive::parse(segment));
            } else {
                validators.push(Directive::parse(segment));
            }
        }

        Self {
            key,
            required,
            default,
            validators,
        }
    }

    /// Build the plan for a record field.
    #[must_use]
    pub fn for_field(field: &FieldDescriptor, config: &ParserConfig) -> Self {
        Self::build(field.name, field.tag, config)
    }
}
