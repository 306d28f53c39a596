//! Custom per-field validation hooks.
//!
//! A record type can supply validation logic its directives cannot express.
//! Hooks are looked up by name, `"Validate" + TitleCase(key)`, in a
//! [`Hooks`] table the type builds once:
//!
//! ```rust,ignore
//! fn student_hooks() -> Hooks<Student> {
//!     Hooks::new().on("number", |_: &Student, number: i64| {
//!         if number < 0 {
//!             return Err("value must be greater than 0");
//!         }
//!         Ok(())
//!     })
//! }
//! ```
//!
//! A hook whose value type does not match the kind of the field it is
//! attached to is skipped without error.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::directive::title_case;
use crate::error::HookError;
use crate::value::{Scalar, Value};

/// Name of the hook for the field with external key `key`.
#[must_use]
pub fn hook_name(key: &str) -> String {
    format!("Validate{}", title_case(key))
}

type HookFn<R> = Box<dyn Fn(&R, &Value) -> Option<Result<(), HookError>> + Send + Sync>;

/// Lookup table of custom hooks for record type `R`.
pub struct Hooks<R> {
    hooks: HashMap<String, HookFn<R>>,
}

impl<R> Hooks<R> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Register a hook for the field with external key `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn on<T, E, F>(self, key: &str, hook: F) -> Self
    where
        R: 'static,
        T: Scalar + 'static,
        E: fmt::Display,
        F: Fn(&R, T) -> Result<(), E> + Send + Sync + 'static,
    {
        self.method(&hook_name(key), hook)
    }

    /// Register a hook under an explicit name such as `"ValidateNumber"`.
    #[must_use = "builder methods must be chained or built"]
    pub fn method<T, E, F>(mut self, name: &str, hook: F) -> Self
    where
        R: 'static,
        T: Scalar + 'static,
        E: fmt::Display,
        F: Fn(&R, T) -> Result<(), E> + Send + Sync + 'static,
    {
        let wrapped: HookFn<R> = Box::new(move |record, value| {
            let typed = T::from_value(value)?;
            Some(hook(record, typed).map_err(|e| HookError::new(e.to_string())))
        });
        self.hooks.insert(name.to_owned(), wrapped);
        self
    }

    /// Whether a hook is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Invoke the hook registered under `hook_name`.
    ///
    /// Returns `None` when there is no such hook or when `value` does not
    /// convert to the hook's declared value type.
    pub fn dispatch(
        &self,
        record: &R,
        hook_name: &str,
        value: &Value,
    ) -> Option<Result<(), HookError>> {
        let hook = self.hooks.get(hook_name)?;
        let outcome = hook(record, value);
        if outcome.is_none() {
            trace!(
                hook = hook_name,
                kind = %value.kind(),
                "hook value type does not match field, skipped"
            );
        }
        outcome
    }
}

impl<R> Default for Hooks<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Hooks<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Hooks").field("names", &names).finish()
    }
}
