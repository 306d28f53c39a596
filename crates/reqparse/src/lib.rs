//! # reqparse
//!
//! Declarative binding of request parameters into typed records.
//!
//! Each field of a record carries a small directive tag. A
//! [`RequestParser`] reads the tag, pulls the field's value from a
//! [`ValueSource`], coerces it to the field's type, runs the named
//! validators left to right, and finally calls the record's custom hook for
//! the field. The first failure aborts the whole pass.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reqparse::prelude::*;
//!
//! #[derive(Debug, Default, Record)]
//! #[parser(hooks = student_hooks)]
//! struct Student {
//!     #[parser("username; Required")]
//!     name: String,
//!     #[parser("grade; Required; Choices(A, B, C)")]
//!     grade: String,
//!     #[parser(";Required")]
//!     number: i64,
//! }
//!
//! fn student_hooks() -> Hooks<Student> {
//!     Hooks::new().on("number", |_: &Student, number: i64| {
//!         if number < 0 {
//!             return Err("value must be greater than 0");
//!         }
//!         Ok(())
//!     })
//! }
//!
//! let params = RequestParams::from_query_string("username=dd&grade=A&number=2");
//! let mut student = Student::default();
//! RequestParser::default().parse_args(&params, &mut student)?;
//! ```
//!
//! ## Tag Grammar
//!
//! ```text
//! tag        := key ( ';' directive )*
//! directive  := 'Required' | funcCall
//! funcCall   := name '(' args? ')'
//! ```
//!
//! An empty key falls back to the lower-cased field name. `Required` and
//! `Default(v)` are reserved; every other directive names a validator in the
//! parser's [`Registry`]: `Required()`, `Range(min, max)` and
//! `Choices(a, b, ...)` are built in.

// Lets `#[derive(Record)]` expansions refer to `::reqparse` inside this crate.
extern crate self as reqparse;

pub mod config;
pub mod directive;
pub mod error;
pub mod hooks;
pub mod parser;
pub mod plan;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod source;
pub mod validators;
pub mod value;

pub use config::ParserConfig;
pub use directive::{Directive, ValidatorCall};
pub use error::{BindError, HookError, RegistryError, SourceError};
pub use hooks::Hooks;
pub use parser::RequestParser;
pub use plan::FieldPlan;
pub use record::{FieldDescriptor, FieldMut, Record};
pub use registry::{Arg, ParamKind, Registry, ValidationContext};
pub use source::{RequestParams, ValueSource};
pub use value::{FieldKind, Scalar, Slot, Value};

/// `#[derive(Record)]`: implements [`Record`] for a struct with named fields.
///
/// # Attributes
///
/// ## Container attributes (`#[parser(...)]` on the struct)
///
/// - `hooks = path` - function returning [`Hooks<Self>`](Hooks) with the
///   struct's custom validation hooks
///
/// ## Field attributes
///
/// - `#[parser("key; Directive; ...")]` - the field's directive tag
/// - `#[parser(nested)]` - bind the field as a nested record
/// - `#[parser(skip)]` - never touch the field
///
/// Fields without a `#[parser]` attribute use an empty tag. A field whose
/// type is not a known scalar is bound as a nested record.
#[cfg(feature = "derive")]
pub use reqparse_macros::Record;
