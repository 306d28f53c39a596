//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use reqparse::prelude::*;
//! ```

pub use crate::config::ParserConfig;
pub use crate::error::{BindError, HookError};
pub use crate::hooks::Hooks;
pub use crate::parser::RequestParser;
pub use crate::record::{FieldDescriptor, FieldMut, Record};
pub use crate::registry::{Arg, ParamKind, Registry, ValidationContext};
pub use crate::source::{RequestParams, ValueSource};
pub use crate::value::Value;

#[cfg(feature = "derive")]
pub use reqparse_macros::Record;
