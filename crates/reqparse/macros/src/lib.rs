//! # reqparse-macros
//!
//! Proc-macros for `reqparse`. Use them through the `reqparse` crate,
//! which re-exports them behind its default `derive` feature.
//!
//! ```ignore
//! use reqparse::Record;
//!
//! #[derive(Default, Record)]
//! pub struct Student {
//!     #[parser("username; Required")]
//!     name: String,
//!     #[parser("grade; Required; Choices(A, B, C)")]
//!     grade: String,
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod record;
mod support;

/// Derive macro for the `Record` trait.
///
/// # Attributes
///
/// ## Container attributes (`#[parser(...)]` on the struct)
///
/// - `hooks = path` - Function returning `Hooks<Self>`; its table is built
///   once and consulted for every bound field. Not supported on generic
///   structs.
///
/// ## Field attributes
///
/// - `#[parser("key; Directive; ...")]` - Directive tag (default: empty)
/// - `#[parser(nested)]` - Bind the field as a nested record
/// - `#[parser(skip)]` - Never touch this field
///
/// Scalar fields are the integer types, `f32`, `f64`, `String` and `bool`.
/// Any other field type is bound as a nested record and must implement
/// `Record` itself.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, Record)]
/// #[parser(hooks = student_hooks)]
/// pub struct Student {
///     #[parser(";Required")]
///     number: i64,
///     address: Address,
///     #[parser(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(parser))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}
