//! Diagnostics for `#[parser]` attributes.

use std::fmt::Display;

use quote::ToTokens;
use syn::Ident;

/// Error pointing at `tokens`.
pub fn spanned<T: ToTokens>(tokens: &T, msg: impl Display) -> syn::Error {
    syn::Error::new_spanned(tokens, msg)
}

/// An argument name the attribute does not accept in `context`.
pub fn unknown_argument(ident: &Ident, context: &str) -> syn::Error {
    spanned(ident, format_args!("unknown `#[parser]` argument `{ident}` on {context}"))
}

/// Accumulates errors across fields so every bad attribute is reported in
/// one compile.
#[derive(Default)]
pub struct Errors(Option<syn::Error>);

impl Errors {
    pub fn push(&mut self, err: syn::Error) {
        match &mut self.0 {
            Some(first) => first.combine(err),
            None => self.0 = Some(err),
        }
    }

    pub fn finish(self) -> syn::Result<()> {
        self.0.map_or(Ok(()), Err)
    }
}
