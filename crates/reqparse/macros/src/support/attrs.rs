use syn::{
    Attribute, Ident, LitStr, Meta, Path, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::support::diag;

/// Parsed `#[parser(...)]` arguments.
#[derive(Debug, Clone, Default)]
pub struct AttrArgs {
    pub items: Vec<AttrItem>,
}

/// A single attribute item.
#[derive(Debug, Clone)]
pub enum AttrItem {
    /// A directive tag like `"grade; Required"`
    Tag(LitStr),
    /// A flag like `skip` or `nested`
    Flag(Ident),
    /// Key-path pair like `hooks = student_hooks`
    KeyValue { key: Ident, value: Path },
}

impl AttrArgs {
    /// The directive tag, if one was given. Errors on more than one.
    pub fn tag(&self) -> Result<Option<&LitStr>> {
        let mut tags = self.items.iter().filter_map(|item| match item {
            AttrItem::Tag(lit) => Some(lit),
            _ => None,
        });
        let first = tags.next();
        if let Some(extra) = tags.next() {
            return Err(diag::spanned(extra, "duplicate directive tag"));
        }
        Ok(first)
    }

    /// Find a key-path pair by key name.
    pub fn get_path(&self, key: &str) -> Option<&Path> {
        self.items.iter().find_map(|item| match item {
            AttrItem::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Check if a flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, AttrItem::Flag(f) if f == flag))
    }

    /// Reject flags and keys outside `allowed`.
    pub fn expect_only(&self, allowed: &[&str], context: &str) -> Result<()> {
        for item in &self.items {
            let ident = match item {
                AttrItem::Tag(lit) if !allowed.contains(&"tag") => {
                    return Err(diag::spanned(
                        lit,
                        format!("a directive tag is not allowed on {context}"),
                    ));
                }
                AttrItem::Tag(_) => continue,
                AttrItem::Flag(ident) | AttrItem::KeyValue { key: ident, .. } => ident,
            };
            if !allowed.iter().any(|a| ident == a) {
                return Err(diag::unknown_argument(ident, context));
            }
        }
        Ok(())
    }
}

/// Parse an attribute like `#[parser(...)]`.
pub fn parse_attr(attr: &Attribute, expected: &str) -> Result<Option<AttrArgs>> {
    if !attr.path().is_ident(expected) {
        return Ok(None);
    }

    match &attr.meta {
        Meta::Path(_) => Ok(Some(AttrArgs::default())),
        Meta::List(list) => {
            let args = syn::parse2::<AttrArgsParser>(list.tokens.clone())?;
            Ok(Some(args.0))
        }
        Meta::NameValue(nv) => Err(diag::spanned(
            nv,
            format!("#[{expected}] must be #[{expected}(...)] (not name-value)"),
        )),
    }
}

/// Parse all attributes of a given name and merge them.
pub fn parse_attrs(attrs: &[Attribute], name: &str) -> Result<AttrArgs> {
    let mut result = AttrArgs::default();

    for attr in attrs {
        if let Some(args) = parse_attr(attr, name)? {
            result.items.extend(args.items);
        }
    }

    Ok(result)
}

struct AttrArgsParser(AttrArgs);

impl Parse for AttrArgsParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = Punctuated::<AttrItemParser, Token![,]>::parse_terminated(input)?
            .into_iter()
            .map(|x| x.0)
            .collect();
        Ok(Self(AttrArgs { items }))
    }
}

struct AttrItemParser(AttrItem);

impl Parse for AttrItemParser {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self(AttrItem::Tag(input.parse()?)));
        }

        let key: Ident = input.parse()?;
        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value: Path = input.parse()?;
            return Ok(Self(AttrItem::KeyValue { key, value }));
        }

        Ok(Self(AttrItem::Flag(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn parse_tag_and_flags() {
        let tokens = quote!("grade; Required", nested);
        let parsed: AttrArgsParser = syn::parse2(tokens).unwrap();

        assert_eq!(parsed.0.items.len(), 2);
        assert_eq!(parsed.0.tag().unwrap().unwrap().value(), "grade; Required");
        assert!(parsed.0.has_flag("nested"));
        assert!(!parsed.0.has_flag("skip"));
    }

    #[test]
    fn parse_hooks_path() {
        let tokens = quote!(hooks = crate::hooks::student_hooks);
        let parsed: AttrArgsParser = syn::parse2(tokens).unwrap();

        let path = parsed.0.get_path("hooks").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert!(parsed.0.tag().unwrap().is_none());
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let tokens = quote!("a", "b");
        let parsed: AttrArgsParser = syn::parse2(tokens).unwrap();
        assert!(parsed.0.tag().is_err());
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        let tokens = quote!(skip, optional);
        let parsed: AttrArgsParser = syn::parse2(tokens).unwrap();
        assert!(parsed.0.expect_only(&["tag", "skip", "nested"], "fields").is_err());
        assert!(
            parsed
                .0
                .expect_only(&["tag", "skip", "nested", "optional"], "fields")
                .is_ok()
        );
    }
}
