use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Type, parse_macro_input};

use crate::support::{attrs, diag, utils};

const ATTR: &str = "parser";

/// Field types bound as scalars; everything else is a nested record.
const SCALAR_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32", "f64",
    "String", "bool",
];

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Scalar,
    Nested,
    Skip,
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let container = attrs::parse_attrs(&input.attrs, ATTR)?;
    container.expect_only(&["hooks"], "structs")?;

    let fields = utils::require_named_fields(input)?;
    let mut descriptors = Vec::with_capacity(fields.named.len());
    let mut arms = Vec::new();
    let mut errors = diag::Errors::default();

    for (index, field) in fields.named.iter().enumerate() {
        match field_binding(index, field) {
            Ok((descriptor, arm)) => {
                descriptors.push(descriptor);
                arms.extend(arm);
            }
            Err(err) => errors.push(err),
        }
    }
    errors.finish()?;

    let custom_hook = match container.get_path("hooks") {
        Some(path) => {
            if !input.generics.params.is_empty() {
                return Err(diag::spanned(
                    &input.generics,
                    "`#[parser(hooks = ...)]` is not supported on generic structs",
                ));
            }
            quote! {
                fn custom_hook(
                    &self,
                    hook_name: &str,
                    value: &::reqparse::Value,
                ) -> ::core::option::Option<
                    ::core::result::Result<(), ::reqparse::HookError>,
                > {
                    static HOOKS: ::std::sync::OnceLock<::reqparse::Hooks<#struct_name>> =
                        ::std::sync::OnceLock::new();
                    HOOKS.get_or_init(#path).dispatch(self, hook_name, value)
                }
            }
        }
        None => quote! {},
    };

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::reqparse::Record for #struct_name #ty_generics #where_clause {
            fn fields(&self) -> &'static [::reqparse::FieldDescriptor] {
                const FIELDS: &[::reqparse::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<::reqparse::FieldMut<'_>> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #custom_hook
        }
    })
}

/// The descriptor for one field plus its `field_mut` arm, if it has one.
fn field_binding(
    index: usize,
    field: &syn::Field,
) -> syn::Result<(TokenStream2, Option<TokenStream2>)> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(diag::spanned(field, "expected a named field"));
    };
    let field_attrs = attrs::parse_attrs(&field.attrs, ATTR)?;
    field_attrs.expect_only(&["tag", "skip", "nested"], "fields")?;

    let name = utils::field_name(ident);
    let tag = field_attrs
        .tag()?
        .map(syn::LitStr::value)
        .unwrap_or_default();

    let access = access_for(&field.ty, &field_attrs);
    let descriptor = match access {
        Access::Skip => quote!(::reqparse::FieldDescriptor::new(#name, #tag).skipped()),
        _ => quote!(::reqparse::FieldDescriptor::new(#name, #tag)),
    };
    let arm = match access {
        Access::Scalar => Some(quote! {
            #index => ::core::option::Option::Some(
                ::reqparse::FieldMut::Scalar(&mut self.#ident)
            ),
        }),
        Access::Nested => Some(quote! {
            #index => ::core::option::Option::Some(
                ::reqparse::FieldMut::Nested(&mut self.#ident)
            ),
        }),
        Access::Skip => None,
    };
    Ok((descriptor, arm))
}

fn access_for(ty: &Type, field_attrs: &attrs::AttrArgs) -> Access {
    if field_attrs.has_flag("skip") {
        Access::Skip
    } else if field_attrs.has_flag("nested") || !utils::is_type(ty, SCALAR_TYPES) {
        Access::Nested
    } else {
        Access::Scalar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{ImplItem, ItemImpl, parse_quote};

    fn expand_impl(input: &DeriveInput) -> ItemImpl {
        syn::parse2(expand(input).unwrap()).unwrap()
    }

    fn method_names(item: &ItemImpl) -> Vec<String> {
        item.items
            .iter()
            .filter_map(|item| match item {
                ImplItem::Fn(f) => Some(f.sig.ident.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn plain_struct_has_no_hook() {
        let input: DeriveInput = parse_quote! {
            struct Student {
                #[parser("username; Required")]
                name: String,
                number: i64,
            }
        };
        let item = expand_impl(&input);
        assert_eq!(method_names(&item), vec!["fields", "field_mut"]);
    }

    #[test]
    fn hooks_add_custom_hook() {
        let input: DeriveInput = parse_quote! {
            #[parser(hooks = student_hooks)]
            struct Student {
                number: i64,
            }
        };
        let item = expand_impl(&input);
        assert_eq!(
            method_names(&item),
            vec!["fields", "field_mut", "custom_hook"]
        );
    }

    #[test]
    fn access_is_inferred_from_type() {
        let skip = attrs::AttrArgs {
            items: vec![attrs::AttrItem::Flag(parse_quote!(skip))],
        };
        let nested = attrs::AttrArgs {
            items: vec![attrs::AttrItem::Flag(parse_quote!(nested))],
        };
        let none = attrs::AttrArgs::default();

        assert_eq!(access_for(&parse_quote!(u8), &none), Access::Scalar);
        assert_eq!(access_for(&parse_quote!(String), &none), Access::Scalar);
        assert_eq!(access_for(&parse_quote!(Address), &none), Access::Nested);
        assert_eq!(access_for(&parse_quote!(Vec<u8>), &skip), Access::Skip);
        assert_eq!(access_for(&parse_quote!(Id), &nested), Access::Nested);
    }

    #[test]
    fn hooks_on_generic_struct_is_an_error() {
        let input: DeriveInput = parse_quote! {
            #[parser(hooks = wrapper_hooks)]
            struct Wrapper<T> {
                inner: T,
            }
        };
        let err = expand(&input).unwrap_err();
        assert!(err.to_string().contains("generic structs"));
    }

    #[test]
    fn unknown_field_argument_is_an_error() {
        let input: DeriveInput = parse_quote! {
            struct Student {
                #[parser(optional)]
                name: String,
            }
        };
        let err = expand(&input).unwrap_err();
        assert!(err.to_string().contains("unknown `#[parser]` argument `optional`"));
    }

    #[test]
    fn every_bad_field_is_reported() {
        let input: DeriveInput = parse_quote! {
            struct Student {
                #[parser(optional)]
                name: String,
                #[parser("grade")]
                grade: String,
                #[parser("number", "n")]
                number: i64,
            }
        };
        let messages: Vec<String> = expand(&input)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(
            messages,
            vec![
                "unknown `#[parser]` argument `optional` on fields",
                "duplicate directive tag",
            ]
        );
    }
}
