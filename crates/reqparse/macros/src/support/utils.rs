use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Type};

/// Return named fields if the input is a struct that has them; otherwise error.
pub fn require_named_fields(input: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "Record can only be derived for structs",
            ));
        }
    };
    match fields {
        Fields::Named(n) => Ok(n),
        Fields::Unnamed(_) => Err(syn::Error::new(
            fields.span(),
            "Record requires a struct with named fields (e.g. `struct X { ... }`)",
        )),
        Fields::Unit => Err(syn::Error::new(
            fields.span(),
            "Record requires a non-unit struct with fields",
        )),
    }
}

/// Field name as written, without a raw-identifier prefix.
pub fn field_name(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_owned(),
        None => name,
    }
}

/// Whether the last path segment of `ty` is one of `names`.
pub fn is_type(ty: &Type, names: &[&str]) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| {
                segment.arguments.is_none() && names.iter().any(|name| segment.ident == *name)
            }),
        Type::Group(group) => is_type(&group.elem, names),
        Type::Paren(paren) => is_type(&paren.elem, names),
        _ => false,
    }
}
