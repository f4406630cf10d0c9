//! Shared helpers for the attribute macros

use syn::{Attribute, Expr, Lit, Meta, Result, Token, punctuated::Punctuated};

/// Metadata collected from `#[param(...)]`
#[derive(Default)]
pub struct ParamMeta {
    pub name: Option<String>,
    pub default: Option<Expr>,
}

pub fn extract_param_meta(attrs: &[Attribute]) -> Result<ParamMeta> {
    let mut meta = ParamMeta::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("param")) {
        let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        for item in nested {
            match item {
                Meta::NameValue(nv) if nv.path.is_ident("default") => {
                    meta.default = Some(nv.value);
                }
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    if let Expr::Lit(expr_lit) = &nv.value
                        && let Lit::Str(s) = &expr_lit.lit
                    {
                        meta.name = Some(s.value());
                    } else {
                        return Err(syn::Error::new_spanned(
                            &nv.value,
                            "`name` must be a string literal",
                        ));
                    }
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected `default = <expr>` or `name = \"...\"`",
                    ));
                }
            }
        }
    }

    Ok(meta)
}

/// Convert snake_case to PascalCase
pub fn capitalize(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    let mut result = first.to_uppercase().collect::<String>();
                    result.push_str(&chars.collect::<String>().to_lowercase());
                    result
                }
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Check if a type is Option<T>
pub fn is_option_type(ty: &syn::Type) -> bool {
    if let syn::Type::Path(type_path) = ty
        && type_path.qself.is_none()
        && let Some(last) = type_path.path.segments.last()
    {
        last.ident == "Option"
            && matches!(last.arguments, syn::PathArguments::AngleBracketed(_))
    } else {
        false
    }
}

/// Check if a return type is Result<T, E> (by last path segment)
pub fn is_result_type(ty: &syn::Type) -> bool {
    if let syn::Type::Path(type_path) = ty
        && let Some(last) = type_path.path.segments.last()
    {
        last.ident == "Result" || last.ident == "MethodResult"
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize("get_user_name"), "GetUserName");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_option_detection() {
        assert!(is_option_type(&parse_quote!(Option<String>)));
        assert!(is_option_type(&parse_quote!(std::option::Option<i64>)));
        assert!(!is_option_type(&parse_quote!(String)));
        assert!(!is_option_type(&parse_quote!(Vec<Option<i64>>)));
    }

    #[test]
    fn test_result_detection() {
        assert!(is_result_type(&parse_quote!(Result<i64, MethodError>)));
        assert!(is_result_type(&parse_quote!(MethodResult)));
        assert!(!is_result_type(&parse_quote!(i64)));
    }

    #[test]
    fn test_extract_param_meta() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[param(default = "c", name = "wire")])];
        let meta = extract_param_meta(&attrs).unwrap();
        assert_eq!(meta.name.as_deref(), Some("wire"));
        assert!(meta.default.is_some());

        let attrs: Vec<Attribute> = vec![parse_quote!(#[param(description = "x")])];
        assert!(extract_param_meta(&attrs).is_err());
    }
}
