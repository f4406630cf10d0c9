//! Implementation of #[rpc_method] attribute macro

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, ItemFn, Meta, Pat, Result, ReturnType, Token, punctuated::Punctuated};

use crate::utils::{capitalize, extract_param_meta, is_option_type, is_result_type};

pub fn rpc_method_impl(args: Punctuated<Meta, Token![,]>, input: ItemFn) -> Result<TokenStream> {
    if let Some(arg) = args.first() {
        return Err(syn::Error::new_spanned(
            arg,
            "#[rpc_method] takes no arguments; the method name is chosen at registration",
        ));
    }

    let sig = &input.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "#[rpc_method] functions must be synchronous",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "#[rpc_method] functions cannot be generic",
        ));
    }

    let fn_name = &sig.ident;
    let fn_vis = &input.vis;
    let struct_name = format_ident!("{}Method", capitalize(&fn_name.to_string()));
    let impl_fn_name = format_ident!("{}_impl", fn_name);

    let mut param_specs = Vec::new();
    let mut param_extractions = Vec::new();
    let mut fn_call_args = Vec::new();

    for input_arg in &sig.inputs {
        let pat_type = match input_arg {
            FnArg::Typed(pat_type) => pat_type,
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "#[rpc_method] does not support `self`; implement RpcService for bound methods",
                ));
            }
        };
        let Pat::Ident(pat_ident) = pat_type.pat.as_ref() else {
            return Err(syn::Error::new_spanned(
                &pat_type.pat,
                "#[rpc_method] parameters must be plain identifiers",
            ));
        };

        let param_ident = &pat_ident.ident;
        let param_type = &pat_type.ty;
        let param_meta = extract_param_meta(&pat_type.attrs)?;
        let wire_name = param_meta.name.unwrap_or_else(|| {
            let name = param_ident.to_string();
            name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
        });

        let spec = match param_meta.default {
            Some(default) => quote! {
                ::json_rpc_dispatch::ParamSpec::optional(
                    #wire_name,
                    ::json_rpc_dispatch::serde_json::json!(#default),
                )
            },
            None if is_option_type(param_type) => quote! {
                ::json_rpc_dispatch::ParamSpec::optional(
                    #wire_name,
                    ::json_rpc_dispatch::serde_json::Value::Null,
                )
            },
            None => quote! { ::json_rpc_dispatch::ParamSpec::required(#wire_name) },
        };
        param_specs.push(spec);

        param_extractions.push(quote! {
            let #param_ident: #param_type = ::json_rpc_dispatch::serde_json::from_value(
                __rpc_args.next().unwrap_or(::json_rpc_dispatch::serde_json::Value::Null),
            )
            .map_err(|e| {
                ::json_rpc_dispatch::MethodError::invalid_params(
                    format!("Invalid parameter `{}`: {}", #wire_name, e),
                )
            })?;
        });
        fn_call_args.push(quote! { #param_ident });
    }

    let call = match &sig.output {
        ReturnType::Type(_, ty) if is_result_type(ty) => quote! {
            #impl_fn_name(#(#fn_call_args),*)
                .map_err(::core::convert::Into::<::json_rpc_dispatch::MethodError>::into)?
        },
        _ => quote! { #impl_fn_name(#(#fn_call_args),*) },
    };

    let args_binding = if param_extractions.is_empty() {
        quote! { let _ = __rpc_args; }
    } else {
        quote! { let mut __rpc_args = __rpc_args.into_iter(); }
    };

    // Keep the annotated function under a new name, without #[param] attributes
    let mut clean_input = input.clone();
    clean_input.sig.ident = impl_fn_name.clone();
    for input_arg in &mut clean_input.sig.inputs {
        if let FnArg::Typed(pat_type) = input_arg {
            pat_type.attrs.retain(|attr| !attr.path().is_ident("param"));
        }
    }

    let expanded = quote! {
        #clean_input

        #[derive(Debug, Clone, Copy, Default)]
        #fn_vis struct #struct_name;

        #[automatically_derived]
        impl ::json_rpc_dispatch::RpcMethod for #struct_name {
            fn params(&self) -> ::std::vec::Vec<::json_rpc_dispatch::ParamSpec> {
                ::std::vec![#(#param_specs),*]
            }

            fn invoke(
                &self,
                __rpc_args: ::std::vec::Vec<::json_rpc_dispatch::serde_json::Value>,
            ) -> ::json_rpc_dispatch::MethodResult {
                #args_binding
                #(#param_extractions)*
                let result = #call;
                ::json_rpc_dispatch::serde_json::to_value(result)
                    .map_err(::json_rpc_dispatch::MethodError::from)
            }
        }

        #fn_vis fn #fn_name() -> #struct_name {
            #struct_name
        }
    };

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn no_args() -> Punctuated<Meta, Token![,]> {
        Punctuated::new()
    }

    #[test]
    fn test_simple_function_method() {
        let input: ItemFn = parse_quote! {
            fn greet(name: String, #[param(default = "Hello")] greeting: String) -> String {
                format!("{}, {}!", greeting, name)
            }
        };

        let tokens = rpc_method_impl(no_args(), input).unwrap().to_string();
        assert!(tokens.contains("struct GreetMethod"));
        assert!(tokens.contains("fn greet_impl"));
        assert!(!tokens.contains("# [param"));
    }

    #[test]
    fn test_rejects_receiver() {
        let input: ItemFn = parse_quote! {
            fn bad(&self) -> i64 { 1 }
        };
        assert!(rpc_method_impl(no_args(), input).is_err());
    }

    #[test]
    fn test_rejects_async() {
        let input: ItemFn = parse_quote! {
            async fn bad() -> i64 { 1 }
        };
        assert!(rpc_method_impl(no_args(), input).is_err());
    }

    #[test]
    fn test_rejects_arguments() {
        let args: Punctuated<Meta, Token![,]> = parse_quote! { name = "x" };
        let input: ItemFn = parse_quote! {
            fn ok() -> i64 { 1 }
        };
        assert!(rpc_method_impl(args, input).is_err());
    }
}
