use crate::utils::{ensure_struct_or_enum, name_or_ident};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, LitStr, Type};

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    ensure_struct_or_enum(input, "Query")?;

    let mut results: Vec<Type> = Vec::new();
    let mut name: Option<LitStr> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("query")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("result") {
                results.push(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("name") {
                if name.is_some() {
                    return Err(meta.error("duplicate 'name'"));
                }
                name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported key in #[query(...)], expected `result` or `name`"))
            }
        })?;
    }

    if results.is_empty() {
        return Err(syn::Error::new(
            input.ident.span(),
            "#[derive(Query)] requires at least one #[query(result = Type)]",
        ));
    }

    let ident = &input.ident;
    let name = name_or_ident(name, ident);
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let impls = results.iter().map(|r| {
        quote! {
            impl #impl_generics ::cqrs_application::query::Query<#r>
                for #ident #ty_generics #where_clause
            {
                const NAME: &'static str = #name;
            }
        }
    });

    Ok(quote! { #(#impls)* })
}
