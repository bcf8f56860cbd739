use crate::utils::ensure_named_field;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{DeriveInput, Ident, Type};

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let mut aggregate: Option<Type> = None;
    let mut id_field: Option<Ident> = None;

    for attr in input
        .attrs
        .iter()
        .filter(|a| a.path().is_ident("domain_command"))
    {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("aggregate") {
                if aggregate.is_some() {
                    return Err(meta.error("duplicate 'aggregate'"));
                }
                aggregate = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("id") {
                if id_field.is_some() {
                    return Err(meta.error("duplicate 'id'"));
                }
                id_field = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported key in #[domain_command(...)], expected `aggregate` or `id`",
                ))
            }
        })?;
    }

    let Some(aggregate) = aggregate else {
        return Err(syn::Error::new(
            input.ident.span(),
            "#[derive(DomainCommand)] requires #[domain_command(aggregate = Type)]",
        ));
    };

    let id_field = id_field.unwrap_or_else(|| format_ident!("aggregate_root_id"));
    ensure_named_field(input, &id_field, "DomainCommand")?;

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::cqrs_application::command::DomainCommand<#aggregate>
            for #ident #ty_generics #where_clause
        {
            fn aggregate_root_id(&self) -> &str {
                ::std::convert::AsRef::<str>::as_ref(&self.#id_field)
            }
        }
    })
}
