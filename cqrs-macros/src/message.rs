use crate::utils::{ensure_struct_or_enum, name_or_ident};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Ident, LitStr};

/// 单一常量名称的能力（Command / Event / AggregateRoot）
pub(crate) struct Capability {
    /// 派生名，用于错误提示
    pub derive: &'static str,
    /// 辅助属性名，例如 `command`
    pub attr: &'static str,
    pub trait_path: TokenStream2,
    /// 实现的关联常量，`NAME` 或 `TYPE`
    pub const_ident: Ident,
}

pub(crate) fn expand(input: &DeriveInput, cap: Capability) -> syn::Result<TokenStream2> {
    ensure_struct_or_enum(input, cap.derive)?;

    let mut name: Option<LitStr> = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident(cap.attr)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                if name.is_some() {
                    return Err(meta.error("duplicate 'name'"));
                }
                name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error(format!("unsupported key in #[{}(...)], expected `name`", cap.attr)))
            }
        })?;
    }

    let ident = &input.ident;
    let name = name_or_ident(name, ident);
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let trait_path = &cap.trait_path;
    let const_ident = &cap.const_ident;

    Ok(quote! {
        impl #impl_generics #trait_path for #ident #ty_generics #where_clause {
            const #const_ident: &'static str = #name;
        }
    })
}
