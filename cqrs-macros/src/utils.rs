use syn::{Data, DeriveInput, Ident, LitStr, spanned::Spanned};

/// 消息类型只能是结构体或枚举
pub(crate) fn ensure_struct_or_enum(input: &DeriveInput, derive: &str) -> syn::Result<()> {
    match &input.data {
        Data::Struct(_) | Data::Enum(_) => Ok(()),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span(),
            format!("#[derive({derive})] supports only struct or enum"),
        )),
    }
}

/// 稳定名称：显式指定优先，否则取类型名
pub(crate) fn name_or_ident(name: Option<LitStr>, ident: &Ident) -> LitStr {
    name.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()))
}

/// 检查具名字段结构体是否包含指定字段
pub(crate) fn ensure_named_field(input: &DeriveInput, field: &Ident, derive: &str) -> syn::Result<()> {
    let fields = match &input.data {
        Data::Struct(st) => match &st.fields {
            syn::Fields::Named(named) => named,
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    format!("#[derive({derive})] supports only named-field struct"),
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                format!("#[derive({derive})] supports only struct"),
            ));
        }
    };

    let found = fields
        .named
        .iter()
        .any(|f| f.ident.as_ref().map(|i| i == field).unwrap_or(false));
    if found {
        Ok(())
    } else {
        Err(syn::Error::new(
            field.span(),
            format!("field `{field}` not found on `{}`", input.ident),
        ))
    }
}
