//! CQRS 消息能力派生宏
//!
//! - `#[derive(Command)]`：实现 `::cqrs_application::command::Command`
//! - `#[derive(DomainCommand)]`：实现 `::cqrs_application::command::DomainCommand<A>`
//! - `#[derive(Query)]`：为每个 `result` 实现 `::cqrs_application::query::Query<R>`
//! - `#[derive(Event)]`：实现 `::cqrs_domain::event::Event`
//! - `#[derive(AggregateRoot)]`：实现 `::cqrs_domain::aggregate_root::AggregateRoot`
//!
//! 稳定名称默认取类型名，可通过 `name = "..."` 覆写。
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod domain_command;
mod message;
mod query;
mod utils;

/// 命令派生
/// - 支持参数：`#[command(name = "...")]`，默认使用类型名
#[proc_macro_derive(Command, attributes(command))]
pub fn derive_command(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    message::expand(
        &input,
        message::Capability {
            derive: "Command",
            attr: "command",
            trait_path: quote::quote!(::cqrs_application::command::Command),
            const_ident: quote::format_ident!("NAME"),
        },
    )
    .unwrap_or_else(syn::Error::into_compile_error)
    .into()
}

/// 事件派生
/// - 支持参数：`#[event(name = "...")]`，默认使用类型名
#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    message::expand(
        &input,
        message::Capability {
            derive: "Event",
            attr: "event",
            trait_path: quote::quote!(::cqrs_domain::event::Event),
            const_ident: quote::format_ident!("NAME"),
        },
    )
    .unwrap_or_else(syn::Error::into_compile_error)
    .into()
}

/// 聚合根派生
/// - 支持参数：`#[aggregate_root(name = "...")]`，作为 `AggregateRoot::TYPE`，默认使用类型名
#[proc_macro_derive(AggregateRoot, attributes(aggregate_root))]
pub fn derive_aggregate_root(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    message::expand(
        &input,
        message::Capability {
            derive: "AggregateRoot",
            attr: "aggregate_root",
            trait_path: quote::quote!(::cqrs_domain::aggregate_root::AggregateRoot),
            const_ident: quote::format_ident!("TYPE"),
        },
    )
    .unwrap_or_else(syn::Error::into_compile_error)
    .into()
}

/// 领域命令派生（仅具名字段结构体）
/// - 必填：`aggregate = Type`，命令作用的聚合根类型
/// - 可选：`id = field`，聚合根标识字段（需可借用为 `&str`），默认 `aggregate_root_id`
///
/// 需要同时实现（或派生）`Command`。
#[proc_macro_derive(DomainCommand, attributes(domain_command))]
pub fn derive_domain_command(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    domain_command::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 查询派生
/// - 必填：至少一个 `#[query(result = Type)]`，可重复以支持多个结果类型
/// - 可选：`name = "..."`，默认使用类型名
#[proc_macro_derive(Query, attributes(query))]
pub fn derive_query(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    query::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
