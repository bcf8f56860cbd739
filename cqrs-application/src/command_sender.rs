use crate::{
    command::{Command, DomainCommand},
    error::AppError,
};
use async_trait::async_trait;
use cqrs_domain::aggregate_root::AggregateRoot;

/// 命令发送器（异步）
///
/// - 负责根据命令的具体类型路由到唯一的处理器；
/// - `send_and_publish*` 在处理完成后发布处理器产生的事件；
/// - 该 trait 带有泛型方法，通常以具体实现类型注入使用。
#[async_trait]
pub trait CommandSenderAsync: Send + Sync {
    /// 发送命令到对应处理器
    async fn send_async<C>(&self, command: C) -> Result<(), AppError>
    where
        C: Command;

    /// 发送命令，并发布处理器返回的事件
    async fn send_and_publish_async<C>(&self, command: C) -> Result<(), AppError>
    where
        C: Command;

    /// 发送作用于聚合根 `A` 的领域命令，并发布产生的事件
    async fn send_and_publish_domain_async<C, A>(&self, command: C) -> Result<(), AppError>
    where
        C: DomainCommand<A>,
        A: AggregateRoot;
}

/// 命令发送器（同步）
///
/// 与 [`CommandSenderAsync`] 一一对应，在调用方线程上阻塞直至处理完成。
pub trait CommandSender: Send + Sync {
    fn send<C>(&self, command: C) -> Result<(), AppError>
    where
        C: Command;

    fn send_and_publish<C>(&self, command: C) -> Result<(), AppError>
    where
        C: Command;

    fn send_and_publish_domain<C, A>(&self, command: C) -> Result<(), AppError>
    where
        C: DomainCommand<A>,
        A: AggregateRoot;
}
