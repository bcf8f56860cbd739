use crate::{
    command::{Command, DomainCommand},
    error::AppError,
};
use async_trait::async_trait;
use cqrs_domain::{aggregate_root::AggregateRoot, event::Event};

/// 命令处理器：只执行，不产生需要发布的事件
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Command,
{
    async fn handle(&self, cmd: C) -> Result<(), AppError>;
}

/// 带事件的命令处理器：执行后返回需要发布的事件
///
/// 多种事件可通过一个枚举类型表达。
#[async_trait]
pub trait CommandHandlerWithEvents<C>: Send + Sync
where
    C: Command,
{
    type Event: Event;

    async fn handle(&self, cmd: C) -> Result<Vec<Self::Event>, AppError>;
}

/// 领域命令处理器：针对聚合根 `A` 执行领域命令，返回产生的事件
#[async_trait]
pub trait DomainCommandHandler<C, A>: Send + Sync
where
    C: DomainCommand<A>,
    A: AggregateRoot,
{
    type Event: Event;

    async fn handle(&self, cmd: C) -> Result<Vec<Self::Event>, AppError>;
}
