//! 分发器（Dispatcher）
//!
//! 为命令、事件与查询提供统一入口，覆盖 {命令, 事件, 查询} × {同步, 异步}
//! 以及命令的 {普通, 聚合作用域} 全部组合：
//!
//! | 方法 | 转发至 |
//! |---|---|
//! | `send_async` | `CommandSenderAsync::send_async` |
//! | `send_and_publish_async` | `CommandSenderAsync::send_and_publish_async` |
//! | `send_and_publish_domain_async` | `CommandSenderAsync::send_and_publish_domain_async` |
//! | `send` | `CommandSender::send` |
//! | `send_and_publish` | `CommandSender::send_and_publish` |
//! | `send_and_publish_domain` | `CommandSender::send_and_publish_domain` |
//! | `publish_async` | `EventPublisherAsync::publish_async` |
//! | `publish` | `EventPublisher::publish` |
//! | `get_result_async` | `QueryProcessorAsync::process_async` |
//! | `get_result` | `QueryProcessor::process` |
//!
//! 路由完全由调用的方法名与泛型参数静态决定，不检查消息的运行时值。
//! 分发器本身不重试、不记录日志、不转换结果或错误：协作者返回什么，调用方就得到什么。
//!
//! Rust 无法仅凭泛型参数个数重载方法，因此作用于聚合根的两参数版本使用 `_domain` 后缀：
//!
//! ```rust,ignore
//! dispatcher.send_and_publish(create_order.clone())?;                    // 普通命令路由
//! dispatcher.send_and_publish_domain::<_, Order>(create_order)?;         // 聚合作用域路由
//! let dto = dispatcher.get_result::<GetOrder, OrderDto>(get_order)?;
//! ```
//!
use crate::{
    command::{Command, DomainCommand},
    command_sender::{CommandSender, CommandSenderAsync},
    error::AppError,
    event_publisher::{EventPublisher, EventPublisherAsync},
    query::Query,
    query_processor::{QueryProcessor, QueryProcessorAsync},
};
use cqrs_domain::{aggregate_root::AggregateRoot, event::Event};
use futures_util::future::BoxFuture;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// 协作者角色，用于构造期的缺失报告
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collaborator {
    CommandSenderAsync,
    CommandSender,
    EventPublisherAsync,
    EventPublisher,
    QueryProcessorAsync,
    QueryProcessor,
}

impl Collaborator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CommandSenderAsync => "CommandSenderAsync",
            Self::CommandSender => "CommandSender",
            Self::EventPublisherAsync => "EventPublisherAsync",
            Self::EventPublisher => "EventPublisher",
            Self::QueryProcessorAsync => "QueryProcessorAsync",
            Self::QueryProcessor => "QueryProcessor",
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分发器构造错误
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatcherError {
    #[error("missing collaborator: {0}")]
    MissingCollaborator(Collaborator),
}

/// 统一分发器
///
/// - 构造后不可变，仅持有六个协作者的共享引用；
/// - `Clone` 只复制引用，可在多个任务间自由共享；
/// - 并发安全性与协作者一致，分发器自身不加锁、不串行化调用。
///
/// 协作者 trait 带有泛型方法，因此以具体类型参数注入，而非 trait 对象。
pub struct Dispatcher<CSA, CS, EPA, EP, QPA, QP> {
    command_sender_async: Arc<CSA>,
    command_sender: Arc<CS>,
    event_publisher_async: Arc<EPA>,
    event_publisher: Arc<EP>,
    query_processor_async: Arc<QPA>,
    query_processor: Arc<QP>,
}

impl<CSA, CS, EPA, EP, QPA, QP> Clone for Dispatcher<CSA, CS, EPA, EP, QPA, QP> {
    fn clone(&self) -> Self {
        Self {
            command_sender_async: self.command_sender_async.clone(),
            command_sender: self.command_sender.clone(),
            event_publisher_async: self.event_publisher_async.clone(),
            event_publisher: self.event_publisher.clone(),
            query_processor_async: self.query_processor_async.clone(),
            query_processor: self.query_processor.clone(),
        }
    }
}

impl<CSA, CS, EPA, EP, QPA, QP> Dispatcher<CSA, CS, EPA, EP, QPA, QP>
where
    CSA: CommandSenderAsync,
    CS: CommandSender,
    EPA: EventPublisherAsync,
    EP: EventPublisher,
    QPA: QueryProcessorAsync,
    QP: QueryProcessor,
{
    /// 以全部六个协作者创建分发器
    pub fn new(
        command_sender_async: Arc<CSA>,
        command_sender: Arc<CS>,
        event_publisher_async: Arc<EPA>,
        event_publisher: Arc<EP>,
        query_processor_async: Arc<QPA>,
        query_processor: Arc<QP>,
    ) -> Self {
        tracing::debug!(
            command_sender_async = type_name::<CSA>(),
            command_sender = type_name::<CS>(),
            event_publisher_async = type_name::<EPA>(),
            event_publisher = type_name::<EP>(),
            query_processor_async = type_name::<QPA>(),
            query_processor = type_name::<QP>(),
            "dispatcher wired"
        );

        Self {
            command_sender_async,
            command_sender,
            event_publisher_async,
            event_publisher,
            query_processor_async,
            query_processor,
        }
    }

    // --- 命令（异步） ---

    /// 返回协作者的完成句柄本身，分发器不引入额外的挂起点
    pub fn send_async<C>(&self, command: C) -> BoxFuture<'_, Result<(), AppError>>
    where
        C: Command,
    {
        self.command_sender_async.send_async(command)
    }

    pub fn send_and_publish_async<C>(&self, command: C) -> BoxFuture<'_, Result<(), AppError>>
    where
        C: Command,
    {
        self.command_sender_async.send_and_publish_async(command)
    }

    pub fn send_and_publish_domain_async<C, A>(
        &self,
        command: C,
    ) -> BoxFuture<'_, Result<(), AppError>>
    where
        C: DomainCommand<A>,
        A: AggregateRoot,
    {
        self.command_sender_async
            .send_and_publish_domain_async::<C, A>(command)
    }

    // --- 命令（同步） ---

    pub fn send<C>(&self, command: C) -> Result<(), AppError>
    where
        C: Command,
    {
        self.command_sender.send(command)
    }

    pub fn send_and_publish<C>(&self, command: C) -> Result<(), AppError>
    where
        C: Command,
    {
        self.command_sender.send_and_publish(command)
    }

    pub fn send_and_publish_domain<C, A>(&self, command: C) -> Result<(), AppError>
    where
        C: DomainCommand<A>,
        A: AggregateRoot,
    {
        self.command_sender.send_and_publish_domain::<C, A>(command)
    }

    // --- 事件 ---

    pub fn publish_async<E>(&self, event: E) -> BoxFuture<'_, Result<(), AppError>>
    where
        E: Event,
    {
        self.event_publisher_async.publish_async(event)
    }

    pub fn publish<E>(&self, event: E) -> Result<(), AppError>
    where
        E: Event,
    {
        self.event_publisher.publish(event)
    }

    // --- 查询 ---

    pub fn get_result_async<Q, R>(&self, query: Q) -> BoxFuture<'_, Result<R, AppError>>
    where
        Q: Query<R>,
        R: Send + 'static,
    {
        self.query_processor_async.process_async::<Q, R>(query)
    }

    pub fn get_result<Q, R>(&self, query: Q) -> Result<R, AppError>
    where
        Q: Query<R>,
        R: Send + 'static,
    {
        self.query_processor.process::<Q, R>(query)
    }
}

#[bon::bon]
impl<CSA, CS, EPA, EP, QPA, QP> Dispatcher<CSA, CS, EPA, EP, QPA, QP>
where
    CSA: CommandSenderAsync,
    CS: CommandSender,
    EPA: EventPublisherAsync,
    EP: EventPublisher,
    QPA: QueryProcessorAsync,
    QP: QueryProcessor,
{
    /// 逐项设置协作者（`Dispatcher::builder()`）
    ///
    /// 用于协作者来自可选装配（配置开关、插件等）的场景：`maybe_*` 接受 `Option`，
    /// `build` 按构造参数顺序检查，任何一项缺失时返回
    /// [`DispatcherError::MissingCollaborator`]，不会产生半装配的分发器。
    #[builder(builder_type = DispatcherBuilder, start_fn = builder, finish_fn = build)]
    pub fn try_new(
        command_sender_async: Option<Arc<CSA>>,
        command_sender: Option<Arc<CS>>,
        event_publisher_async: Option<Arc<EPA>>,
        event_publisher: Option<Arc<EP>>,
        query_processor_async: Option<Arc<QPA>>,
        query_processor: Option<Arc<QP>>,
    ) -> Result<Self, DispatcherError> {
        use DispatcherError::MissingCollaborator as Missing;

        Ok(Self::new(
            command_sender_async.ok_or(Missing(Collaborator::CommandSenderAsync))?,
            command_sender.ok_or(Missing(Collaborator::CommandSender))?,
            event_publisher_async.ok_or(Missing(Collaborator::EventPublisherAsync))?,
            event_publisher.ok_or(Missing(Collaborator::EventPublisher))?,
            query_processor_async.ok_or(Missing(Collaborator::QueryProcessorAsync))?,
            query_processor.ok_or(Missing(Collaborator::QueryProcessor))?,
        ))
    }
}
