//! 阻塞适配器（Blocking）
//!
//! 将异步协作者包装为对应的同步协作者：在调用方线程上驱动异步实现直至完成。
//! - `Blocking<S: CommandSenderAsync>` 实现 `CommandSender`；
//! - `Blocking<P: EventPublisherAsync>` 实现 `EventPublisher`；
//! - `Blocking<Q: QueryProcessorAsync>` 实现 `QueryProcessor`。
//!
//! 注意：不要在异步任务内部调用，否则会阻塞运行时的工作线程。
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
use futures_executor::block_on;
use std::sync::Arc;

/// 同步包装器，与异步实现共享同一份实例（及其注册表）
pub struct Blocking<T> {
    inner: Arc<T>,
}

impl<T> Blocking<T> {
    pub fn new(inner: Arc<T>) -> Self {
        Self { inner }
    }

    /// 被包装的异步实现
    pub fn inner(&self) -> &Arc<T> {
        &self.inner
    }
}

impl<T> Clone for Blocking<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S> CommandSender for Blocking<S>
where
    S: CommandSenderAsync,
{
    fn send<C>(&self, command: C) -> Result<(), AppError>
    where
        C: Command,
    {
        block_on(self.inner.send_async(command))
    }

    fn send_and_publish<C>(&self, command: C) -> Result<(), AppError>
    where
        C: Command,
    {
        block_on(self.inner.send_and_publish_async(command))
    }

    fn send_and_publish_domain<C, A>(&self, command: C) -> Result<(), AppError>
    where
        C: DomainCommand<A>,
        A: AggregateRoot,
    {
        block_on(self.inner.send_and_publish_domain_async::<C, A>(command))
    }
}

impl<P> EventPublisher for Blocking<P>
where
    P: EventPublisherAsync,
{
    fn publish<E>(&self, event: E) -> Result<(), AppError>
    where
        E: Event,
    {
        block_on(self.inner.publish_async(event))
    }
}

impl<Q> QueryProcessor for Blocking<Q>
where
    Q: QueryProcessorAsync,
{
    fn process<Qy, R>(&self, query: Qy) -> Result<R, AppError>
    where
        Qy: Query<R>,
        R: Send + 'static,
    {
        block_on(self.inner.process_async::<Qy, R>(query))
    }
}
