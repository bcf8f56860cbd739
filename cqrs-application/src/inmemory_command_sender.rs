use crate::{
    command::{Command, DomainCommand},
    command_handler::{CommandHandler, CommandHandlerWithEvents, DomainCommandHandler},
    command_sender::CommandSenderAsync,
    error::AppError,
    event_publisher::EventPublisherAsync,
};
use async_trait::async_trait;
use cqrs_domain::{aggregate_root::AggregateRoot, error::DomainError, event::Event};
use dashmap::DashMap;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::any::{Any, TypeId};
use std::sync::Arc;

type CmdHandlerFn =
    Arc<dyn Fn(Box<dyn Any + Send>) -> BoxFuture<'static, Result<(), AppError>> + Send + Sync>;

/// 基于内存的 CommandSender 实现
/// - 通过 TypeId 注册不同 Command 对应的 Handler，每种命令只能有一个处理器
/// - 领域命令以 (命令类型, 聚合类型) 作为键
/// - `send_and_publish*` 将处理器返回的事件依次交给注入的发布器
/// - 运行时以类型擦除（Any）方式进行调度
pub struct InMemoryCommandSender<P> {
    publisher: Arc<P>,
    handlers: DashMap<TypeId, (&'static str, CmdHandlerFn)>,
    handlers_with_events: DashMap<TypeId, (&'static str, CmdHandlerFn)>,
    domain_handlers: DashMap<(TypeId, TypeId), (&'static str, CmdHandlerFn)>,
}

impl<P> InMemoryCommandSender<P>
where
    P: EventPublisherAsync + 'static,
{
    pub fn new(publisher: Arc<P>) -> Self {
        Self {
            publisher,
            handlers: DashMap::new(),
            handlers_with_events: DashMap::new(),
            domain_handlers: DashMap::new(),
        }
    }

    /// 注册命令处理器（`send_async` 使用）
    pub fn register<C, H>(&self, handler: Arc<H>) -> Result<(), AppError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let f: CmdHandlerFn = Arc::new(move |boxed_cmd: Box<dyn Any + Send>| {
            let handler = handler.clone();

            async move {
                let cmd = downcast::<C>(boxed_cmd)?;
                handler.handle(cmd).await
            }
            .boxed()
        });

        insert_unique(&self.handlers, TypeId::of::<C>(), C::NAME, f)?;
        tracing::debug!(command = C::NAME, "command handler registered");
        Ok(())
    }

    /// 注册带事件的命令处理器（`send_and_publish_async` 使用）
    pub fn register_with_events<C, H>(&self, handler: Arc<H>) -> Result<(), AppError>
    where
        C: Command,
        H: CommandHandlerWithEvents<C> + 'static,
    {
        let publisher = self.publisher.clone();

        let f: CmdHandlerFn = Arc::new(move |boxed_cmd: Box<dyn Any + Send>| {
            let handler = handler.clone();
            let publisher = publisher.clone();

            async move {
                let cmd = downcast::<C>(boxed_cmd)?;
                let events = handler.handle(cmd).await?;
                publish_all(publisher.as_ref(), C::NAME, events).await
            }
            .boxed()
        });

        insert_unique(&self.handlers_with_events, TypeId::of::<C>(), C::NAME, f)?;
        tracing::debug!(command = C::NAME, "command handler with events registered");
        Ok(())
    }

    /// 注册作用于聚合根 `A` 的领域命令处理器（`send_and_publish_domain_async` 使用）
    pub fn register_domain<C, A, H>(&self, handler: Arc<H>) -> Result<(), AppError>
    where
        C: DomainCommand<A>,
        A: AggregateRoot,
        H: DomainCommandHandler<C, A> + 'static,
    {
        let publisher = self.publisher.clone();

        let f: CmdHandlerFn = Arc::new(move |boxed_cmd: Box<dyn Any + Send>| {
            let handler = handler.clone();
            let publisher = publisher.clone();

            async move {
                let cmd = downcast::<C>(boxed_cmd)?;
                let aggregate_root_id = cmd.aggregate_root_id().to_string();
                if aggregate_root_id.trim().is_empty() {
                    tracing::warn!(command = C::NAME, aggregate = A::TYPE, "blank aggregate root id");
                    return Err(DomainError::InvalidAggregateId(format!(
                        "{} '{}'",
                        A::TYPE,
                        aggregate_root_id
                    ))
                    .into());
                }
                let events = handler.handle(cmd).await?;
                tracing::debug!(
                    command = C::NAME,
                    aggregate = A::TYPE,
                    aggregate_root_id = %aggregate_root_id,
                    events = events.len(),
                    "domain command handled"
                );
                publish_all(publisher.as_ref(), C::NAME, events).await
            }
            .boxed()
        });

        let key = (TypeId::of::<C>(), TypeId::of::<A>());
        insert_unique(&self.domain_handlers, key, C::NAME, f)?;
        tracing::debug!(
            command = C::NAME,
            aggregate = A::TYPE,
            "domain command handler registered"
        );
        Ok(())
    }

    /// 获取已注册的命令名列表（只读视图，包含三类处理器）
    ///
    /// 按名称排序，同一命令注册在多个注册表中时只出现一次。
    pub fn registered_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .handlers
            .iter()
            .map(|e| e.value().0)
            .chain(self.handlers_with_events.iter().map(|e| e.value().0))
            .chain(self.domain_handlers.iter().map(|e| e.value().0))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    fn resolve<K>(
        registry: &DashMap<K, (&'static str, CmdHandlerFn)>,
        key: &K,
        command: &'static str,
    ) -> Result<CmdHandlerFn, AppError>
    where
        K: Eq + std::hash::Hash,
    {
        match registry.get(key).map(|h| h.value().1.clone()) {
            Some(f) => Ok(f),
            None => {
                tracing::warn!(command, "no handler registered for command");
                Err(AppError::HandlerNotFound(command))
            }
        }
    }
}

fn insert_unique<K>(
    registry: &DashMap<K, (&'static str, CmdHandlerFn)>,
    key: K,
    command: &'static str,
    f: CmdHandlerFn,
) -> Result<(), AppError>
where
    K: Eq + std::hash::Hash,
{
    use dashmap::mapref::entry::Entry;

    match registry.entry(key) {
        Entry::Occupied(_) => Err(AppError::AlreadyRegisteredCommand { command }),
        Entry::Vacant(slot) => {
            slot.insert((command, f));
            Ok(())
        }
    }
}

fn downcast<C: Command>(boxed_cmd: Box<dyn Any + Send>) -> Result<C, AppError> {
    // 正常情况下这里的 downcast 永远不会失败（键与闭包同一泛型 C）
    boxed_cmd
        .downcast::<C>()
        .map(|cmd| *cmd)
        .map_err(|_| AppError::TypeMismatch {
            expected: C::NAME,
            found: "unknown",
        })
}

async fn publish_all<P, E>(publisher: &P, command: &'static str, events: Vec<E>) -> Result<(), AppError>
where
    P: EventPublisherAsync,
    E: Event,
{
    for event in events {
        if let Err(err) = publisher.publish_async(event).await {
            tracing::warn!(command, event = E::NAME, error = %err, "publishing resulting event failed");
            return Err(err);
        }
    }
    Ok(())
}

#[async_trait]
impl<P> CommandSenderAsync for InMemoryCommandSender<P>
where
    P: EventPublisherAsync + 'static,
{
    async fn send_async<C: Command>(&self, command: C) -> Result<(), AppError> {
        let f = Self::resolve(&self.handlers, &TypeId::of::<C>(), C::NAME)?;
        (f)(Box::new(command)).await
    }

    async fn send_and_publish_async<C: Command>(&self, command: C) -> Result<(), AppError> {
        let f = Self::resolve(&self.handlers_with_events, &TypeId::of::<C>(), C::NAME)?;
        (f)(Box::new(command)).await
    }

    async fn send_and_publish_domain_async<C, A>(&self, command: C) -> Result<(), AppError>
    where
        C: DomainCommand<A>,
        A: AggregateRoot,
    {
        let key = (TypeId::of::<C>(), TypeId::of::<A>());
        let f = Self::resolve(&self.domain_handlers, &key, C::NAME)?;
        (f)(Box::new(command)).await
    }
}
