use crate::{error::AppError, event_handler::EventHandler, event_publisher::EventPublisherAsync};
use async_trait::async_trait;
use bon::Builder;
use cqrs_domain::event::Event;
use dashmap::DashMap;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::any::{Any, TypeId};
use std::sync::Arc;

type EventRef<'a> = &'a (dyn Any + Send + Sync);

type EventHandlerFn =
    Arc<dyn for<'a> Fn(EventRef<'a>) -> BoxFuture<'a, Result<(), AppError>> + Send + Sync>;

/// 内存事件发布器配置
#[derive(Builder, Clone, Debug)]
pub struct EventPublisherConfig {
    /// 某个订阅者失败时是否立即停止（默认 `true`）；
    /// 为 `false` 时仍会执行其余订阅者，最后返回第一个错误
    #[builder(default = true)]
    pub fail_fast: bool,
}

impl Default for EventPublisherConfig {
    fn default() -> Self {
        Self { fail_fast: true }
    }
}

/// 基于内存的 EventPublisher 实现
/// - 通过 TypeId 为每种事件登记任意数量的订阅者，按订阅顺序依次调用
/// - 运行时以类型擦除（Any）方式进行调度
pub struct InMemoryEventPublisher {
    handlers: DashMap<TypeId, Vec<(String, EventHandlerFn)>>,
    config: EventPublisherConfig,
}

impl Default for InMemoryEventPublisher {
    fn default() -> Self {
        Self::with_config(EventPublisherConfig::default())
    }
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EventPublisherConfig) -> Self {
        Self {
            handlers: DashMap::new(),
            config,
        }
    }

    /// 订阅事件
    pub fn subscribe<E, H>(&self, handler: Arc<H>)
    where
        E: Event,
        H: EventHandler<E> + 'static,
    {
        let name = handler.handler_name().to_string();

        let f = erase(move |event| {
            let handler = handler.clone();

            async move {
                // 键与闭包同一泛型 E，正常情况下 downcast 不会失败
                match event.downcast_ref::<E>() {
                    Some(e) => handler.handle(e).await,
                    None => Err(AppError::TypeMismatch {
                        expected: E::NAME,
                        found: "unknown",
                    }),
                }
            }
            .boxed()
        });

        tracing::debug!(event = E::NAME, handler = %name, "event handler subscribed");
        self.handlers
            .entry(TypeId::of::<E>())
            .or_default()
            .push((name, f));
    }

    /// 某类事件当前的订阅者数量
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.handlers
            .get(&TypeId::of::<E>())
            .map(|hs| hs.len())
            .unwrap_or(0)
    }
}

fn erase<F>(f: F) -> EventHandlerFn
where
    F: for<'a> Fn(EventRef<'a>) -> BoxFuture<'a, Result<(), AppError>> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[async_trait]
impl EventPublisherAsync for InMemoryEventPublisher {
    async fn publish_async<E: Event>(&self, event: E) -> Result<(), AppError> {
        // 先复制订阅者列表，避免跨 await 持有 DashMap 的读锁
        let handlers = match self.handlers.get(&TypeId::of::<E>()) {
            Some(hs) => hs.clone(),
            None => {
                tracing::debug!(event = E::NAME, "no subscribers, event dropped");
                return Ok(());
            }
        };

        let mut first_err = None;
        for (name, f) in handlers.iter() {
            if let Err(err) = (f)(&event).await {
                tracing::warn!(event = E::NAME, handler = %name, error = %err, "event handler failed");
                if self.config.fail_fast {
                    return Err(err);
                }
                first_err.get_or_insert(err);
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
