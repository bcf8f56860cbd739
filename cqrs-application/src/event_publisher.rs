use crate::error::AppError;
use async_trait::async_trait;
use cqrs_domain::event::Event;

/// 事件发布器（异步）
///
/// 将事件投递给零个或多个订阅者；没有订阅者时视为成功。
#[async_trait]
pub trait EventPublisherAsync: Send + Sync {
    async fn publish_async<E>(&self, event: E) -> Result<(), AppError>
    where
        E: Event;
}

/// 事件发布器（同步）
pub trait EventPublisher: Send + Sync {
    fn publish<E>(&self, event: E) -> Result<(), AppError>
    where
        E: Event;
}
