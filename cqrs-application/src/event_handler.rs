use crate::error::AppError;
use async_trait::async_trait;
use cqrs_domain::event::Event;

/// 事件处理器：消费某一类型的事件
#[async_trait]
pub trait EventHandler<E>: Send + Sync
where
    E: Event,
{
    /// 处理器名称（用于日志与失败定位）
    fn handler_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn handle(&self, event: &E) -> Result<(), AppError>;
}
