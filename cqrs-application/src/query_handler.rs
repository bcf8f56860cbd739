use crate::{error::AppError, query::Query};
use async_trait::async_trait;

#[async_trait]
pub trait QueryHandler<Q, R>: Send + Sync
where
    Q: Query<R>,
    R: Send + 'static,
{
    async fn handle(&self, q: Q) -> Result<R, AppError>;
}
