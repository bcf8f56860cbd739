use crate::{error::AppError, query::Query};
use async_trait::async_trait;

/// 查询处理器（异步）
///
/// - 按 (查询类型, 结果类型) 路由到唯一的处理器；
/// - 对外返回处理器产生的结果，不做任何转换。
#[async_trait]
pub trait QueryProcessorAsync: Send + Sync {
    async fn process_async<Q, R>(&self, query: Q) -> Result<R, AppError>
    where
        Q: Query<R>,
        R: Send + 'static;
}

/// 查询处理器（同步）
pub trait QueryProcessor: Send + Sync {
    fn process<Q, R>(&self, query: Q) -> Result<R, AppError>
    where
        Q: Query<R>,
        R: Send + 'static;
}
