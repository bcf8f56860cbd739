use crate::{
    error::AppError, query::Query, query_handler::QueryHandler,
    query_processor::QueryProcessorAsync,
};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;

type BoxAnySend = Box<dyn Any + Send>;

type QueryHandlerFn =
    Arc<dyn Fn(BoxAnySend) -> BoxFuture<'static, Result<BoxAnySend, AppError>> + Send + Sync>;

/// 基于内存的 QueryProcessor 实现
/// - 通过 TypeId 注册不同 Query 对应的 Handler
/// - 以类型擦除方式调度，并在调用端进行结果还原
pub struct InMemoryQueryProcessor {
    // 使用 (QueryTypeId, ResultTypeId) 作为键，避免相同 Query 不同返回类型的冲突
    handlers: DashMap<(TypeId, TypeId), (&'static str, QueryHandlerFn)>,
}

impl Default for InMemoryQueryProcessor {
    fn default() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }
}

impl InMemoryQueryProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册查询处理器
    pub fn register<Q, R, H>(&self, handler: Arc<H>) -> Result<(), AppError>
    where
        Q: Query<R>,
        R: Send + 'static,
        H: QueryHandler<Q, R> + 'static,
    {
        let key = (TypeId::of::<Q>(), TypeId::of::<R>());

        let f: QueryHandlerFn = Arc::new(move |boxed_q: BoxAnySend| {
            let handler = handler.clone();

            async move {
                match boxed_q.downcast::<Q>() {
                    Ok(q) => {
                        let out = handler.handle(*q).await?;
                        Ok(Box::new(out) as BoxAnySend)
                    }
                    Err(_) => Err(AppError::TypeMismatch {
                        expected: type_name::<Q>(),
                        found: "unknown",
                    }),
                }
            }
            .boxed()
        });

        match self.handlers.entry(key) {
            Entry::Occupied(_) => {
                return Err(AppError::AlreadyRegisteredQuery {
                    query: Q::NAME,
                    result: type_name::<R>(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert((Q::NAME, f));
            }
        }

        tracing::debug!(query = Q::NAME, result = type_name::<R>(), "query handler registered");
        Ok(())
    }

    /// 获取已注册的查询类型名列表（只读视图）
    pub fn registered_queries(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|e| e.value().0).collect()
    }
}

#[async_trait]
impl QueryProcessorAsync for InMemoryQueryProcessor {
    async fn process_async<Q, R>(&self, query: Q) -> Result<R, AppError>
    where
        Q: Query<R>,
        R: Send + 'static,
    {
        let key = (TypeId::of::<Q>(), TypeId::of::<R>());
        let Some(f) = self.handlers.get(&key).map(|h| h.value().1.clone()) else {
            tracing::warn!(query = Q::NAME, result = type_name::<R>(), "no handler registered for query");
            return Err(AppError::HandlerNotFound(Q::NAME));
        };

        let out = (f)(Box::new(query)).await?;

        match out.downcast::<R>() {
            Ok(result) => Ok(*result),
            Err(_) => Err(AppError::TypeMismatch {
                expected: type_name::<R>(),
                found: "unknown",
            }),
        }
    }
}
