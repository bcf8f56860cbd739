use cqrs_domain::aggregate_root::AggregateRoot;

/// 应用层命令（Command）
///
/// 表达“意图”的写操作请求，通常会修改领域状态，并由唯一的处理器处理。
/// - 不返回业务数据，仅表达执行结果（成功/失败）。
/// - 与 [`Query`](crate::query::Query) 相对，`Command` 应避免读写混用。
/// - 建议保持语义化的“动宾结构”命名，如 `CreateUser`、`CloseOrder`。
///
/// 关联常量：
/// - `NAME`：命令的稳定名称，用于日志、追踪与路由。避免依赖 `type_name::<T>()`。
pub trait Command: Send + Sync + 'static {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;
}

/// 领域命令（DomainCommand）
///
/// 在 [`Command`] 之上额外声明其作用的聚合根类型 `A`。
/// 同一个命令类型可以同时作为普通命令与领域命令分发，
/// 具体走哪条路由完全由调用处选择的方法与泛型参数决定。
pub trait DomainCommand<A>: Command
where
    A: AggregateRoot,
{
    /// 目标聚合根标识
    fn aggregate_root_id(&self) -> &str;
}
