//! 聚合根（AggregateRoot）能力标记
//!
//! 聚合根代表一个一致性边界。领域命令通过泛型参数声明其作用的聚合根类型，
//! 分发器仅在泛型层面传递该类型，从不检查或修改聚合本身。
//!

/// 聚合根标记
///
/// 关联常量：
/// - `TYPE`：聚合类型的稳定名称，用于日志、追踪与路由。避免依赖 `type_name::<T>()`。
///
/// 可通过 `#[derive(AggregateRoot)]`（见 `cqrs-macros`）自动实现。
pub trait AggregateRoot: Send + Sync + 'static {
    /// 聚合类型的稳定名称（建议常量字符串，不随重构变化）
    const TYPE: &'static str;
}
