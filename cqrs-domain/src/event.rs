//! 事件（Event）能力
//!
//! 事件表达“已经发生的事实”，由发布器投递给零个或多个订阅者。
//! 与领域命令不同，事件与聚合根之间不存在泛型上的关联。
//!

/// 事件
///
/// - 命名建议使用过去式，如 `OrderPlaced`、`UserRenamed`；
/// - `NAME` 为事件的稳定名称，用于日志、追踪与订阅匹配；
/// - 发布器以引用方式将事件交给每个订阅者，因此无需 `Clone`。
pub trait Event: Send + Sync + 'static {
    /// 事件的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;
}
