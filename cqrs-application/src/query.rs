/// 应用层查询（Query）
///
/// 表达只读意图，不改变领域状态，并由唯一的处理器处理。
/// - 以结果类型 `R` 参数化：同一查询类型可为多个结果类型分别实现 `Query<R>`；
/// - 与 [`Command`](crate::command::Command) 相对，`Query` 应避免副作用；
/// - 可按 CQRS 将写/读分离，查询可直连读模型或投影存储。
pub trait Query<R>: Send + Sync + 'static
where
    R: Send + 'static,
{
    /// 查询的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;
}
