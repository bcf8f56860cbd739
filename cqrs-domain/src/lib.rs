//! CQRS 领域层基础库（cqrs-domain）
//!
//! 定义各层共享的消息能力与最小必要的错误类型：
//! - 聚合根标记（`aggregate_root`）：领域命令所作用的一致性边界；
//! - 事件（`event`）：已经发生的事实，可被零个或多个订阅者处理；
//! - 领域错误（`error`）：处理器在执行业务规则时抛出的统一错误。
//!
//! 本 crate 不依赖任何运行时或传输实现，命令、查询与分发器位于应用层
//! （`cqrs-application`），派生宏位于 `cqrs-macros`。
//!
pub mod aggregate_root;
pub mod error;
pub mod event;

// 允许在本 crate 内部通过 ::cqrs_domain 进行自引用，
// 以便派生宏在本 crate 的单元测试中也能解析到 ::cqrs_domain 路径。
extern crate self as cqrs_domain;
