pub mod blocking;
pub mod command;
pub mod command_handler;
pub mod command_sender;
pub mod dispatcher;
pub mod error;
pub mod event_handler;
pub mod event_publisher;
pub mod inmemory_command_sender;
pub mod inmemory_event_publisher;
pub mod inmemory_query_processor;
pub mod query;
pub mod query_handler;
pub mod query_processor;

pub use blocking::Blocking;
pub use dispatcher::{Collaborator, Dispatcher, DispatcherBuilder, DispatcherError};
pub use inmemory_command_sender::InMemoryCommandSender;
pub use inmemory_event_publisher::{EventPublisherConfig, InMemoryEventPublisher};
pub use inmemory_query_processor::InMemoryQueryProcessor;

// 允许在本 crate 内部通过 ::cqrs_application 进行自引用，
// 以便派生宏在本 crate 的单元测试中也能解析到 ::cqrs_application 路径。
extern crate self as cqrs_application;
