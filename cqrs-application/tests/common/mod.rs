#![allow(dead_code)]

use async_trait::async_trait;
use cqrs_application::{
    Dispatcher,
    command::{Command, DomainCommand},
    command_sender::{CommandSender, CommandSenderAsync},
    error::AppError,
    event_publisher::{EventPublisher, EventPublisherAsync},
    query::Query,
    query_processor::{QueryProcessor, QueryProcessorAsync},
};
use cqrs_domain::{aggregate_root::AggregateRoot, event::Event};
use cqrs_macros::{AggregateRoot, Command, DomainCommand, Event, Query};
use std::any::Any;
use std::sync::{Arc, Mutex};

// ---- 消息 ----

#[derive(Debug, Clone, PartialEq, Eq, Command)]
pub struct CreateSomething {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Event)]
pub struct SomethingCreated {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Query)]
#[query(result = Arc<Something>)]
pub struct GetSomething {
    pub id: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Something {
    pub id: String,
    pub name: String,
}

#[derive(Debug, AggregateRoot)]
pub struct Aggregate;

/// 同时满足普通命令与领域命令能力
#[derive(Debug, Clone, PartialEq, Eq, Command, DomainCommand)]
#[domain_command(aggregate = Aggregate)]
pub struct CreateAggregate {
    pub aggregate_root_id: String,
}

pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

// ---- 记录桩 ----

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    CommandSenderAsync,
    CommandSender,
    EventPublisherAsync,
    EventPublisher,
    QueryProcessorAsync,
    QueryProcessor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    SendAsync,
    SendAndPublishAsync,
    SendAndPublishDomainAsync,
    Send,
    SendAndPublish,
    SendAndPublishDomain,
    PublishAsync,
    Publish,
    ProcessAsync,
    Process,
}

/// 所有桩共享的调用日志：记录 (角色, 方法, 聚合类型) 以及被转发的参数本身
#[derive(Default)]
pub struct Journal {
    entries: Mutex<Vec<Entry>>,
}

struct Entry {
    role: Role,
    call: Call,
    aggregate: Option<&'static str>,
    arg: Box<dyn Any + Send>,
}

impl Journal {
    fn record<T: Any + Send>(&self, role: Role, call: Call, aggregate: Option<&'static str>, arg: T) {
        self.entries.lock().unwrap().push(Entry {
            role,
            call,
            aggregate,
            arg: Box::new(arg),
        });
    }

    pub fn calls(&self) -> Vec<(Role, Call)> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| (e.role, e.call))
            .collect()
    }

    /// 第 `index` 次调用收到的参数
    pub fn arg<T: Any + Clone>(&self, index: usize) -> Option<T> {
        self.entries
            .lock()
            .unwrap()
            .get(index)
            .and_then(|e| e.arg.downcast_ref::<T>().cloned())
    }

    /// 第 `index` 次调用携带的聚合类型（仅领域命令）
    pub fn aggregate(&self, index: usize) -> Option<&'static str> {
        self.entries
            .lock()
            .unwrap()
            .get(index)
            .and_then(|e| e.aggregate)
    }
}

pub struct Stub {
    role: Role,
    journal: Arc<Journal>,
    failure: Mutex<Option<AppError>>,
    answer: Mutex<Option<Box<dyn Any + Send>>>,
}

impl Stub {
    pub fn new(role: Role, journal: Arc<Journal>) -> Self {
        Self {
            role,
            journal,
            failure: Mutex::new(None),
            answer: Mutex::new(None),
        }
    }

    /// 之后的每次调用都返回该错误
    pub fn fail_with(&self, err: AppError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    /// 下一次查询返回该值
    pub fn answer_with<R: Any + Send>(&self, value: R) {
        *self.answer.lock().unwrap() = Some(Box::new(value));
    }

    fn respond<T: Any + Send>(&self, call: Call, arg: T) -> Result<(), AppError> {
        self.respond_scoped(call, None, arg)
    }

    fn respond_scoped<T: Any + Send>(
        &self,
        call: Call,
        aggregate: Option<&'static str>,
        arg: T,
    ) -> Result<(), AppError> {
        self.journal.record(self.role, call, aggregate, arg);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn respond_domain<C: Any + Send, A: AggregateRoot>(
        &self,
        call: Call,
        command: C,
    ) -> Result<(), AppError> {
        self.respond_scoped(call, Some(A::TYPE), command)
    }

    fn answer<Q: Any + Send, R: Any + Send>(&self, call: Call, query: Q) -> Result<R, AppError> {
        self.respond(call, query)?;
        let answer = self.answer.lock().unwrap().take();
        match answer.map(|a| a.downcast::<R>()) {
            Some(Ok(value)) => Ok(*value),
            _ => Err(AppError::TypeMismatch {
                expected: std::any::type_name::<R>(),
                found: "no answer",
            }),
        }
    }
}

#[async_trait]
impl CommandSenderAsync for Stub {
    async fn send_async<C: Command>(&self, command: C) -> Result<(), AppError> {
        self.respond(Call::SendAsync, command)
    }

    async fn send_and_publish_async<C: Command>(&self, command: C) -> Result<(), AppError> {
        self.respond(Call::SendAndPublishAsync, command)
    }

    async fn send_and_publish_domain_async<C, A>(&self, command: C) -> Result<(), AppError>
    where
        C: DomainCommand<A>,
        A: AggregateRoot,
    {
        self.respond_domain::<C, A>(Call::SendAndPublishDomainAsync, command)
    }
}

impl CommandSender for Stub {
    fn send<C: Command>(&self, command: C) -> Result<(), AppError> {
        self.respond(Call::Send, command)
    }

    fn send_and_publish<C: Command>(&self, command: C) -> Result<(), AppError> {
        self.respond(Call::SendAndPublish, command)
    }

    fn send_and_publish_domain<C, A>(&self, command: C) -> Result<(), AppError>
    where
        C: DomainCommand<A>,
        A: AggregateRoot,
    {
        self.respond_domain::<C, A>(Call::SendAndPublishDomain, command)
    }
}

#[async_trait]
impl EventPublisherAsync for Stub {
    async fn publish_async<E: Event>(&self, event: E) -> Result<(), AppError> {
        self.respond(Call::PublishAsync, event)
    }
}

impl EventPublisher for Stub {
    fn publish<E: Event>(&self, event: E) -> Result<(), AppError> {
        self.respond(Call::Publish, event)
    }
}

#[async_trait]
impl QueryProcessorAsync for Stub {
    async fn process_async<Q, R>(&self, query: Q) -> Result<R, AppError>
    where
        Q: Query<R>,
        R: Send + 'static,
    {
        self.answer(Call::ProcessAsync, query)
    }
}

impl QueryProcessor for Stub {
    fn process<Q, R>(&self, query: Q) -> Result<R, AppError>
    where
        Q: Query<R>,
        R: Send + 'static,
    {
        self.answer(Call::Process, query)
    }
}

pub type StubDispatcher = Dispatcher<Stub, Stub, Stub, Stub, Stub, Stub>;

/// 六个协作者各自独立、共享同一份调用日志
pub struct Fixture {
    pub journal: Arc<Journal>,
    pub command_sender_async: Arc<Stub>,
    pub command_sender: Arc<Stub>,
    pub event_publisher_async: Arc<Stub>,
    pub event_publisher: Arc<Stub>,
    pub query_processor_async: Arc<Stub>,
    pub query_processor: Arc<Stub>,
    pub dispatcher: StubDispatcher,
}

impl Fixture {
    pub fn new() -> Self {
        let journal = Arc::new(Journal::default());
        let stub = |role| Arc::new(Stub::new(role, journal.clone()));

        let command_sender_async = stub(Role::CommandSenderAsync);
        let command_sender = stub(Role::CommandSender);
        let event_publisher_async = stub(Role::EventPublisherAsync);
        let event_publisher = stub(Role::EventPublisher);
        let query_processor_async = stub(Role::QueryProcessorAsync);
        let query_processor = stub(Role::QueryProcessor);

        let dispatcher = Dispatcher::new(
            command_sender_async.clone(),
            command_sender.clone(),
            event_publisher_async.clone(),
            event_publisher.clone(),
            query_processor_async.clone(),
            query_processor.clone(),
        );

        Self {
            journal,
            command_sender_async,
            command_sender,
            event_publisher_async,
            event_publisher,
            query_processor_async,
            query_processor,
            dispatcher,
        }
    }
}
