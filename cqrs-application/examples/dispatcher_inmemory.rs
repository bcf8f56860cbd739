use async_trait::async_trait;
use cqrs_application::command_handler::{CommandHandler, DomainCommandHandler};
use cqrs_application::error::AppError;
use cqrs_application::event_handler::EventHandler;
use cqrs_application::query_handler::QueryHandler;
use cqrs_application::{
    Blocking, Dispatcher, EventPublisherConfig, InMemoryCommandSender, InMemoryEventPublisher,
    InMemoryQueryProcessor,
};
use cqrs_macros::{AggregateRoot, Command, DomainCommand, Event, Query};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, AggregateRoot)]
#[aggregate_root(name = "user")]
struct User;

#[derive(Debug, Command, DomainCommand)]
#[domain_command(aggregate = User, id = user_id)]
struct RegisterUser {
    user_id: String,
    name: String,
}

#[derive(Debug, Command)]
struct Audit {
    note: String,
}

#[derive(Debug, Clone, Event)]
struct UserRegistered {
    user_id: String,
    name: String,
}

#[derive(Debug, Query)]
#[query(result = Option<String>)]
struct GetUserName {
    user_id: String,
}

#[derive(Default)]
struct Users(Mutex<HashMap<String, String>>);

struct RegisterUserHandler;

#[async_trait]
impl DomainCommandHandler<RegisterUser, User> for RegisterUserHandler {
    type Event = UserRegistered;

    async fn handle(&self, cmd: RegisterUser) -> Result<Vec<UserRegistered>, AppError> {
        if cmd.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".into()));
        }
        Ok(vec![UserRegistered {
            user_id: cmd.user_id,
            name: cmd.name,
        }])
    }
}

struct AuditHandler;

#[async_trait]
impl CommandHandler<Audit> for AuditHandler {
    async fn handle(&self, cmd: Audit) -> Result<(), AppError> {
        println!("audit: {}", cmd.note);
        Ok(())
    }
}

struct UsersProjection(Arc<Users>);

#[async_trait]
impl EventHandler<UserRegistered> for UsersProjection {
    async fn handle(&self, event: &UserRegistered) -> Result<(), AppError> {
        if let Ok(mut users) = self.0.0.lock() {
            users.insert(event.user_id.clone(), event.name.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl QueryHandler<GetUserName, Option<String>> for UsersProjection {
    async fn handle(&self, q: GetUserName) -> Result<Option<String>, AppError> {
        Ok(self
            .0
            .0
            .lock()
            .ok()
            .and_then(|users| users.get(&q.user_id).cloned()))
    }
}

type Sender = InMemoryCommandSender<InMemoryEventPublisher>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let users = Arc::new(Users::default());
    let projection = Arc::new(UsersProjection(users));

    let publisher = Arc::new(InMemoryEventPublisher::with_config(
        EventPublisherConfig::builder().fail_fast(true).build(),
    ));
    publisher.subscribe::<UserRegistered, _>(projection.clone());

    let sender: Arc<Sender> = Arc::new(InMemoryCommandSender::new(publisher.clone()));
    sender.register_domain::<RegisterUser, User, _>(Arc::new(RegisterUserHandler))?;
    sender.register::<Audit, _>(Arc::new(AuditHandler))?;

    let processor = Arc::new(InMemoryQueryProcessor::new());
    processor.register::<GetUserName, Option<String>, _>(projection)?;

    let dispatcher = Dispatcher::new(
        sender.clone(),
        Arc::new(Blocking::new(sender)),
        publisher.clone(),
        Arc::new(Blocking::new(publisher)),
        processor.clone(),
        Arc::new(Blocking::new(processor)),
    );

    dispatcher
        .send_async(Audit {
            note: "registration opened".into(),
        })
        .await?;
    dispatcher
        .send_and_publish_domain_async::<_, User>(RegisterUser {
            user_id: "u-1".into(),
            name: "Alice".into(),
        })
        .await?;

    let name = dispatcher
        .get_result_async::<_, Option<String>>(GetUserName {
            user_id: "u-1".into(),
        })
        .await?;
    println!("u-1 -> {name:?}");

    // 业务校验失败 -> 错误原样返回给调用方
    if let Err(AppError::Validation(reason)) = dispatcher
        .send_and_publish_domain_async::<_, User>(RegisterUser {
            user_id: "u-2".into(),
            name: "  ".into(),
        })
        .await
    {
        eprintln!("rejected as expected: {reason}");
    }

    // 没有注册普通处理器 -> HandlerNotFound
    if let Err(AppError::HandlerNotFound(name)) = dispatcher
        .send_and_publish_async(RegisterUser {
            user_id: "u-3".into(),
            name: "Eve".into(),
        })
        .await
    {
        eprintln!("HandlerNotFound as expected for command: {name}");
    }
    Ok(())
}
