use async_trait::async_trait;
use cqrs_application::command_handler::CommandHandlerWithEvents;
use cqrs_application::error::AppError;
use cqrs_application::event_handler::EventHandler;
use cqrs_application::query_handler::QueryHandler;
use cqrs_application::{
    Blocking, Collaborator, Dispatcher, DispatcherError, InMemoryCommandSender,
    InMemoryEventPublisher, InMemoryQueryProcessor,
};
use cqrs_macros::{Command, Event, Query};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Command)]
struct Deposit {
    amount: u64,
}

#[derive(Debug, Event)]
struct Deposited {
    amount: u64,
}

#[derive(Debug, Query)]
#[query(result = u64)]
struct GetBalance;

struct DepositHandler;

#[async_trait]
impl CommandHandlerWithEvents<Deposit> for DepositHandler {
    type Event = Deposited;

    async fn handle(&self, cmd: Deposit) -> Result<Vec<Deposited>, AppError> {
        Ok(vec![Deposited { amount: cmd.amount }])
    }
}

struct Balance(AtomicU64);

#[async_trait]
impl EventHandler<Deposited> for Balance {
    async fn handle(&self, event: &Deposited) -> Result<(), AppError> {
        self.0.fetch_add(event.amount, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl QueryHandler<GetBalance, u64> for Balance {
    async fn handle(&self, _q: GetBalance) -> Result<u64, AppError> {
        Ok(self.0.load(Ordering::SeqCst))
    }
}

type Sender = InMemoryCommandSender<InMemoryEventPublisher>;
type BankDispatcher = Dispatcher<
    Sender,
    Blocking<Sender>,
    InMemoryEventPublisher,
    Blocking<InMemoryEventPublisher>,
    InMemoryQueryProcessor,
    Blocking<InMemoryQueryProcessor>,
>;

// 不需要异步运行时：同步操作由 Blocking 在当前线程驱动
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let balance = Arc::new(Balance(AtomicU64::new(0)));

    let publisher = Arc::new(InMemoryEventPublisher::new());
    publisher.subscribe::<Deposited, _>(balance.clone());

    let sender = Arc::new(InMemoryCommandSender::new(publisher.clone()));
    sender.register_with_events::<Deposit, _>(Arc::new(DepositHandler))?;

    let processor = Arc::new(InMemoryQueryProcessor::new());
    processor.register::<GetBalance, u64, _>(balance)?;

    // 漏配协作者 -> 构建失败
    let incomplete = BankDispatcher::builder()
        .command_sender_async(sender.clone())
        .build();
    if let Err(DispatcherError::MissingCollaborator(Collaborator::CommandSender)) = incomplete {
        eprintln!("builder rejected incomplete wiring as expected");
    }

    let dispatcher = BankDispatcher::builder()
        .command_sender_async(sender.clone())
        .command_sender(Arc::new(Blocking::new(sender)))
        .event_publisher_async(publisher.clone())
        .event_publisher(Arc::new(Blocking::new(publisher)))
        .query_processor_async(processor.clone())
        .query_processor(Arc::new(Blocking::new(processor)))
        .build()?;

    dispatcher.send_and_publish(Deposit { amount: 100 })?;
    dispatcher.send_and_publish(Deposit { amount: 25 })?;
    dispatcher.publish(Deposited { amount: 5 })?;

    let balance = dispatcher.get_result::<GetBalance, u64>(GetBalance)?;
    println!("balance = {balance}");
    Ok(())
}
