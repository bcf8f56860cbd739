use cqrs_application::command::{Command, DomainCommand};
use cqrs_macros::{AggregateRoot, Command, DomainCommand};

#[derive(AggregateRoot)]
struct Order;

#[derive(Command)]
struct CreateSomething;

#[derive(Command)]
#[command(name = "order.place")]
struct PlaceOrder {
    #[allow(dead_code)]
    amount: u32,
}

#[derive(Command, DomainCommand)]
#[domain_command(aggregate = Order)]
struct CreateAggregate {
    aggregate_root_id: String,
}

#[derive(Command, DomainCommand)]
#[domain_command(aggregate = Order, id = order_id)]
struct CancelOrder {
    order_id: String,
}

fn root_id<C: DomainCommand<Order>>(c: &C) -> &str {
    c.aggregate_root_id()
}

fn main() {
    assert_eq!(CreateSomething::NAME, "CreateSomething");
    assert_eq!(PlaceOrder::NAME, "order.place");

    let create = CreateAggregate {
        aggregate_root_id: "o-1".into(),
    };
    assert_eq!(root_id(&create), "o-1");
    assert_eq!(CreateAggregate::NAME, "CreateAggregate");

    let cancel = CancelOrder {
        order_id: "o-2".into(),
    };
    assert_eq!(root_id(&cancel), "o-2");
}
