use cqrs_macros::{AggregateRoot, Command, DomainCommand};

#[derive(Command, DomainCommand)]
#[domain_command(aggregate = Order, id = order_id)]
pub struct PlaceOrder {
    pub id: String,
}

#[derive(AggregateRoot)]
pub struct Order;

fn main() {}
