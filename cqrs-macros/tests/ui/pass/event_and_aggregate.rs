use cqrs_domain::aggregate_root::AggregateRoot;
use cqrs_domain::event::Event;
use cqrs_macros::{AggregateRoot, Event};

#[derive(AggregateRoot)]
#[aggregate_root(name = "billing.invoice")]
struct Invoice;

#[derive(Event)]
struct SomethingCreated;

#[allow(dead_code)]
#[derive(Event)]
#[event(name = "invoice.changed")]
enum InvoiceEvent {
    Issued { number: u32 },
    Voided,
}

fn main() {
    assert_eq!(Invoice::TYPE, "billing.invoice");
    assert_eq!(SomethingCreated::NAME, "SomethingCreated");
    assert_eq!(InvoiceEvent::NAME, "invoice.changed");
}
