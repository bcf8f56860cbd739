use cqrs_macros::Command;

#[derive(Command)]
#[command(label = "create")]
pub struct CreateSomething;

fn main() {}
