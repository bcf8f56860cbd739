use cqrs_macros::Query;

#[derive(Query)]
pub struct GetUser;

fn main() {}
