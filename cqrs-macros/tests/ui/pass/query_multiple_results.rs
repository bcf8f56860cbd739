use cqrs_application::query::Query;
use cqrs_macros::Query;

struct Something;
struct SomethingSummary;

#[derive(Query)]
#[query(result = Something)]
#[query(result = SomethingSummary, name = "something.get")]
struct GetSomething;

#[derive(Query)]
#[query(result = Vec<T>)]
struct ListAll<T: Send + Sync + 'static> {
    _marker: std::marker::PhantomData<T>,
}

fn name_of<Q: Query<R>, R: Send + 'static>() -> &'static str {
    Q::NAME
}

fn main() {
    let _ = (Something, SomethingSummary, GetSomething);
    let _ = ListAll::<u8> {
        _marker: std::marker::PhantomData,
    };
    assert_eq!(name_of::<GetSomething, Something>(), "something.get");
    assert_eq!(name_of::<GetSomething, SomethingSummary>(), "something.get");
    assert_eq!(name_of::<ListAll<u8>, Vec<u8>>(), "ListAll");
}
