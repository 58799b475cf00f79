//! Values, functions and the library are shared freely across threads

use curried_operators::{Function, OperatorLibrary, Value, ops};
use pretty_assertions::assert_eq;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_shared_types_are_send_and_sync() {
    assert_send_sync::<Value>();
    assert_send_sync::<Function>();
    assert_send_sync::<OperatorLibrary>();
}

#[test]
fn test_partials_applied_from_many_threads() {
    let add = ops::add();
    let partials: Vec<Value> = (0..8)
        .map(|i| add.call(&[Value::from(i)]).unwrap())
        .collect();

    let sums: Vec<Value> = std::thread::scope(|scope| {
        let handles: Vec<_> = partials
            .iter()
            .map(|partial| {
                scope.spawn(move || {
                    let function = partial.as_function().unwrap();
                    function.call(&[Value::from(100)]).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let expected: Vec<Value> = (100..108).map(Value::from).collect();
    assert_eq!(sums, expected);
}

#[test]
fn test_one_partial_shared_by_many_threads() {
    let add_one = ops::add().call(&[Value::from(1)]).unwrap();
    let shared = Value::array([Value::from(1), Value::from(2)]);

    std::thread::scope(|scope| {
        for i in 0..8 {
            let add_one = &add_one;
            let shared = &shared;
            scope.spawn(move || {
                let function = add_one.as_function().unwrap();
                assert_eq!(function.call(&[Value::from(i)]).unwrap(), Value::from(i + 1));
                assert_eq!(
                    ops::add().call(&[shared.clone(), Value::from(i)]).unwrap(),
                    Value::from(format!("1,2{i}"))
                );
            });
        }
    });
}
