//! Integration tests for the standard operator library
//!
//! Every case goes through the library's function values, so currying,
//! argument order and host coercions are exercised together.

use curried_operators::{
    Category, LibraryConfig, OperatorError, OperatorLibrary, Value, flip, ops, partial,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn apply(name: &str, args: &[Value]) -> Value {
    OperatorLibrary::standard()
        .apply(name, args)
        .unwrap_or_else(|e| panic!("{name} failed: {e}"))
}

/// Apply one argument per call, as a point-free caller would
fn apply_one_at_a_time(name: &str, args: &[Value]) -> Value {
    let mut current = Value::Function(OperatorLibrary::standard().get(name).unwrap().clone());
    for arg in args {
        let function = current.as_function().unwrap().clone();
        current = function.call(std::slice::from_ref(arg)).unwrap();
    }
    current
}

#[rstest]
#[case("add", 2.0, 3.0, 5.0)]
#[case("add", -1.5, 0.5, -1.0)]
#[case("subtract", 10.0, 4.0, 6.0)]
#[case("subtract", 4.0, 10.0, -6.0)]
#[case("multiply", 6.0, 7.0, 42.0)]
#[case("divide", 9.0, 3.0, 3.0)]
#[case("divide", 1.0, 4.0, 0.25)]
#[case("modulus", 7.0, 3.0, 1.0)]
#[case("modulus", -7.0, 2.0, -1.0)]
#[case("modulus", 7.5, 2.0, 1.5)]
fn test_numeric_arithmetic(#[case] name: &str, #[case] a: f64, #[case] b: f64, #[case] expected: f64) {
    let args = [Value::from(a), Value::from(b)];
    assert_eq!(apply(name, &args), Value::from(expected));
    assert_eq!(apply_one_at_a_time(name, &args), Value::from(expected));
}

#[rstest]
#[case(1.0, 0.0, f64::INFINITY)]
#[case(-1.0, 0.0, f64::NEG_INFINITY)]
fn test_divide_by_zero(#[case] a: f64, #[case] b: f64, #[case] expected: f64) {
    assert_eq!(apply_one_at_a_time("divide", &[Value::from(a), Value::from(b)]), Value::from(expected));
}

#[test]
fn test_zero_divided_by_zero_is_nan() {
    let result = apply("divide", &[Value::from(0), Value::from(0)]);
    assert!(result.as_number().unwrap().is_nan());
}

#[test]
fn test_add_follows_host_plus() {
    assert_eq!(apply("add", &[Value::from("1"), Value::from(2)]), Value::from("12"));
    assert_eq!(apply("add", &[Value::from("foo"), Value::from("bar")]), Value::from("foobar"));
    assert_eq!(apply("add", &[Value::from(true), Value::from(1)]), Value::from(2));
    assert_eq!(apply("add", &[Value::Null, Value::from(1)]), Value::from(1));
    assert_eq!(
        apply("add", &[Value::array([Value::from(1), Value::from(2)]), Value::from(3)]),
        Value::from("1,23")
    );
    assert!(apply("add", &[Value::Undefined, Value::from(1)]).as_number().unwrap().is_nan());
}

#[test]
fn test_add_with_self_containing_array() {
    let array = Value::array([]);
    array.as_object().unwrap().set("0", array.clone());
    assert_eq!(apply("add", &[array.clone(), Value::from(1)]), Value::from("1"));

    let nested = Value::array([Value::from(1), array]);
    assert_eq!(apply("add", &[nested, Value::from("!")]), Value::from("1,!"));
}

#[test]
fn test_negate() {
    assert_eq!(apply("negate", &[Value::from(3)]), Value::from(-3));
    assert_eq!(apply("negate", &[Value::from("3")]), Value::from(-3));
    assert!(apply("negate", &[Value::from("x")]).as_number().unwrap().is_nan());
}

#[test]
fn test_increment_and_decrement() {
    assert_eq!(apply("increment", &[Value::from(5)]), Value::from(6));
    assert_eq!(apply("decrement", &[Value::from(5)]), Value::from(4));
    assert_eq!(apply("decrement", &[Value::from(0)]), Value::from(-1));
    assert_eq!(ops::increment().arity(), 1);
    assert_eq!(ops::decrement().arity(), 1);
}

#[test]
fn test_partial_application() {
    let add2 = ops::add().call(&[Value::from(2)]).unwrap();
    let add2 = add2.as_function().unwrap();
    assert_eq!(add2.arity(), 1);
    assert_eq!(add2.call(&[Value::from(3)]).unwrap(), Value::from(5));

    // partials are independent of each other
    assert_eq!(add2.call(&[Value::from(10)]).unwrap(), Value::from(12));

    assert_eq!(ops::add().call(&[Value::from(2), Value::from(3)]).unwrap(), Value::from(5));
}

#[test]
fn test_surplus_arguments_are_ignored() {
    let result = ops::subtract()
        .call(&[Value::from(10), Value::from(4), Value::from(100)])
        .unwrap();
    assert_eq!(result, Value::from(6));
}

#[test]
fn test_flip_and_partial_helpers() {
    let flipped = flip(&ops::subtract());
    assert_eq!(flipped.call(&[Value::from(1), Value::from(3)]).unwrap(), Value::from(2));

    let halve = partial(&flip(&ops::divide()), [Value::from(2)]);
    assert_eq!(halve.call(&[Value::from(9)]).unwrap(), Value::from(4.5));
}

#[rstest]
#[case("not", vec![Value::from(true)], Value::from(false))]
#[case("not", vec![Value::from("")], Value::from(true))]
#[case("not", vec![Value::array([])], Value::from(false))]
#[case("and", vec![Value::from(true), Value::from(false)], Value::from(false))]
#[case("and", vec![Value::from(true), Value::from(true)], Value::from(true))]
#[case("and", vec![Value::from(0), Value::from("x")], Value::from(0))]
#[case("and", vec![Value::from(1), Value::from("x")], Value::from("x"))]
#[case("or", vec![Value::from(false), Value::from(false)], Value::from(false))]
#[case("or", vec![Value::from(false), Value::from(true)], Value::from(true))]
#[case("or", vec![Value::from(""), Value::from("y")], Value::from("y"))]
#[case("or", vec![Value::from("x"), Value::from("y")], Value::from("x"))]
fn test_logical(#[case] name: &str, #[case] args: Vec<Value>, #[case] expected: Value) {
    assert_eq!(apply_one_at_a_time(name, &args), expected);
}

#[rstest]
#[case("bitAnd", 0b110, 0b101, 0b100)]
#[case("bitOr", 0b110, 0b101, 0b111)]
#[case("bitXor", 0b110, 0b101, 0b011)]
#[case("bitShiftLeft", 0b10, 2, 0b1000)]
#[case("bitShiftLeft", 1, 33, 2)]
#[case("bitShiftRight", 0b1000, 2, 0b10)]
#[case("bitShiftRight", -16, 2, -4)]
#[case("bitUnsignedShiftRight", 16, 2, 4)]
fn test_bitwise(#[case] name: &str, #[case] a: i32, #[case] b: i32, #[case] expected: i32) {
    assert_eq!(apply_one_at_a_time(name, &[Value::from(a), Value::from(b)]), Value::from(expected));
}

#[test]
fn test_unsigned_shift_of_negative() {
    assert_eq!(
        apply("bitUnsignedShiftRight", &[Value::from(-9), Value::from(2)]),
        Value::from(1073741821u32)
    );
    assert_eq!(
        apply("bitUnsignedShiftRight", &[Value::from(-1), Value::from(0)]),
        Value::from(4294967295u32)
    );
}

#[test]
fn test_bit_not() {
    assert_eq!(apply("bitNot", &[Value::from(0b110)]), Value::from(-7));
    assert_eq!(apply("bitNot", &[Value::from(-1)]), Value::from(0));
    assert_eq!(apply("bitNot", &[Value::from(4294967296.0)]), Value::from(-1));
}

#[rstest]
#[case("equal", Value::from(1), Value::from("1"), false)]
#[case("equal", Value::from(1), Value::from(1), true)]
#[case("equal", Value::from(0.0), Value::from(-0.0), true)]
#[case("equal", Value::from(f64::NAN), Value::from(f64::NAN), false)]
#[case("equal", Value::Null, Value::Undefined, false)]
#[case("notEqual", Value::from(1), Value::from("1"), true)]
#[case("notEqual", Value::from("a"), Value::from("a"), false)]
#[case("greaterThan", Value::from(2), Value::from(3), false)]
#[case("greaterThan", Value::from(3), Value::from(2), true)]
#[case("greaterOrEqualTo", Value::from(3), Value::from(3), true)]
#[case("greaterOrEqualTo", Value::from(f64::NAN), Value::from(1), false)]
#[case("lessThan", Value::from("a"), Value::from("b"), true)]
#[case("lessThan", Value::from("10"), Value::from("9"), true)]
#[case("lessThan", Value::from(10), Value::from("9"), false)]
#[case("lessOrEqualTo", Value::from(2), Value::from(3), true)]
#[case("lessOrEqualTo", Value::Null, Value::from(0), true)]
#[case("lessOrEqualTo", Value::Undefined, Value::from(0), false)]
fn test_relational(#[case] name: &str, #[case] a: Value, #[case] b: Value, #[case] expected: bool) {
    assert_eq!(apply_one_at_a_time(name, &[a, b]), Value::from(expected));
}

#[test]
fn test_equal_compares_identity_for_objects() {
    let object = Value::object([("a", Value::from(1))]);
    assert_eq!(apply("equal", &[object.clone(), object.clone()]), Value::from(true));
    assert_eq!(
        apply("equal", &[object, Value::object([("a", Value::from(1))])]),
        Value::from(false)
    );
    assert_eq!(
        apply("equal", &[Value::from(ops::add()), Value::from(ops::add())]),
        Value::from(true)
    );
}

#[test]
fn test_referential_transparency() {
    for _ in 0..3 {
        assert_eq!(apply("multiply", &[Value::from(6), Value::from(7)]), Value::from(42));
        assert_eq!(apply("typeOf", &[Value::from("foo")]), Value::from("string"));
    }
}

#[test]
fn test_library_listing() {
    let library = OperatorLibrary::standard();
    let names = library.names();
    assert_eq!(names.len(), 30);
    for expected in [
        "add",
        "subtract",
        "divide",
        "multiply",
        "modulus",
        "negate",
        "increment",
        "decrement",
        "not",
        "and",
        "or",
        "bitNot",
        "bitAnd",
        "bitOr",
        "bitXor",
        "bitShiftLeft",
        "bitShiftRight",
        "bitUnsignedShiftRight",
        "equal",
        "notEqual",
        "greaterThan",
        "greaterOrEqualTo",
        "lessThan",
        "lessOrEqualTo",
        "get",
        "has",
        "isInstance",
        "create",
        "typeOf",
        "classOf",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[rstest]
#[case("add", 2)]
#[case("negate", 1)]
#[case("increment", 1)]
#[case("not", 1)]
#[case("bitNot", 1)]
#[case("bitUnsignedShiftRight", 2)]
#[case("lessOrEqualTo", 2)]
#[case("get", 2)]
#[case("isInstance", 2)]
#[case("create", 1)]
#[case("typeOf", 1)]
#[case("classOf", 1)]
fn test_arities(#[case] name: &str, #[case] arity: usize) {
    assert_eq!(OperatorLibrary::standard().entry(name).unwrap().arity(), arity);
}

#[test]
fn test_symbols_and_signatures() {
    let library = OperatorLibrary::standard();
    assert_eq!(library.by_symbol(">>>").unwrap().name, "bitUnsignedShiftRight");
    assert_eq!(library.by_symbol("%").unwrap().name, "modulus");
    assert_eq!(library.by_symbol("++").unwrap().name, "increment");
    assert_eq!(library.entry("add").unwrap().signature.summary(), "Number → Number → Number");
    assert_eq!(library.entry("lessThan").unwrap().category, Category::Relational);
}

#[test]
fn test_unknown_operation() {
    let err = OperatorLibrary::standard().apply("pow", &[]).unwrap_err();
    assert_eq!(
        err,
        OperatorError::UnknownOperation {
            name: "pow".to_string()
        }
    );
}

#[test]
fn test_configured_library() {
    let config = LibraryConfig::from_json_str(r#"{ "categories": ["bitwise"] }"#).unwrap();
    let library = OperatorLibrary::with_config(&config).unwrap();
    assert!(!library.contains("add"));
    assert!(!library.contains("increment"));
    assert_eq!(
        library.apply("bitAnd", &[Value::from(6), Value::from(5)]).unwrap(),
        Value::from(4)
    );

    assert!(matches!(
        LibraryConfig::from_json_str(r#"{ "categories": [] }"#),
        Err(OperatorError::InvalidConfiguration { .. })
    ));
    let empty = LibraryConfig::new(Vec::new(), true, true);
    assert!(matches!(
        OperatorLibrary::with_config(&empty),
        Err(OperatorError::InvalidConfiguration { .. })
    ));
}
