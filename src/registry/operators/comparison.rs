// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Equality and ordering operations

use std::cmp::Ordering;

use super::argument;
use crate::error::OperatorResult;
use crate::model::{PreferredType, TypeCoercion, Value};
use crate::registry::library::OperatorLibrary;
use crate::registry::signature::{OperationSignature, TypeHint};

/// Host `===`
pub fn equal(a: &Value, b: &Value) -> OperatorResult<Value> {
    Ok(Value::Boolean(a.strict_equals(b)))
}

/// Host `!==`
pub fn not_equal(a: &Value, b: &Value) -> OperatorResult<Value> {
    Ok(Value::Boolean(!a.strict_equals(b)))
}

/// Host `>`
pub fn greater_than(a: &Value, b: &Value) -> OperatorResult<Value> {
    ordered(a, b, |o| o == Ordering::Greater)
}

/// Host `>=`
pub fn greater_or_equal_to(a: &Value, b: &Value) -> OperatorResult<Value> {
    ordered(a, b, |o| o != Ordering::Less)
}

/// Host `<`
pub fn less_than(a: &Value, b: &Value) -> OperatorResult<Value> {
    ordered(a, b, |o| o == Ordering::Less)
}

/// Host `<=`
pub fn less_or_equal_to(a: &Value, b: &Value) -> OperatorResult<Value> {
    ordered(a, b, |o| o != Ordering::Greater)
}

/// Abstract relational comparison
///
/// Both operands are reduced to primitives with a number hint, left first. Two
/// strings compare by UTF-16 code units; anything else compares numerically.
/// `None` means the operands are unordered (a `NaN` was involved).
pub fn compare(a: &Value, b: &Value) -> OperatorResult<Option<Ordering>> {
    let a = TypeCoercion::to_primitive(a, PreferredType::Number)?;
    let b = TypeCoercion::to_primitive(b, PreferredType::Number)?;
    if let (Value::String(x), Value::String(y)) = (&a, &b) {
        return Ok(Some(x.encode_utf16().cmp(y.encode_utf16())));
    }
    let x = TypeCoercion::to_number(&a)?;
    let y = TypeCoercion::to_number(&b)?;
    Ok(x.partial_cmp(&y))
}

fn ordered(a: &Value, b: &Value, accept: impl Fn(Ordering) -> bool) -> OperatorResult<Value> {
    Ok(Value::Boolean(compare(a, b)?.is_some_and(accept)))
}

fn any_binary(name: &str) -> OperationSignature {
    OperationSignature::binary(
        name,
        ("a", TypeHint::Any),
        ("b", TypeHint::Any),
        TypeHint::Boolean,
    )
}

fn number_binary(name: &str) -> OperationSignature {
    OperationSignature::binary(
        name,
        ("a", TypeHint::Number),
        ("b", TypeHint::Number),
        TypeHint::Boolean,
    )
}

crate::define_operation! {
    /// Strict equality (`===`)
    pub struct EqualOperation {
        name: "equal",
        symbol: Some("==="),
        friendly: "Strict Equality",
        category: Relational,
        description: "True when both values have the same type and value",
        signature: any_binary("equal"),
        evaluate: |args| equal(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Strict inequality (`!==`)
    pub struct NotEqualOperation {
        name: "notEqual",
        symbol: Some("!=="),
        friendly: "Strict Inequality",
        category: Relational,
        description: "Negation of strict equality",
        signature: any_binary("notEqual"),
        evaluate: |args| not_equal(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Greater than (`>`)
    pub struct GreaterThanOperation {
        name: "greaterThan",
        symbol: Some(">"),
        friendly: "Greater Than",
        category: Relational,
        description: "True when the first value orders after the second",
        signature: number_binary("greaterThan"),
        evaluate: |args| greater_than(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Greater than or equal (`>=`)
    pub struct GreaterOrEqualToOperation {
        name: "greaterOrEqualTo",
        symbol: Some(">="),
        friendly: "Greater Than Or Equal",
        category: Relational,
        description: "True when the first value does not order before the second",
        signature: number_binary("greaterOrEqualTo"),
        evaluate: |args| greater_or_equal_to(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Less than (`<`)
    pub struct LessThanOperation {
        name: "lessThan",
        symbol: Some("<"),
        friendly: "Less Than",
        category: Relational,
        description: "True when the first value orders before the second",
        signature: number_binary("lessThan"),
        evaluate: |args| less_than(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Less than or equal (`<=`)
    pub struct LessOrEqualToOperation {
        name: "lessOrEqualTo",
        symbol: Some("<="),
        friendly: "Less Than Or Equal",
        category: Relational,
        description: "True when the first value does not order after the second",
        signature: number_binary("lessOrEqualTo"),
        evaluate: |args| less_or_equal_to(argument(args, 0), argument(args, 1)),
    }
}

/// Register the relational operations
pub fn register_comparison_operations(library: &mut OperatorLibrary) {
    library.register(EqualOperation);
    library.register(NotEqualOperation);
    library.register(GreaterThanOperation);
    library.register(GreaterOrEqualToOperation);
    library.register(LessThanOperation);
    library.register(LessOrEqualToOperation);
}
