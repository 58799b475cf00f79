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

//! Arithmetic operations

use super::argument;
use crate::error::OperatorResult;
use crate::model::{PreferredType, TypeCoercion, Value};
use crate::registry::library::OperatorLibrary;
use crate::registry::signature::{OperationSignature, TypeHint};

/// Host `+`: string concatenation when either primitive operand is a string,
/// numeric addition otherwise
pub fn add(a: &Value, b: &Value) -> OperatorResult<Value> {
    let a = TypeCoercion::to_primitive(a, PreferredType::Default)?;
    let b = TypeCoercion::to_primitive(b, PreferredType::Default)?;
    if matches!(a, Value::String(_)) || matches!(b, Value::String(_)) {
        let mut text = TypeCoercion::to_string(&a)?;
        text.push_str(&TypeCoercion::to_string(&b)?);
        return Ok(Value::String(text));
    }
    Ok(Value::Number(
        TypeCoercion::to_number(&a)? + TypeCoercion::to_number(&b)?,
    ))
}

/// Host `-`
pub fn subtract(a: &Value, b: &Value) -> OperatorResult<Value> {
    numeric(a, b, |x, y| x - y)
}

/// Host `/`; division by zero yields an infinity or `NaN`
pub fn divide(a: &Value, b: &Value) -> OperatorResult<Value> {
    numeric(a, b, |x, y| x / y)
}

/// Host `*`
pub fn multiply(a: &Value, b: &Value) -> OperatorResult<Value> {
    numeric(a, b, |x, y| x * y)
}

/// Host `%`: truncating remainder carrying the sign of the dividend
pub fn modulus(a: &Value, b: &Value) -> OperatorResult<Value> {
    numeric(a, b, |x, y| x % y)
}

/// Host unary `-`
pub fn negate(a: &Value) -> OperatorResult<Value> {
    Ok(Value::Number(-TypeCoercion::to_number(a)?))
}

fn numeric(a: &Value, b: &Value, op: impl Fn(f64, f64) -> f64) -> OperatorResult<Value> {
    let x = TypeCoercion::to_number(a)?;
    let y = TypeCoercion::to_number(b)?;
    Ok(Value::Number(op(x, y)))
}

fn number_binary(name: &str) -> OperationSignature {
    OperationSignature::binary(
        name,
        ("a", TypeHint::Number),
        ("b", TypeHint::Number),
        TypeHint::Number,
    )
}

crate::define_operation! {
    /// Addition (`+`)
    pub struct AddOperation {
        name: "add",
        symbol: Some("+"),
        friendly: "Addition",
        category: Arithmetic,
        description: "Adds two numbers, or concatenates when either operand is a string",
        signature: number_binary("add"),
        evaluate: |args| add(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Subtraction (`-`)
    pub struct SubtractOperation {
        name: "subtract",
        symbol: Some("-"),
        friendly: "Subtraction",
        category: Arithmetic,
        description: "Subtracts the second number from the first",
        signature: number_binary("subtract"),
        evaluate: |args| subtract(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Division (`/`)
    pub struct DivideOperation {
        name: "divide",
        symbol: Some("/"),
        friendly: "Division",
        category: Arithmetic,
        description: "Divides the first number by the second",
        signature: number_binary("divide"),
        evaluate: |args| divide(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Multiplication (`*`)
    pub struct MultiplyOperation {
        name: "multiply",
        symbol: Some("*"),
        friendly: "Multiplication",
        category: Arithmetic,
        description: "Multiplies two numbers",
        signature: number_binary("multiply"),
        evaluate: |args| multiply(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Remainder (`%`)
    pub struct ModulusOperation {
        name: "modulus",
        symbol: Some("%"),
        friendly: "Modulus",
        category: Arithmetic,
        description: "Remainder of dividing the first number by the second",
        signature: number_binary("modulus"),
        evaluate: |args| modulus(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Negation (unary `-`)
    pub struct NegateOperation {
        name: "negate",
        symbol: None,
        friendly: "Negation",
        category: Arithmetic,
        description: "Negates a number",
        signature: OperationSignature::unary("negate", "a", TypeHint::Number, TypeHint::Number),
        evaluate: |args| negate(argument(args, 0)),
    }
}

/// Register the arithmetic operations
pub fn register_arithmetic_operations(library: &mut OperatorLibrary) {
    library.register(AddOperation);
    library.register(SubtractOperation);
    library.register(DivideOperation);
    library.register(MultiplyOperation);
    library.register(ModulusOperation);
    library.register(NegateOperation);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition() {
        assert_eq!(add(&Value::from(2), &Value::from(3)).unwrap(), Value::from(5));
        assert_eq!(add(&Value::from("1"), &Value::from(2)).unwrap(), Value::from("12"));
        assert_eq!(add(&Value::from(1), &Value::Null).unwrap(), Value::from(1));
        assert_eq!(
            add(&Value::array([Value::from(1)]), &Value::from(2)).unwrap(),
            Value::from("12")
        );
        assert!(add(&Value::from(1), &Value::Undefined).unwrap().as_number().unwrap().is_nan());
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            divide(&Value::from(1), &Value::from(0)).unwrap(),
            Value::Number(f64::INFINITY)
        );
        assert_eq!(
            divide(&Value::from(-1), &Value::from(0)).unwrap(),
            Value::Number(f64::NEG_INFINITY)
        );
        assert!(divide(&Value::from(0), &Value::from(0)).unwrap().as_number().unwrap().is_nan());
    }

    #[test]
    fn test_modulus_sign() {
        assert_eq!(modulus(&Value::from(-7), &Value::from(2)).unwrap(), Value::from(-1));
        assert_eq!(modulus(&Value::from(7), &Value::from(-2)).unwrap(), Value::from(1));
        assert_eq!(modulus(&Value::from(5.5), &Value::from(2)).unwrap(), Value::from(1.5));
    }

    #[test]
    fn test_negate_coerces() {
        assert_eq!(negate(&Value::from("3")).unwrap(), Value::from(-3));
        assert!(negate(&Value::symbol(None)).is_err());
    }
}
