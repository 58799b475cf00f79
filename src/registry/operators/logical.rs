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

//! Logical operations
//!
//! `and` and `or` return the operand that decided the result, as the host's
//! `&&` and `||` do. Both operands are already evaluated, so there is no
//! short-circuiting.

use super::argument;
use crate::error::OperatorResult;
use crate::model::{TypeCoercion, Value};
use crate::registry::library::OperatorLibrary;
use crate::registry::signature::{OperationSignature, TypeHint};

/// Host `!`
pub fn not(a: &Value) -> OperatorResult<Value> {
    Ok(Value::Boolean(!TypeCoercion::to_boolean(a)))
}

/// Host `&&`: `a` when it is falsy, `b` otherwise
pub fn and(a: &Value, b: &Value) -> OperatorResult<Value> {
    if TypeCoercion::to_boolean(a) {
        Ok(b.clone())
    } else {
        Ok(a.clone())
    }
}

/// Host `||`: `a` when it is truthy, `b` otherwise
pub fn or(a: &Value, b: &Value) -> OperatorResult<Value> {
    if TypeCoercion::to_boolean(a) {
        Ok(a.clone())
    } else {
        Ok(b.clone())
    }
}

fn boolean_binary(name: &str) -> OperationSignature {
    OperationSignature::binary(
        name,
        ("a", TypeHint::Boolean),
        ("b", TypeHint::Boolean),
        TypeHint::Boolean,
    )
}

crate::define_operation! {
    /// Logical negation (`!`)
    pub struct NotOperation {
        name: "not",
        symbol: Some("!"),
        friendly: "Logical Not",
        category: Logical,
        description: "Negates the truthiness of a value",
        signature: OperationSignature::unary("not", "a", TypeHint::Boolean, TypeHint::Boolean),
        evaluate: |args| not(argument(args, 0)),
    }
}

crate::define_operation! {
    /// Logical conjunction (`&&`)
    pub struct AndOperation {
        name: "and",
        symbol: Some("&&"),
        friendly: "Logical And",
        category: Logical,
        description: "Returns the first operand if it is falsy, otherwise the second",
        signature: boolean_binary("and"),
        evaluate: |args| and(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Logical disjunction (`||`)
    pub struct OrOperation {
        name: "or",
        symbol: Some("||"),
        friendly: "Logical Or",
        category: Logical,
        description: "Returns the first operand if it is truthy, otherwise the second",
        signature: boolean_binary("or"),
        evaluate: |args| or(argument(args, 0), argument(args, 1)),
    }
}

/// Register the logical operations
pub fn register_logical_operations(library: &mut OperatorLibrary) {
    library.register(NotOperation);
    library.register(AndOperation);
    library.register(OrOperation);
}
