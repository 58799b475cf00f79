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

//! Reflective operations: property access, membership, instance checks,
//! construction and type introspection

use super::argument;
use crate::error::{OperatorError, OperatorResult};
use crate::model::{Function, TypeCoercion, Value};
use crate::registry::library::OperatorLibrary;
use crate::registry::signature::{OperationSignature, TypeHint};

/// Property lookup (`object[key]`)
///
/// Walks the prototype chain and yields `Undefined` when nothing has the key.
/// Reading from `Undefined` or `Null` is a type error.
pub fn get(key: &Value, object: &Value) -> OperatorResult<Value> {
    let key = TypeCoercion::to_property_key(key)?;
    object.get_property(&key)
}

/// Membership test including inherited properties (`key in object`)
pub fn has(key: &Value, object: &Value) -> OperatorResult<Value> {
    if object.is_primitive() {
        return Err(OperatorError::type_error(format!(
            "Cannot use 'in' operator to search for '{}' in {}",
            describe_key(key),
            object.describe()
        )));
    }
    let key = TypeCoercion::to_property_key(key)?;
    Ok(Value::Boolean(object.has_property(&key)?))
}

/// Instance check (`value instanceof constructor`)
///
/// True when `constructor.prototype` is on the prototype chain of `value`.
/// Primitives are never instances.
pub fn is_instance(constructor: &Value, value: &Value) -> OperatorResult<Value> {
    let Value::Function(function) = constructor else {
        return Err(OperatorError::type_error(
            "Right-hand side of 'instanceof' is not callable",
        ));
    };
    if value.is_primitive() {
        return Ok(Value::Boolean(false));
    }
    let prototype = function.prototype_object().ok_or_else(|| {
        OperatorError::type_error("Function has non-object prototype 'undefined' in instanceof check")
    })?;
    Ok(Value::Boolean(value.inherits_from(&prototype)))
}

/// Construction (`new constructor(...)`)
///
/// Returns a variadic function that constructs a new instance from whatever
/// arguments it receives. A value that cannot be constructed fails when that
/// function is called, not here.
pub fn create(constructor: &Value) -> OperatorResult<Value> {
    let name = match constructor {
        Value::Function(f) => format!("create({})", f.name()),
        _ => "create".to_string(),
    };
    let constructor = constructor.clone();
    Ok(Value::Function(Function::native(
        name,
        0,
        move |_this, args| constructor.construct(args),
    )))
}

/// Host `typeof`
pub fn type_of(value: &Value) -> OperatorResult<Value> {
    Ok(Value::from(value.type_tag().as_str()))
}

/// Internal class tag: `"Undefined"`, `"Null"`, or the `[[Class]]` of the value
pub fn class_of(value: &Value) -> OperatorResult<Value> {
    Ok(Value::from(value.class_tag().as_str()))
}

fn describe_key(key: &Value) -> String {
    match key {
        Value::Symbol(s) => s.to_string(),
        other => TypeCoercion::to_string(other).unwrap_or_else(|_| other.describe()),
    }
}

crate::define_operation! {
    /// Property accessor
    pub struct GetOperation {
        name: "get",
        symbol: None,
        friendly: "Property Access",
        category: Reflective,
        description: "Reads a property, including inherited ones",
        signature: OperationSignature::binary(
            "get",
            ("key", TypeHint::String),
            ("object", TypeHint::Object),
            TypeHint::Maybe,
        ),
        evaluate: |args| get(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Membership test (`in`)
    pub struct HasOperation {
        name: "has",
        symbol: Some("in"),
        friendly: "Membership",
        category: Reflective,
        description: "Tests whether an object has a property, including inherited ones",
        signature: OperationSignature::binary(
            "has",
            ("key", TypeHint::String),
            ("object", TypeHint::Object),
            TypeHint::Boolean,
        ),
        evaluate: |args| has(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Instance check (`instanceof`)
    pub struct IsInstanceOperation {
        name: "isInstance",
        symbol: Some("instanceof"),
        friendly: "Instance Check",
        category: Reflective,
        description: "Tests whether a value inherits from a constructor's prototype",
        signature: OperationSignature::binary(
            "isInstance",
            ("constructor", TypeHint::Function),
            ("value", TypeHint::Object),
            TypeHint::Boolean,
        ),
        evaluate: |args| is_instance(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Construction (`new`)
    pub struct CreateOperation {
        name: "create",
        symbol: Some("new"),
        friendly: "Construction",
        category: Reflective,
        description: "Turns a constructor into a function that builds new instances",
        signature: OperationSignature::unary(
            "create",
            "constructor",
            TypeHint::Constructor,
            TypeHint::Variadic,
        ),
        evaluate: |args| create(argument(args, 0)),
    }
}

crate::define_operation! {
    /// Type name (`typeof`)
    pub struct TypeOfOperation {
        name: "typeOf",
        symbol: Some("typeof"),
        friendly: "Type Of",
        category: Reflective,
        description: "Primitive type name of a value",
        signature: OperationSignature::unary("typeOf", "value", TypeHint::Any, TypeHint::String),
        evaluate: |args| type_of(argument(args, 0)),
    }
}

crate::define_operation! {
    /// Internal class tag
    pub struct ClassOfOperation {
        name: "classOf",
        symbol: None,
        friendly: "Class Of",
        category: Reflective,
        description: "Internal class of a value",
        signature: OperationSignature::unary("classOf", "value", TypeHint::Any, TypeHint::String),
        evaluate: |args| class_of(argument(args, 0)),
    }
}

/// Register the reflective operations
pub fn register_reflection_operations(library: &mut OperatorLibrary) {
    library.register(GetOperation);
    library.register(HasOperation);
    library.register(IsInstanceOperation);
    library.register(CreateOperation);
    library.register(TypeOfOperation);
    library.register(ClassOfOperation);
}
