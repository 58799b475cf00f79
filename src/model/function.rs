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

//! Callable values: native functions, curried functions and constructors

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use super::object::ObjectRef;
use super::realm::realm;
use super::value::{PropertyKey, Value};
use crate::error::{OperatorError, OperatorResult};

/// Native body receiving the `this` value and the call arguments
pub type NativeMethod = Arc<dyn Fn(&Value, &[Value]) -> OperatorResult<Value> + Send + Sync>;

/// Native body of a curried function; always receives exactly `arity` arguments
pub type NativeFn = Arc<dyn Fn(&[Value]) -> OperatorResult<Value> + Send + Sync>;

/// Argument buffer of a curried function
pub(crate) type BoundArgs = SmallVec<[Value; 2]>;

/// Shared handle to a callable value
///
/// Every partial application produces a new, independent `Function`; nothing is
/// shared between instances except the immutable body.
#[derive(Clone)]
pub struct Function(Arc<FunctionData>);

struct FunctionData {
    name: String,
    kind: FunctionKind,
}

#[derive(Clone)]
enum FunctionKind {
    Native {
        arity: usize,
        body: NativeMethod,
    },
    Curried {
        arity: usize,
        target: NativeFn,
        bound: BoundArgs,
    },
    Constructor {
        arity: usize,
        prototype: ObjectRef,
        body: NativeMethod,
    },
}

impl Function {
    /// Create a plain native function
    ///
    /// `arity` is informational (reported as `length`); the body receives whatever
    /// arguments the caller passed.
    pub fn native<F>(name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> OperatorResult<Value> + Send + Sync + 'static,
    {
        Self::from_kind(
            name,
            FunctionKind::Native {
                arity,
                body: Arc::new(body),
            },
        )
    }

    /// Create a one-argument function; a missing argument reads as `Undefined`
    pub fn unary<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value) -> OperatorResult<Value> + Send + Sync + 'static,
    {
        Self::native(name, 1, move |_this, args| {
            body(args.first().unwrap_or(&Value::Undefined))
        })
    }

    /// Create a constructor whose instances inherit from `Object.prototype`
    ///
    /// The body runs with the freshly allocated instance as `this` when invoked
    /// through [`Function::construct`], and with `Undefined` as `this` when called
    /// directly. Returning an object-like value from the body replaces the
    /// allocated instance.
    pub fn constructor<F>(name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> OperatorResult<Value> + Send + Sync + 'static,
    {
        let prototype = ObjectRef::ordinary(Some(realm().object_prototype.clone()));
        Self::with_prototype(name, arity, prototype, Arc::new(body))
    }

    /// Create a constructor whose prototype inherits from `parent`'s prototype
    pub fn constructor_extending<F>(
        name: impl Into<String>,
        arity: usize,
        parent: &Function,
        body: F,
    ) -> OperatorResult<Self>
    where
        F: Fn(&Value, &[Value]) -> OperatorResult<Value> + Send + Sync + 'static,
    {
        let parent_prototype = parent.prototype_object().ok_or_else(|| {
            OperatorError::type_error(format!(
                "Class extends value {} is not a constructor",
                parent.name()
            ))
        })?;
        let prototype = ObjectRef::ordinary(Some(parent_prototype));
        Ok(Self::with_prototype(name, arity, prototype, Arc::new(body)))
    }

    pub(crate) fn with_prototype(
        name: impl Into<String>,
        arity: usize,
        prototype: ObjectRef,
        body: NativeMethod,
    ) -> Self {
        Self::from_kind(
            name,
            FunctionKind::Constructor {
                arity,
                prototype,
                body,
            },
        )
    }

    pub(crate) fn curried(
        name: impl Into<String>,
        arity: usize,
        target: NativeFn,
        bound: BoundArgs,
    ) -> Self {
        Self::from_kind(
            name,
            FunctionKind::Curried {
                arity,
                target,
                bound,
            },
        )
    }

    fn from_kind(name: impl Into<String>, kind: FunctionKind) -> Self {
        Self(Arc::new(FunctionData {
            name: name.into(),
            kind,
        }))
    }

    /// Name of the function
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Number of arguments still expected
    ///
    /// For a curried function this shrinks with every partial application.
    pub fn arity(&self) -> usize {
        match &self.0.kind {
            FunctionKind::Native { arity, .. } | FunctionKind::Constructor { arity, .. } => *arity,
            FunctionKind::Curried { arity, bound, .. } => arity.saturating_sub(bound.len()),
        }
    }

    /// Check whether the function accumulates arguments
    pub fn is_curried(&self) -> bool {
        matches!(self.0.kind, FunctionKind::Curried { .. })
    }

    /// Check whether the function can be used with [`Function::construct`]
    pub fn is_constructor(&self) -> bool {
        matches!(self.0.kind, FunctionKind::Constructor { .. })
    }

    /// Object that instances of this constructor inherit from
    pub fn prototype_object(&self) -> Option<ObjectRef> {
        match &self.0.kind {
            FunctionKind::Constructor { prototype, .. } => Some(prototype.clone()),
            _ => None,
        }
    }

    /// Check whether two handles refer to the same function
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Own properties of a function: `name`, `length` and, for constructors,
    /// `prototype`
    pub fn get_own(&self, key: &PropertyKey) -> Option<Value> {
        match key.as_str()? {
            "name" => Some(Value::String(self.name().to_string())),
            "length" => Some(Value::Number(self.arity() as f64)),
            "prototype" => self.prototype_object().map(Value::Object),
            _ => None,
        }
    }

    /// Call with `Undefined` as `this`
    pub fn call(&self, args: &[Value]) -> OperatorResult<Value> {
        self.call_with_this(&Value::Undefined, args)
    }

    /// Call with an explicit `this`
    ///
    /// A curried function that has not yet received enough arguments returns a
    /// new partial application as [`Value::Function`]; once saturated it invokes
    /// its target with exactly `arity` arguments, discarding any surplus.
    pub fn call_with_this(&self, this: &Value, args: &[Value]) -> OperatorResult<Value> {
        match &self.0.kind {
            FunctionKind::Native { body, .. } | FunctionKind::Constructor { body, .. } => {
                body(this, args)
            }
            FunctionKind::Curried {
                arity,
                target,
                bound,
            } => {
                let mut collected = bound.clone();
                collected.extend(args.iter().cloned());
                if collected.len() < *arity {
                    return Ok(Value::Function(Function::curried(
                        self.name(),
                        *arity,
                        target.clone(),
                        collected,
                    )));
                }
                log::trace!("invoking '{}' with {} arguments", self.name(), arity);
                target(&collected[..*arity])
            }
        }
    }

    /// Construct a new instance, as the host `new` operator does
    ///
    /// The instance inherits from the constructor's prototype; if the body returns
    /// an object-like value, that value is returned instead of the instance.
    pub fn construct(&self, args: &[Value]) -> OperatorResult<Value> {
        match &self.0.kind {
            FunctionKind::Constructor {
                prototype, body, ..
            } => {
                let instance = Value::Object(ObjectRef::ordinary(Some(prototype.clone())));
                let result = body(&instance, args)?;
                if result.is_object_like() {
                    Ok(result)
                } else {
                    Ok(instance)
                }
            }
            _ => Err(OperatorError::type_error(format!(
                "{} is not a constructor",
                self.name()
            ))),
        }
    }

    /// Same callable under another name
    pub fn renamed(&self, name: impl Into<String>) -> Function {
        Self::from_kind(name, self.0.kind.clone())
    }

    /// Extend the argument buffer of a curried function without calling it
    pub(crate) fn with_bound_args<I>(&self, args: I) -> Option<Function>
    where
        I: IntoIterator<Item = Value>,
    {
        match &self.0.kind {
            FunctionKind::Curried {
                arity,
                target,
                bound,
            } => {
                let mut collected = bound.clone();
                collected.extend(args);
                Some(Function::curried(self.name(), *arity, target.clone(), collected))
            }
            _ => None,
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({}/{})", self.name(), self.arity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassTag;

    fn pair() -> Function {
        let target: NativeFn = Arc::new(|args: &[Value]| {
            Ok(Value::array(args.iter().cloned()))
        });
        Function::curried("pair", 2, target, BoundArgs::new())
    }

    #[test]
    fn test_curried_accumulates_arguments() {
        let f = pair();
        assert_eq!(f.arity(), 2);

        let partial = f.call(&[Value::from(1)]).unwrap();
        let partial = partial.as_function().unwrap();
        assert_eq!(partial.arity(), 1);
        assert!(!partial.ptr_eq(&f));

        let result = partial.call(&[Value::from(2)]).unwrap();
        assert_eq!(result.to_string(), "1,2");
    }

    #[test]
    fn test_curried_discards_surplus_arguments() {
        let result = pair()
            .call(&[Value::from(1), Value::from(2), Value::from(3)])
            .unwrap();
        assert_eq!(result.to_string(), "1,2");
    }

    #[test]
    fn test_partials_are_independent() {
        let f = pair();
        let one = f.call(&[Value::from(1)]).unwrap();
        let two = f.call(&[Value::from(2)]).unwrap();
        let one = one.as_function().unwrap();
        let two = two.as_function().unwrap();
        assert_eq!(one.call(&[Value::from(0)]).unwrap().to_string(), "1,0");
        assert_eq!(two.call(&[Value::from(0)]).unwrap().to_string(), "2,0");
    }

    #[test]
    fn test_constructor_allocates_instance() {
        let point = Function::constructor("Point", 1, |this, args| {
            if let Some(object) = this.as_object() {
                object.set("x", args.first().cloned().unwrap_or_default());
            }
            Ok(Value::Undefined)
        });
        let instance = point.construct(&[Value::from(3)]).unwrap();
        assert_eq!(instance.class_tag(), ClassTag::Object);
        assert_eq!(instance.get_property(&"x".into()).unwrap(), Value::from(3));
        assert!(instance.inherits_from(&point.prototype_object().unwrap()));
    }

    #[test]
    fn test_constructor_override() {
        let replacement = Value::object([("replaced", Value::from(true))]);
        let expected = replacement.clone();
        let factory = Function::constructor("Factory", 0, move |_this, _args| {
            Ok(replacement.clone())
        });
        let result = factory.construct(&[]).unwrap();
        assert!(result.strict_equals(&expected));
    }

    #[test]
    fn test_non_constructor_fails() {
        let f = Function::unary("id", |v| Ok(v.clone()));
        let err = f.construct(&[]).unwrap_err();
        assert_eq!(err, OperatorError::type_error("id is not a constructor"));
    }

    #[test]
    fn test_function_own_properties() {
        let f = pair();
        assert_eq!(f.get_own(&"name".into()), Some(Value::from("pair")));
        assert_eq!(f.get_own(&"length".into()), Some(Value::from(2)));
        assert_eq!(f.get_own(&"prototype".into()), None);
    }
}
