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

//! Currying adapter
//!
//! Turns a fixed-arity native function into a [`Function`] that accepts its
//! arguments one at a time or in groups:
//!
//! ```rust
//! use curried_operators::curry::curry;
//! use curried_operators::model::{TypeCoercion, Value};
//!
//! let add = curry(2, "add", |args| {
//!     let a = TypeCoercion::to_number(&args[0])?;
//!     let b = TypeCoercion::to_number(&args[1])?;
//!     Ok(Value::Number(a + b))
//! });
//!
//! let add2 = add.call(&[Value::from(2)]).unwrap();
//! let five = add2.as_function().unwrap().call(&[Value::from(3)]).unwrap();
//! assert_eq!(five, Value::from(5));
//! assert_eq!(add.call(&[Value::from(2), Value::from(3)]).unwrap(), Value::from(5));
//! ```

use smallvec::SmallVec;
use std::sync::Arc;

use crate::error::{OperatorError, OperatorResult};
use crate::model::{Function, Value};

/// Wrap `f` so that it is invoked once `arity` arguments have been supplied
///
/// `f` always receives exactly `arity` arguments; surplus arguments of the
/// saturating call are dropped. Errors returned by `f` propagate unchanged.
pub fn curry<F>(arity: usize, name: impl Into<String>, f: F) -> Function
where
    F: Fn(&[Value]) -> OperatorResult<Value> + Send + Sync + 'static,
{
    Function::curried(name, arity, Arc::new(f), SmallVec::new())
}

/// Swap the first two arguments of a binary function
///
/// The result is itself curried with arity 2.
pub fn flip(target: &Function) -> Function {
    let name = target.name().to_string();
    let target = target.clone();
    curry(2, name.clone(), move |args| match args {
        [a, b] => target.call(&[b.clone(), a.clone()]),
        _ => Err(OperatorError::evaluation(
            name.clone(),
            "flipped function expects two arguments",
        )),
    })
}

/// Fix the leading arguments of `target`
///
/// For a curried function this is the same as calling it with `args`, except
/// that the call never saturates: the bound arguments are only used once the
/// remaining ones arrive.
pub fn partial<I>(target: &Function, args: I) -> Function
where
    I: IntoIterator<Item = Value>,
{
    let bound: Vec<Value> = args.into_iter().collect();
    if let Some(curried) = target.with_bound_args(bound.iter().cloned()) {
        return curried;
    }

    let arity = target.arity().saturating_sub(bound.len());
    let name = target.name().to_string();
    let target = target.clone();
    Function::native(name, arity, move |this, rest| {
        let mut all = bound.clone();
        all.extend_from_slice(rest);
        target.call_with_this(this, &all)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeCoercion;

    fn subtract() -> Function {
        curry(2, "subtract", |args| {
            let a = TypeCoercion::to_number(&args[0])?;
            let b = TypeCoercion::to_number(&args[1])?;
            Ok(Value::Number(a - b))
        })
    }

    fn apply(f: &Value, arg: Value) -> Value {
        f.as_function().unwrap().call(&[arg]).unwrap()
    }

    #[test]
    fn test_curry_one_at_a_time() {
        let partial = subtract().call(&[Value::from(10)]).unwrap();
        assert_eq!(apply(&partial, Value::from(3)), Value::from(7));
    }

    #[test]
    fn test_curry_all_at_once() {
        let result = subtract()
            .call(&[Value::from(10), Value::from(3)])
            .unwrap();
        assert_eq!(result, Value::from(7));
    }

    #[test]
    fn test_zero_argument_call_returns_partial() {
        let f = subtract();
        let same = f.call(&[]).unwrap();
        let same = same.as_function().unwrap();
        assert_eq!(same.arity(), 2);
        assert!(!same.ptr_eq(&f));
    }

    #[test]
    fn test_errors_propagate() {
        let failing = curry(1, "fail", |_| Err(OperatorError::type_error("nope")));
        assert_eq!(
            failing.call(&[Value::Null]).unwrap_err(),
            OperatorError::type_error("nope")
        );
    }

    #[test]
    fn test_flip() {
        let flipped = flip(&subtract());
        assert_eq!(
            flipped.call(&[Value::from(1), Value::from(3)]).unwrap(),
            Value::from(2)
        );
        let partial = flipped.call(&[Value::from(1)]).unwrap();
        assert_eq!(apply(&partial, Value::from(5)), Value::from(4));
    }

    #[test]
    fn test_partial_of_curried() {
        let minus_from_ten = partial(&subtract(), [Value::from(10)]);
        assert_eq!(minus_from_ten.arity(), 1);
        assert_eq!(
            minus_from_ten.call(&[Value::from(4)]).unwrap(),
            Value::from(6)
        );
    }

    #[test]
    fn test_partial_of_plain_function() {
        let join = Function::native("join", 2, |_, args| {
            let parts: Vec<String> = args
                .iter()
                .map(TypeCoercion::to_string)
                .collect::<OperatorResult<_>>()?;
            Ok(Value::String(parts.join("-")))
        });
        let prefixed = partial(&join, [Value::from("a")]);
        assert_eq!(prefixed.arity(), 1);
        assert_eq!(
            prefixed.call(&[Value::from("b")]).unwrap(),
            Value::from("a-b")
        );
    }
}
