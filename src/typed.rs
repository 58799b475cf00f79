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

//! Statically typed counterparts of the currying helpers
//!
//! These work on ordinary Rust closures instead of [`crate::model::Value`], for
//! callers that know their operand types at compile time.

use std::sync::Arc;

/// Function returned by a partially applied [`curry2`]
pub type Curried<B, C> = Box<dyn Fn(B) -> C + Send + Sync>;

/// Split a binary function into a chain of unary ones
///
/// ```rust
/// use curried_operators::typed::curry2;
///
/// let add = curry2(|a: i32, b: i32| a + b);
/// let add2 = add(2);
/// assert_eq!(add2(3), 5);
/// ```
pub fn curry2<A, B, C, F>(f: F) -> impl Fn(A) -> Curried<B, C>
where
    F: Fn(A, B) -> C + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
    B: 'static,
    C: 'static,
{
    let f = Arc::new(f);
    move |a: A| -> Curried<B, C> {
        let f = Arc::clone(&f);
        Box::new(move |b: B| f(a.clone(), b))
    }
}

/// Reverse the parameters of a binary function
pub fn flip2<A, B, C, F>(f: F) -> impl Fn(B, A) -> C
where
    F: Fn(A, B) -> C,
{
    move |b, a| f(a, b)
}

/// Fix the first argument of a binary function
pub fn partial<A, B, C, F>(f: F, a: A) -> impl Fn(B) -> C
where
    F: Fn(A, B) -> C,
    A: Clone,
{
    move |b| f(a.clone(), b)
}

/// Factory for `T` built from its constructor arguments
///
/// The typed form of the reflective `create` operation: the "constructor" is the
/// type's `From<Args>` implementation.
///
/// ```rust
/// use curried_operators::typed::create;
///
/// let make = create::<String, &str>();
/// assert_eq!(make("foo"), "foo");
/// ```
pub fn create<T, Args>() -> fn(Args) -> T
where
    T: From<Args>,
{
    T::from
}
