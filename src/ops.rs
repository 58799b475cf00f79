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

//! Accessors for the standard library's function values
//!
//! ```rust
//! use curried_operators::ops;
//! use curried_operators::model::Value;
//!
//! let add2 = ops::add().call(&[Value::from(2)]).unwrap();
//! let sum = add2.as_function().unwrap().call(&[Value::from(3)]).unwrap();
//! assert_eq!(sum, Value::from(5));
//! ```

use crate::model::Function;
use crate::registry::OperatorLibrary;

macro_rules! accessors {
    ($($(#[$meta:meta])* $fn_name:ident => $key:literal;)+) => {
        $(
            $(#[$meta])*
            pub fn $fn_name() -> Function {
                lookup($key)
            }
        )+

        /// Every accessor paired with its library key
        pub fn all() -> Vec<(&'static str, Function)> {
            vec![$(($key, $fn_name())),+]
        }
    };
}

fn lookup(name: &str) -> Function {
    match OperatorLibrary::standard().get(name) {
        Some(function) => function.clone(),
        // every key below is registered by the standard library
        None => unreachable!("standard library is missing '{name}'"),
    }
}

accessors! {
    /// `a + b`
    add => "add";
    /// `a - b`
    subtract => "subtract";
    /// `a / b`
    divide => "divide";
    /// `a * b`
    multiply => "multiply";
    /// `a % b`
    modulus => "modulus";
    /// `-a`
    negate => "negate";
    /// `a + 1`
    increment => "increment";
    /// `a - 1`
    decrement => "decrement";
    /// `!a`
    not => "not";
    /// `a && b`
    and => "and";
    /// `a || b`
    or => "or";
    /// `~a`
    bit_not => "bitNot";
    /// `a & b`
    bit_and => "bitAnd";
    /// `a | b`
    bit_or => "bitOr";
    /// `a ^ b`
    bit_xor => "bitXor";
    /// `a << b`
    bit_shift_left => "bitShiftLeft";
    /// `a >> b`
    bit_shift_right => "bitShiftRight";
    /// `a >>> b`
    bit_unsigned_shift_right => "bitUnsignedShiftRight";
    /// `a === b`
    equal => "equal";
    /// `a !== b`
    not_equal => "notEqual";
    /// `a > b`
    greater_than => "greaterThan";
    /// `a >= b`
    greater_or_equal_to => "greaterOrEqualTo";
    /// `a < b`
    less_than => "lessThan";
    /// `a <= b`
    less_or_equal_to => "lessOrEqualTo";
    /// `object[key]`
    get => "get";
    /// `key in object`
    has => "has";
    /// `value instanceof constructor`
    is_instance => "isInstance";
    /// `(...args) => new constructor(...args)`
    create => "create";
    /// `typeof value`
    type_of => "typeOf";
    /// Internal class of a value
    class_of => "classOf";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_library() {
        let library = OperatorLibrary::standard();
        let all = all();
        assert_eq!(all.len(), library.len());
        for (key, function) in all {
            assert!(function.ptr_eq(library.get(key).unwrap()), "{key}");
        }
    }
}
