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

//! Bitwise operations
//!
//! Operands are converted to 32-bit integers first; shift counts use the low
//! five bits of the right operand.

use super::argument;
use crate::error::OperatorResult;
use crate::model::{TypeCoercion, Value};
use crate::registry::library::OperatorLibrary;
use crate::registry::signature::{OperationSignature, TypeHint};

/// Host `~`
pub fn bit_not(a: &Value) -> OperatorResult<Value> {
    Ok(int(!TypeCoercion::to_int32(a)?))
}

/// Host `&`
pub fn bit_and(a: &Value, b: &Value) -> OperatorResult<Value> {
    Ok(int(TypeCoercion::to_int32(a)? & TypeCoercion::to_int32(b)?))
}

/// Host `|`
pub fn bit_or(a: &Value, b: &Value) -> OperatorResult<Value> {
    Ok(int(TypeCoercion::to_int32(a)? | TypeCoercion::to_int32(b)?))
}

/// Host `^`
pub fn bit_xor(a: &Value, b: &Value) -> OperatorResult<Value> {
    Ok(int(TypeCoercion::to_int32(a)? ^ TypeCoercion::to_int32(b)?))
}

/// Host `<<`
pub fn bit_shift_left(a: &Value, b: &Value) -> OperatorResult<Value> {
    let value = TypeCoercion::to_int32(a)?;
    Ok(int(value.wrapping_shl(shift_count(b)?)))
}

/// Host `>>` (sign-propagating)
pub fn bit_shift_right(a: &Value, b: &Value) -> OperatorResult<Value> {
    let value = TypeCoercion::to_int32(a)?;
    Ok(int(value >> shift_count(b)?))
}

/// Host `>>>` (zero-fill); the result is always in `0..2^32`
pub fn bit_unsigned_shift_right(a: &Value, b: &Value) -> OperatorResult<Value> {
    let value = TypeCoercion::to_uint32(a)?;
    Ok(Value::Number(f64::from(value >> shift_count(b)?)))
}

fn shift_count(b: &Value) -> OperatorResult<u32> {
    Ok(TypeCoercion::to_uint32(b)? & 0x1f)
}

fn int(value: i32) -> Value {
    Value::Number(f64::from(value))
}

fn int_binary(name: &str) -> OperationSignature {
    OperationSignature::binary(name, ("a", TypeHint::Int), ("b", TypeHint::Int), TypeHint::Int)
}

crate::define_operation! {
    /// Bitwise complement (`~`)
    pub struct BitNotOperation {
        name: "bitNot",
        symbol: Some("~"),
        friendly: "Bitwise Not",
        category: Bitwise,
        description: "Inverts every bit of a 32-bit integer",
        signature: OperationSignature::unary("bitNot", "a", TypeHint::Int, TypeHint::Int),
        evaluate: |args| bit_not(argument(args, 0)),
    }
}

crate::define_operation! {
    /// Bitwise and (`&`)
    pub struct BitAndOperation {
        name: "bitAnd",
        symbol: Some("&"),
        friendly: "Bitwise And",
        category: Bitwise,
        description: "Bits set in both integers",
        signature: int_binary("bitAnd"),
        evaluate: |args| bit_and(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Bitwise or (`|`)
    pub struct BitOrOperation {
        name: "bitOr",
        symbol: Some("|"),
        friendly: "Bitwise Or",
        category: Bitwise,
        description: "Bits set in either integer",
        signature: int_binary("bitOr"),
        evaluate: |args| bit_or(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Bitwise exclusive or (`^`)
    pub struct BitXorOperation {
        name: "bitXor",
        symbol: Some("^"),
        friendly: "Bitwise Xor",
        category: Bitwise,
        description: "Bits set in exactly one of the integers",
        signature: int_binary("bitXor"),
        evaluate: |args| bit_xor(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Left shift (`<<`)
    pub struct BitShiftLeftOperation {
        name: "bitShiftLeft",
        symbol: Some("<<"),
        friendly: "Left Shift",
        category: Bitwise,
        description: "Shifts the first integer left by the second",
        signature: int_binary("bitShiftLeft"),
        evaluate: |args| bit_shift_left(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Sign-propagating right shift (`>>`)
    pub struct BitShiftRightOperation {
        name: "bitShiftRight",
        symbol: Some(">>"),
        friendly: "Right Shift",
        category: Bitwise,
        description: "Shifts the first integer right by the second, keeping the sign",
        signature: int_binary("bitShiftRight"),
        evaluate: |args| bit_shift_right(argument(args, 0), argument(args, 1)),
    }
}

crate::define_operation! {
    /// Zero-fill right shift (`>>>`)
    pub struct BitUnsignedShiftRightOperation {
        name: "bitUnsignedShiftRight",
        symbol: Some(">>>"),
        friendly: "Unsigned Right Shift",
        category: Bitwise,
        description: "Shifts the first integer right by the second, filling with zeros",
        signature: int_binary("bitUnsignedShiftRight"),
        evaluate: |args| bit_unsigned_shift_right(argument(args, 0), argument(args, 1)),
    }
}

/// Register the bitwise operations
pub fn register_bitwise_operations(library: &mut OperatorLibrary) {
    library.register(BitNotOperation);
    library.register(BitAndOperation);
    library.register(BitOrOperation);
    library.register(BitXorOperation);
    library.register(BitShiftLeftOperation);
    library.register(BitShiftRightOperation);
    library.register(BitUnsignedShiftRightOperation);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: f64) -> Value {
        Value::Number(value)
    }

    #[test]
    fn test_bitwise_logic() {
        assert_eq!(bit_and(&n(6.0), &n(5.0)).unwrap(), n(4.0));
        assert_eq!(bit_or(&n(6.0), &n(5.0)).unwrap(), n(7.0));
        assert_eq!(bit_xor(&n(6.0), &n(5.0)).unwrap(), n(3.0));
        assert_eq!(bit_not(&n(6.0)).unwrap(), n(-7.0));
        assert_eq!(bit_not(&Value::from("x")).unwrap(), n(-1.0));
    }

    #[test]
    fn test_shifts() {
        assert_eq!(bit_shift_left(&n(2.0), &n(2.0)).unwrap(), n(8.0));
        assert_eq!(bit_shift_left(&n(1.0), &n(33.0)).unwrap(), n(2.0));
        assert_eq!(bit_shift_left(&n(1.0), &n(31.0)).unwrap(), n(-2_147_483_648.0));
        assert_eq!(bit_shift_right(&n(8.0), &n(2.0)).unwrap(), n(2.0));
        assert_eq!(bit_shift_right(&n(-9.0), &n(2.0)).unwrap(), n(-3.0));
        assert_eq!(
            bit_unsigned_shift_right(&n(-9.0), &n(2.0)).unwrap(),
            n(1_073_741_821.0)
        );
        assert_eq!(
            bit_unsigned_shift_right(&n(-1.0), &n(0.0)).unwrap(),
            n(4_294_967_295.0)
        );
    }

    #[test]
    fn test_operands_wrap_to_32_bits() {
        assert_eq!(bit_or(&n(4_294_967_296.0), &n(0.0)).unwrap(), n(0.0));
        assert_eq!(bit_or(&n(2_147_483_648.0), &n(0.0)).unwrap(), n(-2_147_483_648.0));
        assert_eq!(bit_and(&n(f64::NAN), &n(1.0)).unwrap(), n(0.0));
    }
}
