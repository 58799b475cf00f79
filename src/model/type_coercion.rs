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

//! Implicit conversions applied by the operators

use super::object::ObjectKind;
use super::value::{PropertyKey, Value};
use crate::error::{OperatorError, OperatorResult};

const TWO_32: f64 = 4_294_967_296.0;
const TWO_31: f64 = 2_147_483_648.0;

/// Conversion hint passed to [`TypeCoercion::to_primitive`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    /// No preference; dates behave as `String`, everything else as `Number`
    Default,
    /// Try `valueOf` before `toString`
    Number,
    /// Try `toString` before `valueOf`
    String,
}

/// Type coercion utility for host values
pub struct TypeCoercion;

impl TypeCoercion {
    /// Truthiness of a value
    ///
    /// `Undefined`, `Null`, `false`, `0`, `-0`, `NaN` and `""` are falsy; every
    /// other value, including every object, is truthy.
    pub fn to_boolean(value: &Value) -> bool {
        match value {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Symbol(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    /// Numeric conversion
    pub fn to_number(value: &Value) -> OperatorResult<f64> {
        match value {
            Value::Undefined => Ok(f64::NAN),
            Value::Null => Ok(0.0),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Ok(*n),
            Value::String(s) => Ok(Self::string_to_number(s)),
            Value::Symbol(_) => Err(OperatorError::type_error(
                "Cannot convert a Symbol value to a number",
            )),
            Value::Object(_) | Value::Function(_) => {
                let primitive = Self::to_primitive(value, PreferredType::Number)?;
                Self::to_number(&primitive)
            }
        }
    }

    /// Parse a numeric string
    ///
    /// Surrounding whitespace is ignored and the empty string is `0`. Accepts
    /// decimal literals with optional sign and exponent, `Infinity`, and unsigned
    /// `0x`, `0o` and `0b` integer literals. Anything else is `NaN`.
    pub fn string_to_number(text: &str) -> f64 {
        let text = text.trim();
        if text.is_empty() {
            return 0.0;
        }

        match text {
            "Infinity" | "+Infinity" => return f64::INFINITY,
            "-Infinity" => return f64::NEG_INFINITY,
            _ => {}
        }

        let radix = match text.get(..2) {
            Some("0x") | Some("0X") => Some(16),
            Some("0o") | Some("0O") => Some(8),
            Some("0b") | Some("0B") => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            let digits = &text[2..];
            if digits.is_empty() {
                return f64::NAN;
            }
            return digits.chars().try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
        }

        let well_formed = text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
        if !well_formed {
            return f64::NAN;
        }
        text.parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Shortest decimal rendering of a number, as the host prints it
    ///
    /// Integral values print without a fraction; very large or very small
    /// magnitudes switch to exponent notation (`1e+21`, `1e-7`).
    pub fn number_to_string(n: f64) -> String {
        if n.is_nan() {
            return "NaN".to_string();
        }
        if n == 0.0 {
            return "0".to_string();
        }
        if n.is_infinite() {
            return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }

        let sign = if n < 0.0 { "-" } else { "" };
        // `{:e}` yields the shortest round-tripping digits, e.g. "1.2345e3"
        let scientific = format!("{:e}", n.abs());
        let (mantissa, exponent) = match scientific.split_once('e') {
            Some(parts) => parts,
            None => return format!("{n}"),
        };
        let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let k = digits.len() as i32;
        let point = exponent + 1;

        let body = if k <= point && point <= 21 {
            format!("{digits}{}", "0".repeat((point - k) as usize))
        } else if 0 < point && point <= 21 {
            let (int, frac) = digits.split_at(point as usize);
            format!("{int}.{frac}")
        } else if -6 < point && point <= 0 {
            format!("0.{}{digits}", "0".repeat((-point) as usize))
        } else {
            let exp_sign = if point - 1 < 0 { '-' } else { '+' };
            let (first, rest) = digits.split_at(1);
            if rest.is_empty() {
                format!("{first}e{exp_sign}{}", (point - 1).abs())
            } else {
                format!("{first}.{rest}e{exp_sign}{}", (point - 1).abs())
            }
        };
        format!("{sign}{body}")
    }

    /// String conversion
    pub fn to_string(value: &Value) -> OperatorResult<String> {
        match value {
            Value::Undefined => Ok("undefined".to_string()),
            Value::Null => Ok("null".to_string()),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(Self::number_to_string(*n)),
            Value::String(s) => Ok(s.clone()),
            Value::Symbol(_) => Err(OperatorError::type_error(
                "Cannot convert a Symbol value to a string",
            )),
            Value::Object(_) | Value::Function(_) => {
                let primitive = Self::to_primitive(value, PreferredType::String)?;
                Self::to_string(&primitive)
            }
        }
    }

    /// Reduce a value to a primitive by calling its `valueOf` / `toString`
    ///
    /// Primitives are returned unchanged. For objects the two methods are tried
    /// in hint order and the first primitive result wins.
    pub fn to_primitive(value: &Value, hint: PreferredType) -> OperatorResult<Value> {
        if value.is_primitive() {
            return Ok(value.clone());
        }

        let is_date = value
            .as_object()
            .is_some_and(|o| matches!(o.kind(), ObjectKind::Date(_)));
        let methods = match hint {
            PreferredType::String => ["toString", "valueOf"],
            PreferredType::Default if is_date => ["toString", "valueOf"],
            _ => ["valueOf", "toString"],
        };

        for name in methods {
            let method = value.get_property(&PropertyKey::from(name))?;
            if let Value::Function(f) = method {
                let result = f.call_with_this(value, &[])?;
                if result.is_primitive() {
                    return Ok(result);
                }
            }
        }

        Err(OperatorError::type_error(
            "Cannot convert object to primitive value",
        ))
    }

    /// Signed 32-bit integer conversion (wrapping modulo 2^32)
    pub fn to_int32(value: &Value) -> OperatorResult<i32> {
        let unsigned = Self::wrap_u32(Self::to_number(value)?);
        Ok(if unsigned >= TWO_31 {
            (unsigned - TWO_32) as i32
        } else {
            unsigned as i32
        })
    }

    /// Unsigned 32-bit integer conversion (wrapping modulo 2^32)
    pub fn to_uint32(value: &Value) -> OperatorResult<u32> {
        Ok(Self::wrap_u32(Self::to_number(value)?) as u32)
    }

    fn wrap_u32(n: f64) -> f64 {
        if !n.is_finite() {
            return 0.0;
        }
        n.trunc().rem_euclid(TWO_32)
    }

    /// Convert a value into a property key
    ///
    /// Symbols stay symbols; everything else is converted to its string form.
    pub fn to_property_key(value: &Value) -> OperatorResult<PropertyKey> {
        match Self::to_primitive(value, PreferredType::String)? {
            Value::Symbol(s) => Ok(PropertyKey::Symbol(s)),
            primitive => Ok(PropertyKey::String(Self::to_string(&primitive)?)),
        }
    }
}
