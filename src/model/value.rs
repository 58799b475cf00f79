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

//! Core value type of the host model

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::function::Function;
use super::object::{ObjectKind, ObjectRef, string_own_property};
use super::realm::realm;
use super::type_coercion::TypeCoercion;
use super::types::{ClassTag, TypeTag};
use crate::error::{OperatorError, OperatorResult};

/// Dynamically typed value
///
/// `Undefined` and `Null` are two distinct empty sentinels: `Undefined` marks an
/// absent value (a missing property, a missing argument), `Null` an explicitly
/// empty one. Objects and functions are shared handles compared by identity.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value
    #[default]
    Undefined,

    /// The explicitly empty value
    Null,

    /// Boolean value
    Boolean(bool),

    /// IEEE-754 double, the only numeric type of the host
    Number(f64),

    /// String value
    String(String),

    /// Unique symbol
    Symbol(Symbol),

    /// Object, array, date or error
    Object(ObjectRef),

    /// Callable value
    Function(Function),
}

/// Unique symbol value with an optional description
#[derive(Clone)]
pub struct Symbol(Arc<SymbolData>);

struct SymbolData {
    description: Option<String>,
}

impl Symbol {
    /// Create a new symbol, distinct from every other symbol
    pub fn new(description: Option<String>) -> Self {
        Self(Arc::new(SymbolData { description }))
    }

    /// Description given at creation
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Key of an object property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// String key (numeric keys are stored in canonical string form)
    String(String),
    /// Symbol key
    Symbol(Symbol),
}

impl PropertyKey {
    /// Borrow the key as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(key: &str) -> Self {
        PropertyKey::String(key.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(key: String) -> Self {
        PropertyKey::String(key)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        PropertyKey::Symbol(symbol)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => f.write_str(s),
            PropertyKey::Symbol(s) => write!(f, "{s}"),
        }
    }
}

impl Value {
    /// Create a plain object inheriting from `Object.prototype`
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let object = ObjectRef::ordinary(Some(realm().object_prototype.clone()));
        for (key, value) in entries {
            object.set(key, value);
        }
        Value::Object(object)
    }

    /// Create an array inheriting from `Array.prototype`
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Object(ObjectRef::new(
            ObjectKind::Array(items.into_iter().collect()),
            Some(realm().array_prototype.clone()),
        ))
    }

    /// Create a fresh symbol value
    pub fn symbol(description: Option<&str>) -> Self {
        Value::Symbol(Symbol::new(description.map(str::to_string)))
    }

    /// Check for the absent sentinel
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check for the null sentinel
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check for either empty sentinel
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Objects and functions are object-like; everything else is a primitive
    pub fn is_object_like(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Function(_))
    }

    /// Inverse of [`Value::is_object_like`]
    pub fn is_primitive(&self) -> bool {
        !self.is_object_like()
    }

    /// Get the number, if this is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the object handle, if this is an object
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get the function, if this is callable
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Primitive category of the value
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Undefined => TypeTag::Undefined,
            Value::Null | Value::Object(_) => TypeTag::Object,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
            Value::Symbol(_) => TypeTag::Symbol,
            Value::Function(_) => TypeTag::Function,
        }
    }

    /// Internal class of the value
    pub fn class_tag(&self) -> ClassTag {
        match self {
            Value::Undefined => ClassTag::Undefined,
            Value::Null => ClassTag::Null,
            Value::Boolean(_) => ClassTag::Boolean,
            Value::Number(_) => ClassTag::Number,
            Value::String(_) => ClassTag::String,
            Value::Symbol(_) => ClassTag::Symbol,
            Value::Object(o) => o.class_tag(),
            Value::Function(_) => ClassTag::Function,
        }
    }

    /// Strict equality: same variant and same value, identity for shared values
    ///
    /// `NaN` is not equal to itself and `+0` equals `-0`.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// First object consulted after the value's own properties
    ///
    /// Primitives report the prototype of their wrapper class; the empty sentinels
    /// have none.
    pub fn prototype(&self) -> Option<ObjectRef> {
        let realm = realm();
        match self {
            Value::Undefined | Value::Null => None,
            Value::Boolean(_) => Some(realm.boolean_prototype.clone()),
            Value::Number(_) => Some(realm.number_prototype.clone()),
            Value::String(_) => Some(realm.string_prototype.clone()),
            Value::Symbol(_) => Some(realm.symbol_prototype.clone()),
            Value::Object(o) => o.prototype(),
            Value::Function(_) => Some(realm.function_prototype.clone()),
        }
    }

    /// Look up a property, walking the prototype chain
    ///
    /// Returns [`Value::Undefined`] when no object on the chain has the key.
    /// Reading from either empty sentinel is a type error.
    pub fn get_property(&self, key: &PropertyKey) -> OperatorResult<Value> {
        let own = match self {
            Value::Undefined | Value::Null => {
                return Err(OperatorError::type_error(format!(
                    "Cannot read properties of {} (reading '{}')",
                    self.type_name(),
                    key
                )));
            }
            Value::String(s) => key.as_str().and_then(|k| string_own_property(s, k)),
            Value::Object(o) => o.get_own(key),
            Value::Function(f) => f.get_own(key),
            _ => None,
        };

        match own {
            Some(value) => Ok(value),
            None => Ok(lookup_chain(self.prototype(), key)),
        }
    }

    /// Membership test including inherited properties
    ///
    /// Only object-like values can be searched; primitives are a type error.
    pub fn has_property(&self, key: &PropertyKey) -> OperatorResult<bool> {
        let own = match self {
            Value::Object(o) => o.has_own(key),
            Value::Function(f) => f.get_own(key).is_some(),
            _ => {
                return Err(OperatorError::type_error(format!(
                    "Cannot use 'in' operator to search for '{}' in {}",
                    key,
                    self.describe()
                )));
            }
        };

        if own {
            return Ok(true);
        }

        let mut current = self.prototype();
        while let Some(object) = current {
            if object.has_own(key) {
                return Ok(true);
            }
            current = object.prototype();
        }
        Ok(false)
    }

    /// Check whether `prototype` appears on this value's prototype chain
    pub fn inherits_from(&self, prototype: &ObjectRef) -> bool {
        if self.is_primitive() {
            return false;
        }
        let mut current = self.prototype();
        while let Some(object) = current {
            if object.ptr_eq(prototype) {
                return true;
            }
            current = object.prototype();
        }
        false
    }

    /// Invoke this value as a constructor
    pub fn construct(&self, args: &[Value]) -> OperatorResult<Value> {
        match self {
            Value::Function(f) => f.construct(args),
            other => Err(OperatorError::type_error(format!(
                "{} is not a constructor",
                other.describe()
            ))),
        }
    }

    /// Short lowercase name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            other => other.type_tag().as_str(),
        }
    }

    /// Render the value for an error message without invoking any method
    pub fn describe(&self) -> String {
        match self {
            Value::String(s) => format!("'{s}'"),
            Value::Object(o) => format!("[object {}]", o.class_tag()),
            Value::Function(f) => format!("function {}", f.name()),
            other => other.to_string(),
        }
    }

    /// Convert to JSON the way a host serializer would
    ///
    /// Returns `None` for values JSON cannot represent (undefined, functions,
    /// symbols, arrays too long to serialize). Non-finite numbers and
    /// self-references become `null`.
    pub fn to_json(&self) -> Option<JsonValue> {
        match self {
            Value::Undefined | Value::Function(_) | Value::Symbol(_) => None,
            Value::Null => Some(JsonValue::Null),
            Value::Boolean(b) => Some(JsonValue::Bool(*b)),
            Value::Number(n) => Some(number_to_json(*n)),
            Value::String(s) => Some(JsonValue::String(s.clone())),
            Value::Object(o) => o.to_json(),
        }
    }
}

pub(crate) fn lookup_chain(start: Option<ObjectRef>, key: &PropertyKey) -> Value {
    let mut current = start;
    while let Some(object) = current {
        if let Some(value) = object.get_own(key) {
            return value;
        }
        current = object.prototype();
    }
    Value::Undefined
}

pub(crate) fn number_to_json(n: f64) -> JsonValue {
    if !n.is_finite() {
        return JsonValue::Null;
    }
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return JsonValue::Number((n as i64).into());
    }
    serde_json::Number::from_f64(n)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::array(values)
    }
}

/// Convert from serde_json::Value; objects become plain objects, arrays arrays
impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Boolean(b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::array(items.into_iter().map(Value::from)),
            JsonValue::Object(map) => Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v)))),
        }
    }
}

/// Display follows the host string conversion, falling back to the class tag
/// for objects whose conversion fails
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&TypeCoercion::number_to_string(*n)),
            Value::String(s) => f.write_str(s),
            Value::Symbol(s) => write!(f, "{s}"),
            other => match TypeCoercion::to_string(other) {
                Ok(s) => f.write_str(&s),
                Err(_) => write!(f, "[object {}]", other.class_tag()),
            },
        }
    }
}

/// Debug output shows one level of structure; nested objects are abbreviated
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Number(n) => write!(f, "Number({})", TypeCoercion::number_to_string(*n)),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Object(o) => write!(f, "{o:?}"),
            Value::Function(func) => write!(f, "{func:?}"),
        }
    }
}

/// Serialization goes through [`Value::to_json`]; unrepresentable values become `null`
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json()
            .unwrap_or(JsonValue::Null)
            .serialize(serializer)
    }
}
