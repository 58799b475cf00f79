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

//! Intrinsic prototypes and constructors shared by every value
//!
//! The realm is built once per process. Building it must not go through
//! [`realm()`] itself, so everything here allocates with explicit prototypes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::sync::{Arc, LazyLock};

use super::function::{Function, NativeMethod};
use super::object::{ArrayElements, ObjectKind, ObjectRef, TraversalGuard};
use super::type_coercion::TypeCoercion;
use super::types::ClassTag;
use super::value::{PropertyKey, Symbol, Value};
use crate::error::{OperatorError, OperatorResult};

const MS_PER_DAY: f64 = 86_400_000.0;
const MAX_TIME_VALUE: f64 = 8.64e15;
/// Beyond this the civil-day arithmetic would leave `i64`; any such year is
/// far outside the time value range anyway
const MAX_CIVIL_YEAR: f64 = 1e12;
/// Longest string a join may produce
const MAX_STRING_LENGTH: usize = (1 << 29) - 24;

/// Intrinsic objects of the host model
pub struct Realm {
    /// Root of every prototype chain
    pub object_prototype: ObjectRef,
    /// Prototype of every function
    pub function_prototype: ObjectRef,
    /// Prototype of arrays
    pub array_prototype: ObjectRef,
    /// Prototype consulted for string primitives
    pub string_prototype: ObjectRef,
    /// Prototype consulted for number primitives
    pub number_prototype: ObjectRef,
    /// Prototype consulted for boolean primitives
    pub boolean_prototype: ObjectRef,
    /// Prototype consulted for symbols
    pub symbol_prototype: ObjectRef,
    /// Prototype of dates
    pub date_prototype: ObjectRef,
    /// Prototype of errors
    pub error_prototype: ObjectRef,

    object: Function,
    function: Function,
    array: Function,
    string: Function,
    number: Function,
    boolean: Function,
    symbol: Function,
    date: Function,
    error: Function,
}

static REALM: LazyLock<Realm> = LazyLock::new(Realm::build);

/// The process-wide realm
pub fn realm() -> &'static Realm {
    &REALM
}

impl Realm {
    /// `Object` constructor
    pub fn object(&self) -> &Function {
        &self.object
    }

    /// `Function` constructor
    pub fn function(&self) -> &Function {
        &self.function
    }

    /// `Array` constructor
    pub fn array(&self) -> &Function {
        &self.array
    }

    /// `String` constructor
    pub fn string(&self) -> &Function {
        &self.string
    }

    /// `Number` constructor
    pub fn number(&self) -> &Function {
        &self.number
    }

    /// `Boolean` constructor
    pub fn boolean(&self) -> &Function {
        &self.boolean
    }

    /// `Symbol` function
    pub fn symbol(&self) -> &Function {
        &self.symbol
    }

    /// `Date` constructor
    pub fn date(&self) -> &Function {
        &self.date
    }

    /// `Error` constructor
    pub fn error(&self) -> &Function {
        &self.error
    }

    /// Look up an intrinsic constructor by name
    pub fn constructor(&self, name: &str) -> Option<&Function> {
        match name {
            "Object" => Some(&self.object),
            "Function" => Some(&self.function),
            "Array" => Some(&self.array),
            "String" => Some(&self.string),
            "Number" => Some(&self.number),
            "Boolean" => Some(&self.boolean),
            "Symbol" => Some(&self.symbol),
            "Date" => Some(&self.date),
            "Error" => Some(&self.error),
            _ => None,
        }
    }

    fn build() -> Self {
        log::debug!("building intrinsic realm");

        let object_prototype = ObjectRef::ordinary(None);
        let derived = || ObjectRef::ordinary(Some(object_prototype.clone()));
        let function_prototype = derived();
        let array_prototype = ObjectRef::new(ObjectKind::Array(ArrayElements::default()), Some(object_prototype.clone()));
        let string_prototype = derived();
        let number_prototype = derived();
        let boolean_prototype = derived();
        let symbol_prototype = derived();
        let date_prototype = derived();
        let error_prototype = derived();

        define_method(&object_prototype, "toString", 0, |this, _| {
            Ok(Value::String(object_to_string(this)))
        });
        define_method(&object_prototype, "valueOf", 0, |this, _| Ok(this.clone()));
        define_method(&object_prototype, "hasOwnProperty", 1, has_own_property);

        define_method(&function_prototype, "toString", 0, |this, _| match this {
            Value::Function(f) => Ok(Value::String(format!(
                "function {}() {{ [native code] }}",
                f.name()
            ))),
            _ => Err(OperatorError::type_error(
                "Function.prototype.toString requires that 'this' be a Function",
            )),
        });

        define_method(&array_prototype, "join", 1, |this, args| {
            let separator = match args.first() {
                None | Some(Value::Undefined) => ",".to_string(),
                Some(sep) => TypeCoercion::to_string(sep)?,
            };
            join_elements(this, &separator)
        });
        define_method(&array_prototype, "toString", 0, |this, _| {
            match this.as_object().and_then(ObjectRef::elements) {
                Some(_) => join_elements(this, ","),
                None => Ok(Value::String(object_to_string(this))),
            }
        });

        define_primitive_methods(&string_prototype, ClassTag::String);
        define_primitive_methods(&number_prototype, ClassTag::Number);
        define_primitive_methods(&boolean_prototype, ClassTag::Boolean);
        define_method(&symbol_prototype, "toString", 0, |this, _| {
            match this_symbol(this)? {
                Value::Symbol(s) => Ok(Value::String(s.to_string())),
                other => Ok(other),
            }
        });
        define_method(&symbol_prototype, "valueOf", 0, |this, _| this_symbol(this));

        define_method(&date_prototype, "valueOf", 0, |this, _| {
            Ok(Value::Number(this_time_value(this)?))
        });
        define_method(&date_prototype, "getTime", 0, |this, _| {
            Ok(Value::Number(this_time_value(this)?))
        });
        define_method(&date_prototype, "toString", 0, |this, _| {
            Ok(Value::String(date_string(this_time_value(this)?)))
        });
        define_method(&date_prototype, "toISOString", 0, |this, _| {
            iso_string(this_time_value(this)?)
                .map(Value::String)
                .ok_or_else(|| OperatorError::range_error("Invalid time value"))
        });

        error_prototype.set("name", Value::from("Error"));
        error_prototype.set("message", Value::from(""));
        define_method(&error_prototype, "toString", 0, error_to_string);

        let object = Function::with_prototype(
            "Object",
            1,
            object_prototype.clone(),
            Arc::new(|_this: &Value, args: &[Value]| {
                let value = args.first().cloned().unwrap_or_default();
                match value {
                    Value::Undefined | Value::Null => Ok(Value::object(Vec::<(String, Value)>::new())),
                    other if other.is_object_like() => Ok(other),
                    primitive => Ok(boxed(primitive)),
                }
            }),
        );

        let function = Function::with_prototype(
            "Function",
            1,
            function_prototype.clone(),
            Arc::new(|_this: &Value, _args: &[Value]| {
                Err(OperatorError::type_error(
                    "Function constructor cannot compile source text",
                ))
            }),
        );

        let array = Function::with_prototype(
            "Array",
            1,
            array_prototype.clone(),
            Arc::new(|_this: &Value, args: &[Value]| match args {
                [Value::Number(n)] => {
                    let length = *n;
                    if length < 0.0 || length.fract() != 0.0 || length > f64::from(u32::MAX) {
                        return Err(OperatorError::range_error("Invalid array length"));
                    }
                    Ok(Value::Object(ObjectRef::new(
                        ObjectKind::Array(ArrayElements::with_length(length as u32)),
                        Some(realm().array_prototype.clone()),
                    )))
                }
                items => Ok(Value::array(items.iter().cloned())),
            }),
        );

        let string = Function::with_prototype(
            "String",
            1,
            string_prototype.clone(),
            Arc::new(|this: &Value, args: &[Value]| {
                let text = match args.first() {
                    None => String::new(),
                    Some(Value::Symbol(s)) if this.is_undefined() => s.to_string(),
                    Some(value) => TypeCoercion::to_string(value)?,
                };
                wrap_if_constructing(this, Value::String(text))
            }),
        );

        let number = Function::with_prototype(
            "Number",
            1,
            number_prototype.clone(),
            Arc::new(|this: &Value, args: &[Value]| {
                let n = match args.first() {
                    None => 0.0,
                    Some(value) => TypeCoercion::to_number(value)?,
                };
                wrap_if_constructing(this, Value::Number(n))
            }),
        );

        let boolean = Function::with_prototype(
            "Boolean",
            1,
            boolean_prototype.clone(),
            Arc::new(|this: &Value, args: &[Value]| {
                let b = args.first().is_some_and(TypeCoercion::to_boolean);
                wrap_if_constructing(this, Value::Boolean(b))
            }),
        );

        let symbol = Function::with_prototype(
            "Symbol",
            0,
            symbol_prototype.clone(),
            Arc::new(|this: &Value, args: &[Value]| {
                if !this.is_undefined() {
                    return Err(OperatorError::type_error("Symbol is not a constructor"));
                }
                let description = match args.first() {
                    None | Some(Value::Undefined) => None,
                    Some(value) => Some(TypeCoercion::to_string(value)?),
                };
                Ok(Value::Symbol(Symbol::new(description)))
            }),
        );

        let date = Function::with_prototype(
            "Date",
            7,
            date_prototype.clone(),
            Arc::new(|this: &Value, args: &[Value]| {
                if this.is_undefined() {
                    return Ok(Value::String(date_string(now())));
                }
                let time = date_time_value(args)?;
                Ok(Value::Object(ObjectRef::new(
                    ObjectKind::Date(time),
                    Some(realm().date_prototype.clone()),
                )))
            }),
        );

        let error = Function::with_prototype(
            "Error",
            1,
            error_prototype.clone(),
            Arc::new(|_this: &Value, args: &[Value]| {
                let error = ObjectRef::new(ObjectKind::Error, Some(realm().error_prototype.clone()));
                if let Some(message) = args.first().filter(|m| !m.is_undefined()) {
                    error.set("message", Value::String(TypeCoercion::to_string(message)?));
                }
                Ok(Value::Object(error))
            }),
        );

        Self {
            object_prototype,
            function_prototype,
            array_prototype,
            string_prototype,
            number_prototype,
            boolean_prototype,
            symbol_prototype,
            date_prototype,
            error_prototype,
            object,
            function,
            array,
            string,
            number,
            boolean,
            symbol,
            date,
            error,
        }
    }
}

fn define_method<F>(target: &ObjectRef, name: &str, arity: usize, body: F)
where
    F: Fn(&Value, &[Value]) -> OperatorResult<Value> + Send + Sync + 'static,
{
    target.set(name, Value::Function(Function::native(name, arity, body)));
}

fn define_primitive_methods(target: &ObjectRef, class: ClassTag) {
    let unwrap: NativeMethod = Arc::new(move |this: &Value, _: &[Value]| this_primitive(this, class));
    let value_of = unwrap.clone();
    target.set(
        "valueOf",
        Value::Function(Function::native("valueOf", 0, move |this, args| {
            value_of(this, args)
        })),
    );
    target.set(
        "toString",
        Value::Function(Function::native("toString", 0, move |this, args| {
            let primitive = unwrap(this, args)?;
            Ok(Value::String(TypeCoercion::to_string(&primitive)?))
        })),
    );
}

/// `Object.prototype.toString`: `"[object <Class>]"` for any value
pub fn object_to_string(value: &Value) -> String {
    format!("[object {}]", value.class_tag())
}

fn boxed(primitive: Value) -> Value {
    let prototype = primitive.prototype();
    Value::Object(ObjectRef::new(ObjectKind::Boxed(primitive), prototype))
}

fn wrap_if_constructing(this: &Value, primitive: Value) -> OperatorResult<Value> {
    if this.is_undefined() {
        Ok(primitive)
    } else {
        Ok(boxed(primitive))
    }
}

fn this_primitive(this: &Value, class: ClassTag) -> OperatorResult<Value> {
    let primitive = match this {
        Value::Object(o) => o.primitive_value(),
        other => Some(other.clone()),
    };
    match primitive {
        Some(value) if value.class_tag() == class => Ok(value),
        _ => Err(OperatorError::type_error(format!(
            "{class}.prototype.valueOf requires that 'this' be a {class}"
        ))),
    }
}

fn this_symbol(this: &Value) -> OperatorResult<Value> {
    match this {
        Value::Symbol(_) => Ok(this.clone()),
        _ => Err(OperatorError::type_error(
            "Symbol.prototype.valueOf requires that 'this' be a Symbol",
        )),
    }
}

fn this_time_value(this: &Value) -> OperatorResult<f64> {
    this.as_object()
        .and_then(ObjectRef::time_value)
        .ok_or_else(|| OperatorError::type_error("this is not a Date object."))
}

fn has_own_property(this: &Value, args: &[Value]) -> OperatorResult<Value> {
    let key = TypeCoercion::to_property_key(args.first().unwrap_or(&Value::Undefined))?;
    let own = match this {
        Value::Undefined | Value::Null => {
            return Err(OperatorError::type_error(
                "Cannot convert undefined or null to object",
            ));
        }
        Value::Object(o) => o.has_own(&key),
        Value::Function(f) => f.get_own(&key).is_some(),
        Value::String(s) => key
            .as_str()
            .and_then(|k| super::object::string_own_property(s, k))
            .is_some(),
        _ => false,
    };
    Ok(Value::Boolean(own))
}

fn join_elements(this: &Value, separator: &str) -> OperatorResult<Value> {
    let (object, elements) = this
        .as_object()
        .and_then(|o| Some((o, o.elements()?)))
        .ok_or_else(|| OperatorError::type_error("Array.prototype.join called on non-array"))?;

    // an array met again while it is being joined contributes nothing
    let Some(_guard) = TraversalGuard::enter(object) else {
        return Ok(Value::String(String::new()));
    };

    let separators = (elements.len() as usize).saturating_sub(1);
    if separators.saturating_mul(separator.len()) > MAX_STRING_LENGTH {
        return Err(OperatorError::range_error("Invalid string length"));
    }

    // holes and nullish elements are empty; only separators are written for them
    let mut text = String::new();
    let mut written = 0;
    for (index, item) in elements.stored() {
        if item.is_nullish() {
            continue;
        }
        let index = index as usize;
        text.push_str(&separator.repeat(index - written));
        written = index;
        text.push_str(&TypeCoercion::to_string(item)?);
        if text.len() > MAX_STRING_LENGTH {
            return Err(OperatorError::range_error("Invalid string length"));
        }
    }
    text.push_str(&separator.repeat(separators - written));
    Ok(Value::String(text))
}

fn error_to_string(this: &Value, _args: &[Value]) -> OperatorResult<Value> {
    if !this.is_object_like() {
        return Err(OperatorError::type_error(
            "Error.prototype.toString requires that 'this' be an Object",
        ));
    }
    let name = match this.get_property(&PropertyKey::from("name"))? {
        Value::Undefined => "Error".to_string(),
        value => TypeCoercion::to_string(&value)?,
    };
    let message = match this.get_property(&PropertyKey::from("message"))? {
        Value::Undefined => String::new(),
        value => TypeCoercion::to_string(&value)?,
    };
    let text = match (name.is_empty(), message.is_empty()) {
        (_, true) => name,
        (true, false) => message,
        (false, false) => format!("{name}: {message}"),
    };
    Ok(Value::String(text))
}

fn now() -> f64 {
    Utc::now().timestamp_millis() as f64
}

fn to_datetime(time: f64) -> Option<DateTime<Utc>> {
    if time.is_nan() {
        return None;
    }
    DateTime::from_timestamp_millis(time as i64)
}

fn date_string(time: f64) -> String {
    match to_datetime(time) {
        Some(dt) => dt
            .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
            .to_string(),
        None => "Invalid Date".to_string(),
    }
}

pub(crate) fn iso_string(time: f64) -> Option<String> {
    to_datetime(time).map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

fn time_clip(time: f64) -> f64 {
    if !time.is_finite() || time.abs() > MAX_TIME_VALUE {
        f64::NAN
    } else {
        time.trunc() + 0.0
    }
}

fn parse_date(text: &str) -> f64 {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.timestamp_millis() as f64;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.and_utc().timestamp_millis() as f64;
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.and_utc().timestamp_millis() as f64;
        }
    }
    f64::NAN
}

fn date_time_value(args: &[Value]) -> OperatorResult<f64> {
    match args {
        [] => Ok(now()),
        [single] => {
            if let Some(time) = single.as_object().and_then(ObjectRef::time_value) {
                return Ok(time);
            }
            match TypeCoercion::to_primitive(single, super::type_coercion::PreferredType::Default)? {
                Value::String(text) => Ok(parse_date(&text)),
                primitive => Ok(time_clip(TypeCoercion::to_number(&primitive)?)),
            }
        }
        components => {
            let mut fields = [f64::NAN, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
            for (slot, value) in fields.iter_mut().zip(components.iter()) {
                *slot = TypeCoercion::to_number(value)?;
            }
            Ok(time_clip(make_time_value(&fields)))
        }
    }
}

/// Combine year, month (0-based), day, hours, minutes, seconds and
/// milliseconds into a UTC time value; out-of-range fields carry over
fn make_time_value(fields: &[f64; 7]) -> f64 {
    if fields.iter().any(|f| !f.is_finite()) {
        return f64::NAN;
    }
    let [year, month, day, hours, minutes, seconds, millis] = fields.map(f64::trunc);
    let year = if (0.0..=99.0).contains(&year) {
        1900.0 + year
    } else {
        year
    };
    let year = year + (month / 12.0).floor();
    if year.abs() > MAX_CIVIL_YEAR {
        return f64::NAN;
    }
    let month = month.rem_euclid(12.0);
    let days = days_from_civil(year as i64, month as i64 + 1, 1) as f64 + day - 1.0;
    days * MS_PER_DAY + hours * 3_600_000.0 + minutes * 60_000.0 + seconds * 1000.0 + millis
}

/// Days since 1970-01-01 for a proleptic Gregorian date
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intrinsic_chains() {
        let realm = realm();
        assert!(realm.object_prototype.prototype().is_none());
        assert!(
            realm
                .array_prototype
                .prototype()
                .unwrap()
                .ptr_eq(&realm.object_prototype)
        );
        assert!(realm.array().is_constructor());
        assert!(realm.constructor("Date").is_some());
        assert!(realm.constructor("Promise").is_none());
    }

    #[test]
    fn test_object_to_string_tags() {
        assert_eq!(object_to_string(&Value::Undefined), "[object Undefined]");
        assert_eq!(object_to_string(&Value::Null), "[object Null]");
        assert_eq!(object_to_string(&Value::from("x")), "[object String]");
        assert_eq!(object_to_string(&Value::array([])), "[object Array]");
    }

    #[test]
    fn test_array_constructor() {
        let array = realm().array();
        let single = array.construct(&[Value::from("foo")]).unwrap();
        assert_eq!(single.to_string(), "foo");

        let sized = array.construct(&[Value::from(3)]).unwrap();
        assert_eq!(sized.get_property(&"length".into()).unwrap(), Value::from(3));

        let err = array.construct(&[Value::from(-1)]).unwrap_err();
        assert!(matches!(err, OperatorError::RangeError { .. }));
    }

    #[test]
    fn test_maximum_length_array_allocates_nothing() {
        let array = realm().array().construct(&[Value::from(4_294_967_295_u32)]).unwrap();
        assert_eq!(
            array.get_property(&"length".into()).unwrap(),
            Value::from(4_294_967_295_u32)
        );
        assert_eq!(array.as_object().unwrap().elements().unwrap().stored().count(), 0);
        assert_eq!(join_elements(&array, "").unwrap(), Value::from(""));

        let err = join_elements(&array, ",").unwrap_err();
        assert_eq!(err, OperatorError::range_error("Invalid string length"));
    }

    #[test]
    fn test_join_fills_holes_with_separators() {
        let array = realm().array().construct(&[Value::from(4)]).unwrap();
        let object = array.as_object().unwrap();
        object.set("1", Value::from("a"));
        object.set("2", Value::Null);
        assert_eq!(join_elements(&array, "-").unwrap(), Value::from("-a--"));
    }

    #[test]
    fn test_join_of_self_containing_array() {
        let array = Value::array([Value::from(1)]);
        array.as_object().unwrap().set("1", array.clone());
        assert_eq!(join_elements(&array, ",").unwrap(), Value::from("1,"));

        let holder = Value::array([array.clone(), array.clone()]);
        assert_eq!(join_elements(&holder, ",").unwrap(), Value::from("1,,1,"));
    }

    #[test]
    fn test_boxed_primitives() {
        let boxed = realm().string().construct(&[Value::from("foo")]).unwrap();
        assert_eq!(boxed.class_tag(), ClassTag::String);
        assert_eq!(boxed.get_property(&"length".into()).unwrap(), Value::from(3));
        assert_eq!(TypeCoercion::to_string(&boxed).unwrap(), "foo");

        let called = realm().string().call(&[Value::from(12)]).unwrap();
        assert_eq!(called, Value::from("12"));
    }

    #[test]
    fn test_date_values() {
        let date = realm().date().construct(&[Value::from(0)]).unwrap();
        assert_eq!(date.class_tag(), ClassTag::Date);
        assert_eq!(TypeCoercion::to_number(&date).unwrap(), 0.0);
        assert_eq!(
            date.to_string(),
            "Thu Jan 01 1970 00:00:00 GMT+0000 (Coordinated Universal Time)"
        );

        let components = realm()
            .date()
            .construct(&[Value::from(2020), Value::from(1), Value::from(29)])
            .unwrap();
        assert_eq!(
            components.to_json(),
            Some(serde_json::json!("2020-02-29T00:00:00.000Z"))
        );

        let invalid = realm().date().construct(&[Value::from("not a date")]).unwrap();
        assert_eq!(invalid.to_string(), "Invalid Date");
    }

    #[test]
    fn test_dates_with_enormous_years_are_invalid() {
        for year in [1e300, -1e300, 1e13, -1e13] {
            let date = realm()
                .date()
                .construct(&[Value::from(year), Value::from(0)])
                .unwrap();
            assert_eq!(date.to_string(), "Invalid Date");
        }
        assert!(make_time_value(&[f64::MAX, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).is_nan());
        assert!(make_time_value(&[2020.0, 1e300, 1.0, 0.0, 0.0, 0.0, 0.0]).is_nan());
    }

    #[test]
    fn test_error_constructor() {
        let error = realm().error().construct(&[Value::from("boom")]).unwrap();
        assert_eq!(error.class_tag(), ClassTag::Error);
        assert_eq!(error.to_string(), "Error: boom");
        assert!(error.inherits_from(&realm().error_prototype));
    }

    #[test]
    fn test_symbol_is_not_constructible() {
        let err = realm().symbol().construct(&[]).unwrap_err();
        assert_eq!(err, OperatorError::type_error("Symbol is not a constructor"));
        let symbol = realm().symbol().call(&[Value::from("k")]).unwrap();
        assert_eq!(symbol.to_string(), "Symbol(k)");
    }

    #[test]
    fn test_days_from_civil() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
    }
}
