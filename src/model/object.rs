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

//! Shared object storage and the prototype chain

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::types::ClassTag;
use super::value::{PropertyKey, Value, number_to_json};

/// Internal shape of an object
#[derive(Debug, Clone)]
pub enum ObjectKind {
    /// Plain object
    Ordinary,
    /// Array; holes take no storage
    Array(ArrayElements),
    /// Date holding a millisecond time value (`NaN` for an invalid date)
    Date(f64),
    /// Error object; the message lives in an own `message` property
    Error,
    /// Wrapper around a boolean, number or string primitive
    Boxed(Value),
}

/// Largest array converted to JSON; longer arrays are unrepresentable
const MAX_JSON_ARRAY_LENGTH: u32 = 1 << 24;

/// Elements of an array: the stored values by index plus the logical `length`
///
/// Indices below `length` with nothing stored are holes. They read as absent,
/// so `new Array(4294967295)` costs no more than `[]`.
#[derive(Debug, Clone, Default)]
pub struct ArrayElements {
    items: BTreeMap<u32, Value>,
    length: u32,
}

impl ArrayElements {
    /// An array of `length` holes
    pub fn with_length(length: u32) -> Self {
        Self {
            items: BTreeMap::new(),
            length,
        }
    }

    /// Logical length
    pub fn len(&self) -> u32 {
        self.length
    }

    /// Check for a zero length
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Stored element at `index`; `None` for holes and out-of-range indices
    pub fn get(&self, index: u32) -> Option<&Value> {
        self.items.get(&index)
    }

    /// Store an element, growing `length` past `index` if needed
    pub fn set(&mut self, index: u32, value: Value) {
        self.items.insert(index, value);
        if index >= self.length {
            self.length = index.saturating_add(1);
        }
    }

    /// Stored elements in index order, skipping holes
    pub fn stored(&self) -> impl Iterator<Item = (u32, &Value)> {
        self.items.iter().map(|(index, value)| (*index, value))
    }
}

impl FromIterator<Value> for ArrayElements {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut elements = Self::default();
        for value in iter {
            let index = elements.length;
            elements.set(index, value);
        }
        elements
    }
}

thread_local! {
    static ACTIVE: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks an object as being traversed on this thread until dropped
///
/// Used by recursive conversions (`join`, JSON) to detect an object that
/// contains itself.
pub(crate) struct TraversalGuard(usize);

impl TraversalGuard {
    /// `None` when `object` is already being traversed further up the stack
    pub(crate) fn enter(object: &ObjectRef) -> Option<Self> {
        let address = Arc::as_ptr(&object.0) as usize;
        ACTIVE.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&address) {
                None
            } else {
                active.push(address);
                Some(Self(address))
            }
        })
    }
}

impl Drop for TraversalGuard {
    fn drop(&mut self) {
        ACTIVE.with(|active| {
            let mut active = active.borrow_mut();
            if let Some(position) = active.iter().rposition(|a| *a == self.0) {
                active.remove(position);
            }
        });
    }
}

struct ObjectData {
    kind: ObjectKind,
    prototype: Option<ObjectRef>,
    properties: IndexMap<PropertyKey, Value>,
}

/// Shared handle to an object
///
/// Clones refer to the same object; equality between handles is identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<ObjectData>>);

impl ObjectRef {
    /// Allocate an object of the given kind and prototype
    pub fn new(kind: ObjectKind, prototype: Option<ObjectRef>) -> Self {
        Self(Arc::new(RwLock::new(ObjectData {
            kind,
            prototype,
            properties: IndexMap::new(),
        })))
    }

    /// Allocate a plain object
    pub fn ordinary(prototype: Option<ObjectRef>) -> Self {
        Self::new(ObjectKind::Ordinary, prototype)
    }

    /// Check whether two handles refer to the same object
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Snapshot of the object's kind
    pub fn kind(&self) -> ObjectKind {
        self.0.read().kind.clone()
    }

    /// Internal class of the object
    pub fn class_tag(&self) -> ClassTag {
        match &self.0.read().kind {
            ObjectKind::Ordinary => ClassTag::Object,
            ObjectKind::Array(_) => ClassTag::Array,
            ObjectKind::Date(_) => ClassTag::Date,
            ObjectKind::Error => ClassTag::Error,
            ObjectKind::Boxed(inner) => inner.class_tag(),
        }
    }

    /// Next object on the prototype chain
    pub fn prototype(&self) -> Option<ObjectRef> {
        self.0.read().prototype.clone()
    }

    /// Replace the prototype
    pub fn set_prototype(&self, prototype: Option<ObjectRef>) {
        self.0.write().prototype = prototype;
    }

    /// Read an own property
    ///
    /// Arrays answer `length` and canonical indices from their elements; boxed
    /// strings answer `length` and indices from their characters.
    pub fn get_own(&self, key: &PropertyKey) -> Option<Value> {
        let data = self.0.read();
        if let PropertyKey::String(name) = key {
            match &data.kind {
                ObjectKind::Array(elements) => {
                    if name == "length" {
                        return Some(Value::Number(f64::from(elements.len())));
                    }
                    if let Some(index) = array_index(name) {
                        return elements.get(index).cloned();
                    }
                }
                ObjectKind::Boxed(Value::String(s)) => {
                    if let Some(value) = string_own_property(s, name) {
                        return Some(value);
                    }
                }
                _ => {}
            }
        }
        data.properties.get(key).cloned()
    }

    /// Check for an own property
    pub fn has_own(&self, key: &PropertyKey) -> bool {
        self.get_own(key).is_some()
    }

    /// Write an own property
    ///
    /// Writing an array index past the end grows the array's `length`; the
    /// skipped indices stay holes.
    pub fn set(&self, key: impl Into<PropertyKey>, value: Value) {
        let key = key.into();
        let mut data = self.0.write();
        if let (ObjectKind::Array(elements), PropertyKey::String(name)) = (&mut data.kind, &key) {
            if let Some(index) = array_index(name) {
                elements.set(index, value);
                return;
            }
        }
        data.properties.insert(key, value);
    }

    /// Own keys in insertion order, array indices first
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let data = self.0.read();
        let mut keys = Vec::new();
        match &data.kind {
            ObjectKind::Array(elements) => {
                keys.extend(elements.stored().map(|(i, _)| PropertyKey::String(i.to_string())));
                keys.push(PropertyKey::from("length"));
            }
            ObjectKind::Boxed(Value::String(s)) => {
                let count = s.encode_utf16().count();
                keys.extend((0..count).map(|i| PropertyKey::String(i.to_string())));
                keys.push(PropertyKey::from("length"));
            }
            _ => {}
        }
        keys.extend(data.properties.keys().cloned());
        keys
    }

    /// Snapshot of an array object's elements
    pub fn elements(&self) -> Option<ArrayElements> {
        match &self.0.read().kind {
            ObjectKind::Array(elements) => Some(elements.clone()),
            _ => None,
        }
    }

    /// Time value of a date object
    pub fn time_value(&self) -> Option<f64> {
        match &self.0.read().kind {
            ObjectKind::Date(t) => Some(*t),
            _ => None,
        }
    }

    /// Wrapped primitive of a boxed object
    pub fn primitive_value(&self) -> Option<Value> {
        match &self.0.read().kind {
            ObjectKind::Boxed(inner) => Some(inner.clone()),
            _ => None,
        }
    }

    /// JSON form of the object
    ///
    /// `None` for arrays too long to serialize and for an object reached again
    /// while it is being converted (callers render that reference as `null`).
    pub(crate) fn to_json(&self) -> Option<JsonValue> {
        let _guard = TraversalGuard::enter(self)?;
        let (kind, properties) = {
            let data = self.0.read();
            (data.kind.clone(), data.properties.clone())
        };
        let json = match kind {
            ObjectKind::Array(elements) => {
                if elements.len() > MAX_JSON_ARRAY_LENGTH {
                    return None;
                }
                let mut items = vec![JsonValue::Null; elements.len() as usize];
                for (index, value) in elements.stored() {
                    items[index as usize] = value.to_json().unwrap_or(JsonValue::Null);
                }
                JsonValue::Array(items)
            }
            ObjectKind::Date(t) => super::realm::iso_string(t)
                .map(JsonValue::String)
                .unwrap_or(JsonValue::Null),
            ObjectKind::Boxed(Value::Number(n)) => number_to_json(n),
            ObjectKind::Boxed(inner) => inner.to_json().unwrap_or(JsonValue::Null),
            ObjectKind::Ordinary | ObjectKind::Error => {
                let mut map = serde_json::Map::new();
                for (key, value) in properties {
                    if let (PropertyKey::String(name), Some(json)) = (key, value.to_json()) {
                        map.insert(name, json);
                    }
                }
                JsonValue::Object(map)
            }
        };
        Some(json)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, properties) = {
            let data = self.0.read();
            (data.kind.clone(), data.properties.clone())
        };
        match &kind {
            ObjectKind::Array(elements) => {
                let rendered: Vec<String> = elements
                    .stored()
                    .map(|(index, value)| format!("{index}: {}", shallow(value)))
                    .collect();
                write!(f, "Array({}; [{}])", elements.len(), rendered.join(", "))
            }
            ObjectKind::Date(t) => write!(f, "Date({t})"),
            ObjectKind::Boxed(inner) => write!(f, "Boxed({inner:?})"),
            kind => {
                let rendered: Vec<String> = properties
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", shallow(v)))
                    .collect();
                let name = if matches!(kind, ObjectKind::Error) {
                    "Error"
                } else {
                    "Object"
                };
                write!(f, "{name}({{{}}})", rendered.join(", "))
            }
        }
    }
}

fn shallow(value: &Value) -> String {
    match value {
        Value::Object(o) => format!("[object {}]", o.class_tag()),
        other => format!("{other:?}"),
    }
}

/// Parse a canonical array index ("0", "1", ... but not "01" or "-1")
pub(crate) fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>()
        .ok()
        .filter(|i| *i < u32::MAX)
}

/// Own properties every string has: `length` and one entry per UTF-16 code unit
pub(crate) fn string_own_property(s: &str, key: &str) -> Option<Value> {
    if key == "length" {
        return Some(Value::Number(s.encode_utf16().count() as f64));
    }
    let index = array_index(key)?;
    let unit = s.encode_utf16().nth(index as usize)?;
    Some(Value::String(String::from_utf16_lossy(&[unit])))
}
