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

//! Type tags reported by `typeOf` and `classOf`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive category of a value, as reported by `typeOf`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// The absent value
    Undefined,
    /// Null and every non-callable object
    Object,
    /// Boolean value
    Boolean,
    /// Number value
    Number,
    /// String value
    String,
    /// Symbol value
    Symbol,
    /// Any callable value
    Function,
}

impl TypeTag {
    /// Name of the tag as the host spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Undefined => "undefined",
            TypeTag::Object => "object",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Symbol => "symbol",
            TypeTag::Function => "function",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal class of a value, as reported by `classOf`
///
/// This is a closed set: every value of the model maps to exactly one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassTag {
    /// The absent value
    Undefined,
    /// The null value
    Null,
    /// Boolean primitive or boxed boolean
    Boolean,
    /// Number primitive or boxed number
    Number,
    /// String primitive or boxed string
    String,
    /// Symbol primitive
    Symbol,
    /// Callable value
    Function,
    /// Array object
    Array,
    /// Date object
    Date,
    /// Error object
    Error,
    /// Any other object
    Object,
}

impl ClassTag {
    /// Name of the class
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassTag::Undefined => "Undefined",
            ClassTag::Null => "Null",
            ClassTag::Boolean => "Boolean",
            ClassTag::Number => "Number",
            ClassTag::String => "String",
            ClassTag::Symbol => "Symbol",
            ClassTag::Function => "Function",
            ClassTag::Array => "Array",
            ClassTag::Date => "Date",
            ClassTag::Error => "Error",
            ClassTag::Object => "Object",
        }
    }
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(TypeTag::Undefined.to_string(), "undefined");
        assert_eq!(TypeTag::Function.as_str(), "function");
        assert_eq!(ClassTag::Array.to_string(), "Array");
        assert_eq!(ClassTag::Null.as_str(), "Null");
    }

    #[test]
    fn test_type_tag_serde() {
        let json = serde_json::to_string(&TypeTag::Symbol).unwrap();
        assert_eq!(json, "\"symbol\"");
    }
}
