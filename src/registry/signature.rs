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

//! Operation signatures used for documentation and listings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Informal type of a parameter or result
///
/// Operations coerce their operands, so these describe intent, not a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeHint {
    /// Any value (`α`)
    Any,
    /// Any value or the absent sentinel (`α | Void`)
    Maybe,
    /// Number
    Number,
    /// 32-bit integer
    Int,
    /// Boolean
    Boolean,
    /// String
    String,
    /// Object
    Object,
    /// Function
    Function,
    /// Constructor taking any arguments (`new(α₁, …, αₙ) → β`)
    Constructor,
    /// Function taking any arguments (`(α₁, …, αₙ) → β`)
    Variadic,
}

impl TypeHint {
    /// Notation used in signature summaries
    pub fn notation(&self) -> &'static str {
        match self {
            TypeHint::Any => "α",
            TypeHint::Maybe => "α | Void",
            TypeHint::Number => "Number",
            TypeHint::Int => "Int",
            TypeHint::Boolean => "Boolean",
            TypeHint::String => "String",
            TypeHint::Object => "Object",
            TypeHint::Function => "Function",
            TypeHint::Constructor => "(new(α₁, α₂, ..., αₙ) → β)",
            TypeHint::Variadic => "(α₁, α₂, ..., αₙ) → β",
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

/// Parameter information for operations
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub param_type: TypeHint,
}

impl ParameterInfo {
    /// Create parameter info
    pub fn new(name: impl Into<String>, param_type: TypeHint) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}

/// Signature of an operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationSignature {
    /// Operation name
    pub name: String,
    /// Parameters in application order
    pub parameters: Vec<ParameterInfo>,
    /// Result type
    pub return_type: TypeHint,
}

impl OperationSignature {
    /// Create a unary operation signature
    pub fn unary(
        name: impl Into<String>,
        operand: impl Into<String>,
        operand_type: TypeHint,
        return_type: TypeHint,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: vec![ParameterInfo::new(operand, operand_type)],
            return_type,
        }
    }

    /// Create a binary operation signature
    pub fn binary(
        name: impl Into<String>,
        (left, left_type): (&str, TypeHint),
        (right, right_type): (&str, TypeHint),
        return_type: TypeHint,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: vec![
                ParameterInfo::new(left, left_type),
                ParameterInfo::new(right, right_type),
            ],
            return_type,
        }
    }

    /// Number of arguments the operation consumes
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Curried type summary, e.g. `Number → Number → Number`
    pub fn summary(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.param_type.notation())
            .chain(std::iter::once(self.return_type.notation()))
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

impl fmt::Display for OperationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.param_type))
            .collect();
        write!(f, "{}({}) -> {}", self.name, params.join(", "), self.return_type)
    }
}
