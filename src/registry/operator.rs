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

//! Operation trait and categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::curry::curry;
use crate::error::{OperatorError, OperatorResult};
use crate::model::{Function, Value};
use crate::registry::signature::OperationSignature;

/// Group an operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `+ - * / %`, negation and the derived increment/decrement
    Arithmetic,
    /// `! && ||`
    Logical,
    /// 32-bit integer operators
    Bitwise,
    /// Strict equality and ordering
    Relational,
    /// Property access, membership, instance checks, construction and type tags
    Reflective,
}

impl Category {
    /// Every category, in listing order
    pub const ALL: [Category; 5] = [
        Category::Arithmetic,
        Category::Logical,
        Category::Bitwise,
        Category::Relational,
        Category::Reflective,
    ];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Arithmetic => "arithmetic",
            Category::Logical => "logical",
            Category::Bitwise => "bitwise",
            Category::Relational => "relational",
            Category::Reflective => "reflective",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| OperatorError::InvalidConfiguration {
                message: format!("unknown category '{s}'"),
            })
    }
}

/// Trait for implementing library operations
pub trait Operation: Send + Sync {
    /// Library key, e.g. `"bitUnsignedShiftRight"`
    fn name(&self) -> &str;

    /// Infix symbol of the host operator this wraps, if any
    fn symbol(&self) -> Option<&str> {
        None
    }

    /// Get a human-friendly name for the operation
    fn human_friendly_name(&self) -> &str;

    /// Category the operation is listed under
    fn category(&self) -> Category;

    /// One-line description
    fn description(&self) -> &str {
        ""
    }

    /// Signature of the operation
    fn signature(&self) -> &OperationSignature;

    /// Number of arguments the operation consumes
    fn arity(&self) -> usize {
        self.signature().arity()
    }

    /// Evaluate the operation; `args` holds exactly [`Operation::arity`] values
    fn evaluate(&self, args: &[Value]) -> OperatorResult<Value>;
}

/// Expose an operation as a function value
///
/// Binary operations become curried functions; unary operations become plain
/// functions that read a missing argument as `Undefined`.
pub fn operation_function(operation: Arc<dyn Operation>) -> Function {
    let name = operation.name().to_string();
    match operation.arity() {
        1 => Function::unary(name, move |value| {
            operation.evaluate(std::slice::from_ref(value))
        }),
        arity => curry(arity, name, move |args| operation.evaluate(args)),
    }
}
