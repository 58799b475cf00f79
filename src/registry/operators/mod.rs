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

//! Operation catalog, one module per category

pub mod arithmetic;
pub mod bitwise;
pub mod comparison;
pub mod logical;
pub mod reflection;

// Re-export all operations
pub use arithmetic::*;
pub use bitwise::*;
pub use comparison::*;
pub use logical::*;
pub use reflection::*;

use crate::model::Value;
use crate::registry::library::OperatorLibrary;
use crate::registry::operator::Category;

static UNDEFINED: Value = Value::Undefined;

/// Argument at `index`, or `Undefined` when the caller supplied fewer
pub(crate) fn argument(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&UNDEFINED)
}

/// Register the built-in operations of one category
pub fn register_category(library: &mut OperatorLibrary, category: Category) {
    match category {
        Category::Arithmetic => arithmetic::register_arithmetic_operations(library),
        Category::Logical => logical::register_logical_operations(library),
        Category::Bitwise => bitwise::register_bitwise_operations(library),
        Category::Relational => comparison::register_comparison_operations(library),
        Category::Reflective => reflection::register_reflection_operations(library),
    }
}

/// Register every built-in operation
pub fn register_builtin_operations(library: &mut OperatorLibrary) {
    for category in Category::ALL {
        register_category(library, category);
    }
}
