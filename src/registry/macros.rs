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

//! Macros for easy operation implementation
//!
//! These generate the [`Operation`](crate::registry::operator::Operation)
//! implementation for a unit struct from its metadata and an evaluation body.

/// Define a unit struct implementing `Operation`
///
/// # Usage
/// ```rust
/// use curried_operators::define_operation;
/// use curried_operators::model::{TypeCoercion, Value};
/// use curried_operators::registry::operator::Operation;
/// use curried_operators::registry::signature::{OperationSignature, TypeHint};
///
/// define_operation! {
///     /// Doubles a number
///     pub struct DoubleOperation {
///         name: "double",
///         symbol: None,
///         friendly: "Double",
///         category: Arithmetic,
///         description: "Multiplies a number by two",
///         signature: OperationSignature::unary("double", "a", TypeHint::Number, TypeHint::Number),
///         evaluate: |args| Ok(Value::Number(TypeCoercion::to_number(&args[0])? * 2.0)),
///     }
/// }
///
/// assert_eq!(DoubleOperation.evaluate(&[Value::from(4)]).unwrap(), Value::from(8));
/// ```
#[macro_export]
macro_rules! define_operation {
    (
        $(#[$meta:meta])*
        $vis:vis struct $struct_name:ident {
            name: $op_name:literal,
            symbol: $symbol:expr,
            friendly: $friendly:literal,
            category: $category:ident,
            description: $description:literal,
            signature: $signature:expr,
            evaluate: |$args:ident| $body:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        $vis struct $struct_name;

        impl $crate::registry::operator::Operation for $struct_name {
            fn name(&self) -> &str {
                $op_name
            }

            fn symbol(&self) -> Option<&str> {
                $symbol
            }

            fn human_friendly_name(&self) -> &str {
                $friendly
            }

            fn category(&self) -> $crate::registry::operator::Category {
                $crate::registry::operator::Category::$category
            }

            fn description(&self) -> &str {
                $description
            }

            fn signature(&self) -> &$crate::registry::signature::OperationSignature {
                static SIGNATURE: std::sync::LazyLock<$crate::registry::signature::OperationSignature> =
                    std::sync::LazyLock::new(|| $signature);
                &SIGNATURE
            }

            fn evaluate(
                &self,
                $args: &[$crate::model::Value],
            ) -> $crate::error::OperatorResult<$crate::model::Value> {
                $body
            }
        }
    };
}
