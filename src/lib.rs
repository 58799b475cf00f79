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

//! Curried operators
//!
//! The built-in operators of a dynamically typed host model (arithmetic,
//! logical, bitwise, relational and reflective) as first-class, partially
//! applicable functions.
//!
//! ```rust
//! use curried_operators::{OperatorLibrary, Value};
//!
//! let library = OperatorLibrary::standard();
//! let add2 = library.apply("add", &[Value::from(2)]).unwrap();
//! let five = add2.as_function().unwrap().call(&[Value::from(3)]).unwrap();
//! assert_eq!(five, Value::from(5));
//! assert_eq!(library.apply("increment", &[Value::from(5)]).unwrap(), Value::from(6));
//! ```

#![warn(missing_docs)]

pub mod curry;
pub mod error;
pub mod model;
pub mod ops;
pub mod registry;
pub mod typed;

// Re-export main types
pub use curry::{curry, flip, partial};
pub use error::{OperatorError, OperatorResult};
pub use model::{ClassTag, Function, ObjectRef, PropertyKey, TypeTag, Value, realm};
pub use registry::{Category, LibraryConfig, LibraryEntry, OperatorLibrary, Operation};
