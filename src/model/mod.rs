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

//! Host value model
//!
//! This module provides the dynamically typed values the operators work on:
//! primitives, shared objects with prototype chains, callable functions and the
//! intrinsic realm they all hang off.

pub mod function;
pub mod object;
pub mod realm;
pub mod type_coercion;
pub mod types;
pub mod value;

pub use function::{Function, NativeFn, NativeMethod};
pub use object::{ArrayElements, ObjectKind, ObjectRef};
pub use realm::{Realm, object_to_string, realm};
pub use type_coercion::{PreferredType, TypeCoercion};
pub use types::{ClassTag, TypeTag};
pub use value::{PropertyKey, Symbol, Value};
