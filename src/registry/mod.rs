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

//! Operation registry
//!
//! Trait-based catalog of operations plus the library that exposes them as
//! curried function values.

pub mod config;
pub mod library;
pub mod macros;
pub mod operator;
pub mod operators;
pub mod signature;

pub use config::LibraryConfig;
pub use library::{LibraryEntry, OperatorLibrary};
pub use operator::{Category, Operation, operation_function};
pub use signature::{OperationSignature, ParameterInfo, TypeHint};
