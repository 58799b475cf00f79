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

//! Error types shared by the value model, the currying adapter and the operator catalog

use thiserror::Error;

/// Result type for operator operations
pub type OperatorResult<T> = Result<T, OperatorError>;

/// Errors raised while applying an operator
///
/// Operators never recover locally: whatever the underlying host operation raises
/// is handed back to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperatorError {
    /// A value was used in a way its type does not allow
    #[error("TypeError: {message}")]
    TypeError {
        /// Description of the failure
        message: String,
    },

    /// A numeric argument was outside the accepted range
    #[error("RangeError: {message}")]
    RangeError {
        /// Description of the failure
        message: String,
    },

    /// No operation is registered under the requested name
    #[error("Unknown operation '{name}'")]
    UnknownOperation {
        /// Requested operation name
        name: String,
    },

    /// A library configuration could not be read
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the failure
        message: String,
    },

    /// A user supplied function body failed
    #[error("Error evaluating '{operation}': {message}")]
    EvaluationError {
        /// Name of the function that failed
        operation: String,
        /// Error message describing what went wrong
        message: String,
    },
}

impl OperatorError {
    /// Create a type error
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::TypeError {
            message: message.into(),
        }
    }

    /// Create a range error
    pub fn range_error(message: impl Into<String>) -> Self {
        Self::RangeError {
            message: message.into(),
        }
    }

    /// Create an evaluation error attributed to a named function
    pub fn evaluation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EvaluationError {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for OperatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfiguration {
            message: err.to_string(),
        }
    }
}
