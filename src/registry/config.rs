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

//! Library configuration options

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{OperatorError, OperatorResult};
use crate::registry::operator::Category;

/// Configuration for building an operator library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Categories whose operations are registered
    pub categories: Vec<Category>,

    /// Whether infix symbols (`+`, `>>>`, `instanceof`, ...) resolve to entries
    pub symbol_aliases: bool,

    /// Whether `increment` and `decrement` are derived from `add` and `subtract`
    pub derived_operations: bool,
}

impl LibraryConfig {
    /// Create a new configuration with custom settings
    pub fn new(categories: Vec<Category>, symbol_aliases: bool, derived_operations: bool) -> Self {
        Self {
            categories,
            symbol_aliases,
            derived_operations,
        }
    }

    /// Create a configuration with only the numeric categories
    pub fn numeric() -> Self {
        Self {
            categories: vec![Category::Arithmetic, Category::Bitwise, Category::Relational],
            symbol_aliases: true,
            derived_operations: true,
        }
    }

    /// Create a configuration with every operation but no symbol lookup
    pub fn names_only() -> Self {
        Self {
            symbol_aliases: false,
            ..Self::default()
        }
    }

    /// Create a configuration with exactly the catalog, nothing derived
    pub fn minimal() -> Self {
        Self {
            categories: Category::ALL.to_vec(),
            symbol_aliases: false,
            derived_operations: false,
        }
    }

    /// Check whether a category is enabled
    pub fn includes(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Reject configurations that would produce an empty library
    pub fn validate(&self) -> OperatorResult<()> {
        if self.categories.is_empty() {
            return Err(OperatorError::InvalidConfiguration {
                message: "at least one category must be enabled".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> OperatorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> OperatorResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| OperatorError::InvalidConfiguration {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            categories: Category::ALL.to_vec(),
            symbol_aliases: true,
            derived_operations: true,
        }
    }
}
