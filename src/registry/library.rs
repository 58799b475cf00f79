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

//! Operator library: the flat name → function mapping

use rustc_hash::FxHashMap;
use std::sync::{Arc, LazyLock};

use crate::curry::{flip, partial};
use crate::error::{OperatorError, OperatorResult};
use crate::model::{Function, Value};
use crate::registry::config::LibraryConfig;
use crate::registry::operator::{Category, Operation, operation_function};
use crate::registry::operators;
use crate::registry::signature::{OperationSignature, TypeHint};

/// One named function of the library
#[derive(Debug, Clone)]
pub struct LibraryEntry {
    /// Library key
    pub name: String,
    /// Category the entry is listed under
    pub category: Category,
    /// Infix symbol of the wrapped host operator
    pub symbol: Option<String>,
    /// Human-friendly name
    pub friendly_name: String,
    /// One-line description
    pub description: String,
    /// Signature
    pub signature: OperationSignature,
    /// Function value callers apply
    pub function: Function,
}

impl LibraryEntry {
    /// Arguments still expected before the entry evaluates
    pub fn arity(&self) -> usize {
        self.function.arity()
    }
}

/// Registry of curried operator functions
#[derive(Debug, Clone, Default)]
pub struct OperatorLibrary {
    entries: FxHashMap<String, LibraryEntry>,
    symbols: FxHashMap<String, String>,
}

static STANDARD: LazyLock<OperatorLibrary> = LazyLock::new(|| {
    let mut library = OperatorLibrary::new();
    operators::register_builtin_operations(&mut library);
    library.register_derived_operations();
    log::debug!("built standard operator library with {} entries", library.len());
    library
});

impl OperatorLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide library with every operation
    pub fn standard() -> &'static OperatorLibrary {
        &STANDARD
    }

    /// Build a library from a configuration
    pub fn with_config(config: &LibraryConfig) -> OperatorResult<Self> {
        config.validate()?;

        let mut library = Self::new();
        for category in Category::ALL {
            if config.includes(category) {
                operators::register_category(&mut library, category);
            }
        }
        if config.derived_operations {
            library.register_derived_operations();
        }
        if !config.symbol_aliases {
            library.symbols.clear();
        }

        log::debug!(
            "built operator library with {} entries and {} symbols",
            library.len(),
            library.symbols.len()
        );
        Ok(library)
    }

    /// Register an operation under its own name (and symbol, if it has one)
    pub fn register<O: Operation + 'static>(&mut self, operation: O) {
        self.register_operation(Arc::new(operation));
    }

    /// Register a shared operation
    pub fn register_operation(&mut self, operation: Arc<dyn Operation>) {
        let entry = LibraryEntry {
            name: operation.name().to_string(),
            category: operation.category(),
            symbol: operation.symbol().map(str::to_string),
            friendly_name: operation.human_friendly_name().to_string(),
            description: operation.description().to_string(),
            signature: operation.signature().clone(),
            function: operation_function(operation),
        };
        self.insert(entry);
    }

    /// Register an entry built outside the operation catalog
    pub fn insert(&mut self, entry: LibraryEntry) {
        if let Some(symbol) = &entry.symbol {
            self.symbols.insert(symbol.clone(), entry.name.clone());
        }
        log::trace!("registering '{}' ({})", entry.name, entry.category);
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Resolve an additional symbol to an existing entry
    pub fn alias(&mut self, symbol: impl Into<String>, name: &str) -> OperatorResult<()> {
        if !self.contains(name) {
            return Err(OperatorError::UnknownOperation {
                name: name.to_string(),
            });
        }
        self.symbols.insert(symbol.into(), name.to_string());
        Ok(())
    }

    /// `increment = add(1)` and `decrement = flip(subtract)(1)`
    ///
    /// Skipped when the operations they derive from are not registered.
    fn register_derived_operations(&mut self) {
        if let Some(add) = self.get("add").cloned() {
            self.insert(LibraryEntry {
                name: "increment".to_string(),
                category: Category::Arithmetic,
                symbol: Some("++".to_string()),
                friendly_name: "Increment".to_string(),
                description: "Adds one to a number".to_string(),
                signature: OperationSignature::unary(
                    "increment",
                    "a",
                    TypeHint::Number,
                    TypeHint::Number,
                ),
                function: partial(&add, [Value::from(1)]).renamed("increment"),
            });
        }

        if let Some(subtract) = self.get("subtract").cloned() {
            self.insert(LibraryEntry {
                name: "decrement".to_string(),
                category: Category::Arithmetic,
                symbol: Some("--".to_string()),
                friendly_name: "Decrement".to_string(),
                description: "Subtracts one from a number".to_string(),
                signature: OperationSignature::unary(
                    "decrement",
                    "a",
                    TypeHint::Number,
                    TypeHint::Number,
                ),
                function: partial(&flip(&subtract), [Value::from(1)]).renamed("decrement"),
            });
        }
    }

    /// Function registered under `name`
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.entries.get(name).map(|entry| &entry.function)
    }

    /// Entry registered under `name`
    pub fn entry(&self, name: &str) -> Option<&LibraryEntry> {
        self.entries.get(name)
    }

    /// Entry for an infix symbol, e.g. `">>>"`
    pub fn by_symbol(&self, symbol: &str) -> Option<&LibraryEntry> {
        self.symbols.get(symbol).and_then(|name| self.entries.get(name))
    }

    /// Entry by name, falling back to symbol lookup
    pub fn resolve(&self, name_or_symbol: &str) -> Option<&LibraryEntry> {
        self.entry(name_or_symbol)
            .or_else(|| self.by_symbol(name_or_symbol))
    }

    /// All entry names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All symbols, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Entries of one category, sorted by name
    pub fn entries_in(&self, category: Category) -> Vec<&LibraryEntry> {
        let mut entries: Vec<&LibraryEntry> = self
            .entries
            .values()
            .filter(|entry| entry.category == category)
            .collect();
        entries.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Check if an entry exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the library has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call the function registered under `name` with `args`
    ///
    /// The result is a partial application when too few arguments are given.
    pub fn apply(&self, name: &str, args: &[Value]) -> OperatorResult<Value> {
        let function = self.get(name).ok_or_else(|| OperatorError::UnknownOperation {
            name: name.to_string(),
        })?;
        function.call(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_library_contents() {
        let library = OperatorLibrary::standard();
        assert_eq!(library.len(), 30);
        assert!(!library.is_empty());
        assert!(library.contains("bitUnsignedShiftRight"));
        assert!(library.contains("increment"));
        assert_eq!(library.names().first(), Some(&"add"));
    }

    #[test]
    fn test_symbol_lookup() {
        let library = OperatorLibrary::standard();
        assert_eq!(library.by_symbol(">>>").unwrap().name, "bitUnsignedShiftRight");
        assert_eq!(library.by_symbol("+").unwrap().name, "add");
        assert_eq!(library.by_symbol("instanceof").unwrap().name, "isInstance");
        assert!(library.by_symbol("**").is_none());
        assert_eq!(library.resolve("===").unwrap().name, "equal");
        assert_eq!(library.resolve("equal").unwrap().name, "equal");
    }

    #[test]
    fn test_derived_operations() {
        let library = OperatorLibrary::standard();
        assert_eq!(library.apply("increment", &[Value::from(5)]).unwrap(), Value::from(6));
        assert_eq!(library.apply("decrement", &[Value::from(5)]).unwrap(), Value::from(4));
        assert_eq!(library.apply("decrement", &[Value::from(0)]).unwrap(), Value::from(-1));
        assert_eq!(library.entry("increment").unwrap().arity(), 1);
        assert_eq!(library.get("increment").unwrap().name(), "increment");
    }

    #[test]
    fn test_unknown_operation() {
        let err = OperatorLibrary::standard().apply("power", &[]).unwrap_err();
        assert_eq!(
            err,
            OperatorError::UnknownOperation {
                name: "power".to_string()
            }
        );
    }

    #[test]
    fn test_configured_library() {
        let config = LibraryConfig::new(vec![Category::Bitwise], true, true);
        let library = OperatorLibrary::with_config(&config).unwrap();
        assert_eq!(library.len(), 7);
        assert!(!library.contains("add"));
        assert!(!library.contains("increment"));
        assert!(library.by_symbol("&").is_some());

        let library = OperatorLibrary::with_config(&LibraryConfig::minimal()).unwrap();
        assert_eq!(library.len(), 28);
        assert!(library.by_symbol("+").is_none());
        assert!(library.symbols().is_empty());
    }

    #[test]
    fn test_alias() {
        let mut library = OperatorLibrary::with_config(&LibraryConfig::numeric()).unwrap();
        library.alias("==", "equal").unwrap();
        assert_eq!(library.by_symbol("==").unwrap().name, "equal");
        assert!(library.alias("&&", "and").is_err());
    }

    #[test]
    fn test_entries_in_category() {
        let library = OperatorLibrary::standard();
        let names: Vec<&str> = library
            .entries_in(Category::Logical)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["and", "not", "or"]);
        assert_eq!(library.entries_in(Category::Arithmetic).len(), 8);
    }
}
