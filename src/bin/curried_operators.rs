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

//! Simple CLI for the operator library
//!
//! Lists the available operations, describes one, or applies one to arguments
//! given as JSON literals.

use clap::{Parser, Subcommand};
use curried_operators::registry::operators::type_of;
use curried_operators::{Category, LibraryConfig, LibraryEntry, OperatorLibrary, Value, realm};
use std::borrow::Cow;
use std::process;

#[derive(Parser)]
#[command(name = "curried-operators")]
#[command(about = "Apply host operators as curried functions")]
#[command(version)]
#[command(author = "OctoFHIR Team <funyloony@gmail.com>")]
struct Cli {
    /// JSON library configuration (defaults to every operation)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List operations with their arity, symbol and signature
    List {
        /// Only list one category
        #[arg(short = 't', long)]
        category: Option<Category>,
    },
    /// Describe one operation
    Describe {
        /// Operation name or symbol
        name: String,
    },
    /// Apply an operation to arguments
    ///
    /// Arguments are JSON literals; `undefined` is the absent value and `@Name`
    /// is an intrinsic constructor such as `@Array` or `@Date`.
    Apply {
        /// Operation name or symbol
        name: String,
        /// Arguments, applied in order
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    // Setup human-panic for better error messages
    human_panic::setup_panic!();
    env_logger::init();

    let cli = Cli::parse();
    let library = load_library(cli.config.as_deref());
    let color = !cli.no_color;

    match cli.command {
        Commands::List { category } => handle_list(&library, category, color),
        Commands::Describe { name } => handle_describe(&library, &name, color),
        Commands::Apply { name, args } => handle_apply(&library, &name, &args),
    }
}

fn load_library(config: Option<&str>) -> Cow<'static, OperatorLibrary> {
    let Some(path) = config else {
        return Cow::Borrowed(OperatorLibrary::standard());
    };

    let built = LibraryConfig::from_file(path).and_then(|config| OperatorLibrary::with_config(&config));
    match built {
        Ok(library) => Cow::Owned(library),
        Err(e) => {
            eprintln!("Error loading configuration '{path}': {e}");
            process::exit(1);
        }
    }
}

fn handle_list(library: &OperatorLibrary, category: Option<Category>, color: bool) {
    let categories: Vec<Category> = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        let entries = library.entries_in(category);
        if entries.is_empty() {
            continue;
        }
        println!("{}", heading(category.as_str(), color));
        for entry in entries {
            println!(
                "  {:<24} {:<2} {:<11} {}",
                entry.name,
                entry.arity(),
                entry.symbol.as_deref().unwrap_or("-"),
                entry.signature.summary()
            );
        }
    }
}

fn handle_describe(library: &OperatorLibrary, name: &str, color: bool) {
    let entry = resolve(library, name);
    println!("{}", heading(&entry.name, color));
    println!("  {}", entry.friendly_name);
    if !entry.description.is_empty() {
        println!("  {}", entry.description);
    }
    println!("  category:  {}", entry.category);
    println!("  arity:     {}", entry.arity());
    if let Some(symbol) = &entry.symbol {
        println!("  symbol:    {symbol}");
    }
    println!("  signature: {}", entry.signature.summary());
}

fn handle_apply(library: &OperatorLibrary, name: &str, raw_args: &[String]) {
    let entry = resolve(library, name);

    let mut args = Vec::with_capacity(raw_args.len());
    for raw in raw_args {
        match parse_argument(raw) {
            Ok(value) => args.push(value),
            Err(message) => {
                eprintln!("Error parsing argument '{raw}': {message}");
                process::exit(1);
            }
        }
    }

    match entry.function.call(&args) {
        Ok(result) => {
            println!("{}", render(&result));
            if let Ok(tag) = type_of(&result) {
                eprintln!("typeOf: {tag}");
            }
        }
        Err(e) => {
            eprintln!("Error applying '{}': {e}", entry.name);
            process::exit(1);
        }
    }
}

fn resolve<'a>(library: &'a OperatorLibrary, name: &str) -> &'a LibraryEntry {
    match library.resolve(name) {
        Some(entry) => entry,
        None => {
            eprintln!("Unknown operation '{name}'");
            process::exit(1);
        }
    }
}

fn parse_argument(raw: &str) -> Result<Value, String> {
    if raw == "undefined" {
        return Ok(Value::Undefined);
    }
    if let Some(name) = raw.strip_prefix('@') {
        return realm()
            .constructor(name)
            .map(|constructor| Value::Function(constructor.clone()))
            .ok_or_else(|| format!("no intrinsic constructor named '{name}'"));
    }
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .map_err(|e| e.to_string())
}

fn render(value: &Value) -> String {
    match value {
        Value::Function(function) => format!("[Function {} (arity {})]", function.name(), function.arity()),
        Value::Undefined => "undefined".to_string(),
        other => match other.to_json() {
            Some(json) => json.to_string(),
            None => other.to_string(),
        },
    }
}

#[cfg(feature = "terminal")]
fn heading(text: &str, color: bool) -> String {
    use colored::Colorize;
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(not(feature = "terminal"))]
fn heading(text: &str, _color: bool) -> String {
    text.to_string()
}
