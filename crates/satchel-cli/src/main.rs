//! `satchel` CLI — inspect and edit schema-less JSON documents from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # List top-level keys (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | satchel keys
//!
//! # Read one value
//! satchel get name -i data.json
//!
//! # Set a value (parsed as JSON, falling back to a bare string)
//! echo '{}' | satchel set age 42
//! echo '{}' | satchel set name Alice
//!
//! # Overlay another JSON object, keys-equal overwrite
//! satchel merge --with overrides.json -i data.json -o merged.json
//!
//! # Validate that input is a storable document
//! satchel check -i data.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use satchel_core::Satchel;
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "satchel", version, about = "Schema-less JSON document CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the document's top-level keys
    Keys {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the value stored under KEY as JSON
    Get {
        /// Top-level key to read
        key: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Set KEY to VALUE and print the updated document
    Set {
        /// Top-level key to write
        key: String,
        /// New value: parsed as JSON, falling back to a bare string
        value: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Overlay another JSON object on the document, keys-equal overwrite
    Merge {
        /// File holding the JSON object to overlay
        #[arg(short = 'w', long)]
        with: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate that the input is a storable document
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keys { input } => {
            let doc = load_document(input.as_deref())?;
            for key in doc.keys() {
                println!("{key}");
            }
        }
        Commands::Get { key, input, output } => {
            let doc = load_document(input.as_deref())?;
            let map = doc
                .to_json_map()
                .context("Failed to materialize document")?;
            let value = match map.get(&key) {
                Some(value) => value,
                None => bail!("key `{}` not found", key),
            };
            let pretty = serde_json::to_string_pretty(value)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Set {
            key,
            value,
            input,
            output,
        } => {
            let doc = load_document(input.as_deref())?;
            // Accept any JSON literal; a bare word like `Alice` is a string.
            let parsed: serde_json::Value =
                serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
            doc.set_json(key.as_str(), parsed)
                .with_context(|| format!("Cannot store value under `{}`", key))?;
            write_document(output.as_deref(), &doc)?;
        }
        Commands::Merge {
            with,
            input,
            output,
        } => {
            let doc = load_document(input.as_deref())?;
            let overlay_text = std::fs::read_to_string(&with)
                .with_context(|| format!("Failed to read file: {}", with))?;
            let overlay: serde_json::Value = serde_json::from_str(&overlay_text)
                .with_context(|| format!("Overlay is not valid JSON: {}", with))?;
            let overlay = match overlay {
                serde_json::Value::Object(map) => map,
                _ => bail!("overlay must be a JSON object: {}", with),
            };
            for (key, value) in overlay {
                doc.set_json(key.as_str(), value)
                    .with_context(|| format!("Cannot store overlay value under `{}`", key))?;
            }
            write_document(output.as_deref(), &doc)?;
        }
        Commands::Check { input } => {
            let doc = load_document(input.as_deref())?;
            println!("ok: {} top-level keys", doc.len());
        }
    }

    Ok(())
}

/// Read the input and construct a document from it.
fn load_document(path: Option<&str>) -> Result<Satchel> {
    let text = read_input(path)?;
    Satchel::from_json(&text).context("Input is not a storable document")
}

/// Serialize the document and write it out, pretty-printed.
fn write_document(path: Option<&str>, doc: &Satchel) -> Result<()> {
    let value = doc
        .to_json_value()
        .context("Failed to serialize document")?;
    let pretty = serde_json::to_string_pretty(&value)?;
    write_output(path, &pretty)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
