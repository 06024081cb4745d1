//! Simple decoder to inspect CBOR files.

use std::collections::BTreeMap;
use std::fs;

use cbor_decode::{DecodeOptions, KeepTags, Value, decode_with, to_json};

/// Counts items by kind, recursively.
fn count_kinds<'a>(value: &'a Value, counts: &mut BTreeMap<&'a str, usize>) {
    *counts.entry(value.kind_name()).or_default() += 1;
    match value {
        Value::Array(items) => {
            for item in items {
                count_kinds(item, counts);
            }
        }
        Value::Map(entries) => {
            for (k, v) in entries {
                count_kinds(k, counts);
                count_kinds(v, counts);
            }
        }
        Value::Object(map) => {
            for v in map.values() {
                count_kinds(v, counts);
            }
        }
        Value::Tagged { value, .. } => count_kinds(value, counts),
        _ => {}
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/sample.cbor".to_string());
    let map_mode = std::env::args().any(|arg| arg == "--map");

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let options = if map_mode {
        DecodeOptions::map()
    } else {
        DecodeOptions::default()
    };
    let value = match decode_with(&data, KeepTags, options) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Decode failed: {}", err);
            std::process::exit(1);
        }
    };

    println!("\n=== Top-level item ===");
    println!("Kind: {}", value.kind_name());

    let mut counts = BTreeMap::new();
    count_kinds(&value, &mut counts);
    println!("\n=== Items by kind ===");
    for (kind, count) in &counts {
        println!("  {}: {}", kind, count);
    }

    println!("\n=== Diagnostic notation (first 400 chars) ===");
    let diagnostic = value.to_string();
    let preview: String = diagnostic.chars().take(400).collect();
    if diagnostic.len() > preview.len() {
        println!("{}...", preview);
    } else {
        println!("{}", preview);
    }

    println!("\n=== JSON ===");
    match to_json(&value) {
        Ok(json) => {
            let text = serde_json::to_string_pretty(&json).expect("Failed to format JSON");
            let preview: String = text.lines().take(40).collect::<Vec<_>>().join("\n");
            println!("{}", preview);
        }
        Err(err) => println!("(not representable: {})", err),
    }
}
