//! Decodes a table-rows response whose rows were requested as binary.
//!
//! Usage: `decode_rows [response.json]`. Without a path a built-in sample
//! of `accounts` rows is used. Set `RUST_LOG=debug` to see batch logging.

use std::fs;

use eos_binary::model::{DomainKind, PrimitiveKind};
use eos_binary::{binary_struct, Asset, GetTableRowsResponse, Name, TypeDescriptor, Value};

const SAMPLE: &str = r#"{
  "rows": [
    "0000000000ea3055102700000000000004454f53000000",
    "0000000000ea3055010000000000000004535958000000"
  ],
  "more": false
}"#;

binary_struct! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct AccountRow {
        pub owner: Name,
        pub balance: Asset,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Name(name) => name.to_string(),
        Value::Asset(asset) => asset.to_string(),
        Value::String(s) => format!("{:?}", s.to_string_lossy()),
        Value::Bytes(b) => format!("BYTES[{}]", b.len()),
        Value::Record(record) => format!("{} {{ {} fields }}", record.type_name(), record.len()),
        Value::Sequence(items) => format!("[{} items]", items.len()),
        other => format!("{:?}", other),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let body = match std::env::args().nth(1) {
        Some(path) => {
            println!("Reading: {}", path);
            fs::read_to_string(&path).expect("Failed to read file")
        }
        None => SAMPLE.to_string(),
    };

    let response = GetTableRowsResponse::from_json(&body).expect("Failed to parse response");

    println!("\n=== Typed rows ===");
    let mut rows: Vec<AccountRow> = Vec::new();
    match response.binary_to_structs(&mut rows) {
        Ok(()) => {
            for (i, row) in rows.iter().enumerate() {
                println!("[{}] {} holds {}", i, row.owner, row.balance);
            }
        }
        Err(e) => println!("  not AccountRow rows: {}", e),
    }

    println!("\n=== Dynamic rows ===");
    let descriptor = TypeDescriptor::builder("account")
        .field("owner", DomainKind::Name)
        .field("amount", PrimitiveKind::I64)
        .field("symbol", DomainKind::Symbol)
        .build();
    println!("Layout: {}", descriptor);

    let mut records = Vec::new();
    if let Err(e) = response.binary_to_records(&descriptor, &mut records) {
        eprintln!("Failed to decode: {}", e);
        std::process::exit(1);
    }
    for (i, record) in records.iter().enumerate() {
        let fields: Vec<String> = record
            .fields()
            .map(|(name, value)| format!("{}={}", name, format_value(value)))
            .collect();
        println!("[{}] {}", i, fields.join(" "));
    }

    println!("\nRows: {} (more: {})", records.len(), response.more);
}
