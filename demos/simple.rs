//! Parsing, querying, and re-serializing a configuration document.
//!
//! Run with: cargo run --example simple

use tomlite::{parse, to_string};

const CONFIG: &str = r#"# Example configuration.
title = "TOML Example"
enabled = true

[database]
ip = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
data = [ [ 1.0, 2.0 ], [ 3.0, 4.0, 5.0 ] ]

[[products]]
name = "Hammer"
sku = 738594937

[[products]]
name = "Nail"
sku = 284758393
"#;

fn main() -> tomlite::Result<()> {
    let doc = parse(CONFIG)?;

    println!("Parsing successful!\n");

    println!("Title: {}", doc.get_str("title", "Default Title"));
    println!("Enabled: {}", doc.get_bool("enabled", false));

    println!("\n[database]");
    println!("  IP: {}", doc.get_str("database.ip", "127.0.0.1"));
    println!(
        "  Max Connections: {}",
        doc.get_int("database.connection_max", 100)
    );
    if let Some(ports) = doc.get_array("database.ports") {
        let rendered: Vec<String> = ports.iter().map(ToString::to_string).collect();
        println!("  Ports: {}", rendered.join(" "));
    }

    println!("\n--- Advanced Queries ---");
    println!(
        "Second port in list: {}",
        doc.get_int("database.ports[1]", -1)
    );
    println!(
        "First product: Name={}, SKU={}",
        doc.get_str("products[0].name", "N/A"),
        doc.get_int("products[0].sku", 0)
    );
    println!(
        "Nested array value data[1][0]: {}",
        doc.get_float("database.data[1][0]", 0.0)
    );

    println!("\n--- Serialized Output ---\n{}", to_string(&doc));

    Ok(())
}
