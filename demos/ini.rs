//! Scanning INI-style input with a callback.
//!
//! Run with: cargo run --example ini

use tomlite::ini;

const INI: &str = r#"; global settings
user = "default"

[database]
host = localhost
port = 5432
user = admin

# network settings
[network]
timeout = 30
"#;

fn main() {
    println!("--- Scanning INI string ---");

    ini::scan(INI, |section, key, value| {
        if section.is_empty() {
            println!("Global: {key} = {value}");
        } else {
            println!("Section '{section}': {key} = {value}");
        }
        true
    });

    println!("\nScanning finished.");
}
