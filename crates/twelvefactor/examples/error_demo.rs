//! Example: Diagnostics for missing and malformed values
//!
//! Evaluation stops at the first failing entry. Each error carries a
//! diagnostic code and a help line, rendered here through miette.
//!
//! Run with:
//!   `cargo run --example error_demo`

use std::collections::HashMap;

use twelvefactor::{Config, ConvertError, Entry, Kind, Schema};

fn report(title: &str, config: &Config, schema: &Schema) {
    println!("=== {title} ===\n");

    match config.evaluate(schema) {
        Ok(resolved) => println!("resolved {} entries\n", resolved.len()),
        Err(e) => println!("{:?}\n", twelvefactor::miette::Report::from(e)),
    }
}

fn main() {
    let port = Kind::custom("port", |raw| {
        let n: u16 = raw.parse().map_err(ConvertError::invalid)?;
        if n < 1024 {
            return Err(ConvertError::with_args([
                format!("port {n} is privileged"),
                "use 1024 or above".to_string(),
            ]));
        }
        Ok(n.into())
    });

    let schema = Schema::new()
        .entry("DATABASE_URL", Kind::String)
        .entry("PORT", Entry::of(port).with_default(8080))
        .entry("WORKERS", Entry::of(Kind::Int).with_default(4));

    let env = |pairs: &[(&str, &str)]| -> Config {
        Config::with_environ(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<HashMap<_, _>>(),
        )
    };

    report("Missing variable", &env(&[]), &schema);

    report(
        "Converter rejected the value",
        &env(&[("DATABASE_URL", "postgres://db"), ("PORT", "80")]),
        &schema,
    );

    report(
        "Malformed integer",
        &env(&[("DATABASE_URL", "postgres://db"), ("WORKERS", "four")]),
        &schema,
    );

    report(
        "All good",
        &env(&[("DATABASE_URL", "postgres://db"), ("PORT", "8443")]),
        &schema,
    );
}
