//! Example: JSON-valued variables and serialising the result
//!
//! Run with:
//!   `FEATURES='{"beta": true, "limit": 5}' cargo run --example json_values --features serde`

use twelvefactor::{Entry, Kind, Schema, Value};

fn main() -> twelvefactor::Result<()> {
    let schema = Schema::new()
        .entry(
            "FEATURES",
            Entry::of(Kind::json()).with_default(Value::Map(Default::default())),
        )
        .entry("RATIO", Entry::of(Kind::Complex).with_default(Value::None))
        .entry("TAGS", Entry::of(Kind::Set).with_default(vec!["default"]));

    let resolved = twelvefactor::config().evaluate(&schema)?;

    let json = twelvefactor::serde_json::to_string_pretty(&resolved)
        .map_err(|e| twelvefactor::miette::miette!("{e}"))?;
    println!("{json}");

    Ok(())
}
