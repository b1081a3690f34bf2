//! Performance benchmarks for twelvefactor coercion and evaluation.
//!
//! Run with: `cargo bench -p twelvefactor`

use std::collections::HashMap;

use divan::black_box;
use twelvefactor::{Config, Entry, Kind, Schema, Value, coerce};

fn main() {
    divan::main();
}

// ============================================================================
// Coercion
// ============================================================================

#[divan::bench]
fn parse_int() -> Value {
    coerce::parse(black_box("8080"), &Kind::Int, &Kind::String).unwrap_or(Value::None)
}

#[divan::bench]
fn parse_bool() -> Value {
    coerce::parse(black_box("Yes"), &Kind::Bool, &Kind::String).unwrap_or(Value::None)
}

#[divan::bench(args = [1, 10, 100])]
fn parse_int_list(n: usize) -> Value {
    let raw = (0..n).map(|i| i.to_string()).collect::<Vec<_>>().join(", ");
    coerce::parse(black_box(&raw), &Kind::List, &Kind::Int).unwrap_or(Value::None)
}

#[divan::bench(args = [10, 100])]
fn parse_set_dedup(n: usize) -> Value {
    let raw = (0..n).map(|i| (i % 7).to_string()).collect::<Vec<_>>().join(",");
    coerce::parse(black_box(&raw), &Kind::Set, &Kind::Int).unwrap_or(Value::None)
}

// ============================================================================
// Evaluation
// ============================================================================

fn fixture(fields: usize) -> (Config, Schema) {
    let env: HashMap<String, String> = (0..fields)
        .filter(|i| i % 2 == 0)
        .map(|i| (format!("FIELD_{i}"), i.to_string()))
        .collect();

    let schema = (0..fields)
        .map(|i| (format!("FIELD_{i}"), Entry::of(Kind::Int).with_default(0)))
        .collect();

    (Config::with_environ(env), schema)
}

#[divan::bench(args = [3, 10, 50])]
fn evaluate_schema(bencher: divan::Bencher, fields: usize) {
    let (config, schema) = fixture(fields);

    bencher.bench_local(|| config.evaluate(black_box(&schema)).map(|r| r.len()));
}

#[divan::bench]
fn evaluate_with_alias_and_mapper(bencher: divan::Bencher) {
    let env = HashMap::from([("DATABASE_URL".to_string(), "postgres://db/app".to_string())]);
    let config = Config::with_environ(env);
    let schema = Schema::new().entry(
        "DATABASES",
        Entry::new()
            .with_key("DATABASE_URL")
            .with_mapper(twelvefactor::Mapper::new(|url| Value::from(vec![url]))),
    );

    bencher.bench_local(|| config.evaluate(black_box(&schema)).map(|r| r.len()));
}
