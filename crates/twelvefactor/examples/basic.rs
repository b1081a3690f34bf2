//! Example: Django-style settings from the process environment
//!
//! Run with:
//!   `SECRET_KEY=s3cr3t DEBUG=yes cargo run --example basic`
//!
//! Try also:
//!   `DATABASE_URL=postgres://user:pw@db:5432/app SECRET_KEY=x cargo run --example basic`

use std::collections::HashMap;

use twelvefactor::{Entry, Kind, Mapper, Schema, Value};

/// Splits a database URL into the parts a settings module cares about.
fn parse_database_url(url: Value) -> Value {
    let url = url.into_string();
    let (engine, rest) = url.split_once("://").unwrap_or((url.as_str(), ""));
    let name = rest.rsplit('/').next().unwrap_or_default();

    let parts = HashMap::from([
        ("ENGINE".to_string(), Value::from(engine)),
        ("NAME".to_string(), Value::from(name)),
    ]);

    Value::from(HashMap::from([("default".to_string(), Value::from(parts))]))
}

fn main() -> twelvefactor::Result<()> {
    let schema = Schema::new()
        .entry("DEBUG", Entry::of(Kind::Bool).with_default(false))
        .entry("SECRET_KEY", Kind::String)
        .entry(
            "ALLOWED_HOSTS",
            Entry::of(Kind::List).with_default(vec!["localhost"]),
        )
        .entry(
            "DATABASES",
            Entry::new()
                .with_key("DATABASE_URL")
                .with_default("sqlite:///")
                .with_mapper(Mapper::new(parse_database_url)),
        );

    let settings = twelvefactor::config().evaluate(&schema)?;

    for (name, value) in settings.iter() {
        let source = settings.source(name).map(|s| s.to_string()).unwrap_or_default();
        println!("{name:<14} = {value}  ({source})");
    }

    Ok(())
}
