//! Example: Plugging domain types into coercion
//!
//! Converters turn a raw string into any value, including opaque Rust types
//! carried in `Value::Custom`. They work as element kinds of containers too.
//!
//! Run with:
//!   `LISTEN=0.0.0.0:8080 UPSTREAMS="10.0.0.1:80, 10.0.0.2:80" cargo run --example custom_converter`

use std::net::SocketAddr;
use std::time::Duration;

use twelvefactor::{ConvertError, Entry, Kind, Schema, Value};

fn socket_addr() -> Kind {
    Kind::custom("socket address", |raw| {
        raw.parse::<SocketAddr>()
            .map(Value::custom)
            .map_err(ConvertError::invalid)
    })
}

/// Accepts `30s`, `5m` or a bare number of seconds.
fn duration() -> Kind {
    Kind::custom("duration", |raw| {
        let (digits, scale) = match raw.strip_suffix('m') {
            Some(minutes) => (minutes, 60),
            None => (raw.strip_suffix('s').unwrap_or(raw), 1),
        };
        let n: u64 = digits
            .trim()
            .parse()
            .map_err(|_| ConvertError::invalid(format!("invalid duration: {raw:?}")))?;
        Ok(Value::custom(Duration::from_secs(n * scale)))
    })
}

fn main() -> twelvefactor::Result<()> {
    let schema = Schema::new()
        .entry(
            "LISTEN",
            Entry::of(socket_addr()).with_default(Value::custom(SocketAddr::from(([127, 0, 0, 1], 8000)))),
        )
        .entry(
            "UPSTREAMS",
            Entry::of(Kind::List)
                .with_subtype(socket_addr())
                .with_default(Vec::<Value>::new()),
        )
        .entry(
            "TIMEOUT",
            Entry::of(duration()).with_default(Value::custom(Duration::from_secs(30))),
        );

    let resolved = twelvefactor::config().evaluate(&schema)?;

    if let Some(addr) = resolved["LISTEN"].downcast_ref::<SocketAddr>() {
        println!("listening on {addr}");
    }

    for upstream in resolved["UPSTREAMS"].as_items().unwrap_or_default() {
        if let Some(addr) = upstream.downcast_ref::<SocketAddr>() {
            println!("upstream {addr}");
        }
    }

    if let Some(timeout) = resolved["TIMEOUT"].downcast_ref::<Duration>() {
        println!("timeout {timeout:?}");
    }

    Ok(())
}
