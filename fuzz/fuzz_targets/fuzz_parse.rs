#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use twelvefactor::{Kind, coerce};

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzKind {
    String,
    Bool,
    Int,
    Float,
    Complex,
    List,
    Tuple,
    Set,
    FrozenSet,
    Json,
}

impl FuzzKind {
    fn kind(self) -> Kind {
        match self {
            FuzzKind::String => Kind::String,
            FuzzKind::Bool => Kind::Bool,
            FuzzKind::Int => Kind::Int,
            FuzzKind::Float => Kind::Float,
            FuzzKind::Complex => Kind::Complex,
            FuzzKind::List => Kind::List,
            FuzzKind::Tuple => Kind::Tuple,
            FuzzKind::Set => Kind::Set,
            FuzzKind::FrozenSet => Kind::FrozenSet,
            FuzzKind::Json => Kind::json(),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    raw: &'a str,
    kind: FuzzKind,
    subtype: FuzzKind,
}

fuzz_target!(|input: Input<'_>| {
    // === parse never panics, whatever the kind ===
    let Ok(value) = coerce::parse(input.raw, &input.kind.kind(), &input.subtype.kind()) else {
        return;
    };

    // === Display/Debug never panic ===
    let _ = format!("{value}");
    let _ = format!("{value:?}");

    // === Accessors and numeric conversions never panic ===
    let _ = value.as_items();
    let _ = value.to_i64();
    let _ = value.to_f64();
    let _: Option<u16> = value.cast();
    let _ = value.clone() == value;

    // === Serialization never panics ===
    let _ = twelvefactor::serde_json::to_string(&value);
});
