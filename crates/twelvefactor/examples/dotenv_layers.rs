//! Example: Layering the process environment over a `.env` file
//!
//! Process variables win over the file; the file wins over defaults.
//!
//! Run with:
//! ```sh
//! # Create a .env file first
//! echo 'DATABASE_URL=postgres://localhost/mydb' > .env
//! echo 'APP_PORT=3000' >> .env
//!
//! APP_PORT=4000 cargo run --example dotenv_layers
//! ```

use twelvefactor::environ::{DotenvEnv, Layered};
use twelvefactor::{Config, Entry, Kind, Schema};

fn main() -> twelvefactor::Result<()> {
    let environ = Layered::new().with_process().with(DotenvEnv::new()?);
    let config = Config::with_environ(environ);

    let schema = Schema::new()
        .entry("DATABASE_URL", Entry::new().with_default("sqlite:///"))
        .entry("PORT", Entry::of(Kind::Int).with_key("APP_PORT").with_default(8080));

    let resolved = config.evaluate(&schema)?;

    for entry in resolved.entries() {
        println!(
            "{:<14} = {:<30} [{} via {}]",
            entry.name, entry.value, entry.source, entry.key
        );
    }

    Ok(())
}
