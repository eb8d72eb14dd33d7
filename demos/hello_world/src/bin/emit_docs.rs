//! Emits the external names of every demo setting as JSON.

use envflag::docs::RecordDocs;
use hello_world::config::HelloWorldConfig;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let docs = RecordDocs::of(&HelloWorldConfig::default());
    let json = envflag::serde_json::to_string_pretty(&docs)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
