//! Dumps fixed-size binary records (login accounting files, packet captures,
//! firmware tables) as JSON lines, one object per record.
//!
//! ```text
//! bitstring-dump --schema schemas/utmpx.json --text /var/run/utmpx
//! ```
//!
//! The schema file uses the shape of [bitstring::serde::SchemaDef]. Set
//! `RUST_LOG=bitstring=trace` to watch individual fields being read.

mod convert;
mod dump;

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bitstring::{Schema, serde::SchemaDef};
use clap::Parser;
use tracing::info;

use crate::dump::{DumpOptions, dump};

#[derive(Parser)]
#[command(name = "bitstring-dump", about = "Dump fixed-size binary records as JSON lines")]
struct Cli {
    /// JSON schema describing one record
    #[arg(short, long)]
    schema: PathBuf,
    /// Input file (default: stdin)
    input: Option<PathBuf>,
    /// Bytes per record (default: the length of the schema, rounded up)
    #[arg(short, long)]
    record_size: Option<usize>,
    /// Render byte fields as NUL-terminated text
    #[arg(long)]
    text: bool,
    /// Fail on a trailing partial record instead of skipping it
    #[arg(long)]
    strict: bool,
}

fn load_schema(path: &Path) -> Result<Schema> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    let def: SchemaDef = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse schema {}", path.display()))?;
    Schema::try_from(def).with_context(|| format!("invalid schema {}", path.display()))
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let schema = load_schema(&cli.schema)?;
    let options = DumpOptions {
        record_size: cli.record_size.unwrap_or_else(|| schema.record_len()),
        text: cli.text,
        strict: cli.strict,
    };

    let input: Box<dyn Read> = match &cli.input {
        Some(path) if path.as_os_str() != "-" => Box::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        ),
        _ => Box::new(io::stdin().lock()),
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let summary = dump(&schema, BufReader::new(input), &mut out, &options)?;
    out.flush()?;

    info!(
        records = summary.records,
        trailing_bytes = summary.trailing_bytes,
        "dump finished"
    );

    Ok(())
}
