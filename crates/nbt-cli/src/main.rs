//! `nbt` CLI — dump and query uncompressed NBT files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Dump a whole document as an indented tree (stdin → stdout)
//! nbt dump < level.nbt
//!
//! # Dump as pretty-printed JSON, from file to file
//! nbt dump -i level.nbt -o level.json --json --pretty
//!
//! # Pull out a few values without decoding the rest
//! nbt get -i level.nbt -p .Data.Version.Name -p .Data.LevelName
//!
//! # Same, with walk statistics
//! nbt get -i level.nbt -p .Data.Version.Name --stats
//! ```
//!
//! Input must already be decompressed (`gunzip -c level.dat | nbt dump`).
//! Set `RUST_LOG=debug` to see what the decoder skipped or truncated.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use nbt_core::{SelectiveParser, Tag};
use std::fs::File;
use std::io::{self, BufReader, Read};

#[derive(Parser)]
#[command(name = "nbt", version, about = "NBT (Named Binary Tag) CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a whole document and print it
    Dump {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print JSON instead of the tree dump
        #[arg(long)]
        json: bool,
        /// Indent the JSON output (requires --json)
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Decode only the given dotted paths, e.g. `.Data.Version.Name`
    Get {
        /// Path to extract; repeat for several
        #[arg(short, long = "path", required = true)]
        paths: Vec<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print walk statistics after the values
        #[arg(long)]
        stats: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            input,
            output,
            json,
            pretty,
        } => {
            let bytes = read_input(input.as_deref())?;
            let root = nbt_core::from_bytes(&bytes);
            if root.is_error() {
                bail!("Failed to decode NBT document: {}", root.error());
            }
            debug!("decoded {} bytes, root type {}", bytes.len(), root.type_name());

            let text = if json {
                render_json(&root, pretty)?
            } else {
                root.dump_tree()
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Get {
            paths,
            input,
            stats,
        } => {
            let mut reader = open_input(input.as_deref())?;
            let selection = SelectiveParser::new(paths).parse(&mut reader);

            let mut found: Vec<(&String, &Tag)> = selection.values.iter().collect();
            found.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = String::new();
            for (path, value) in found {
                if selection.unresolved.contains(path) {
                    warn!("path not found: {path}");
                }
                out.push_str(path);
                out.push('\n');
                out.push_str(&value.dump_tree());
            }
            if stats {
                let s = selection.stats;
                out.push_str(&format!(
                    "decoded: {}, descended: {}, skipped: {}\n",
                    s.decoded, s.descended, s.skipped
                ));
            }
            write_output(None, &out)?;
        }
    }

    Ok(())
}

fn render_json(root: &Tag, pretty: bool) -> Result<String> {
    let mut text = if pretty {
        serde_json::to_string_pretty(root)
    } else {
        serde_json::to_string(root)
    }
    .context("Failed to convert NBT to JSON")?;
    text.push('\n');
    Ok(text)
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    open_input(path)?
        .read_to_end(&mut buf)
        .context("Failed to read input")?;
    Ok(buf)
}

/// Buffered reader over the input file, or stdin when no path is given.
fn open_input(path: Option<&str>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to read file: {}", path))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
