//! Capabilities dump tool.
//!
//! Decodes a WMS GetCapabilities document from a file or stdin and prints
//! the result as JSON or as an indented layer tree. Logs go to stderr.

mod render;

use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wms_capabilities::{DecodeOptions, WmsCapabilities, WmsCapabilitiesReader, WmsVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Decoded document as JSON
    Json,
    /// Service summary and layer tree
    Tree,
}

#[derive(Parser, Debug)]
#[command(name = "capabilities-dump")]
#[command(about = "Decode a WMS GetCapabilities document")]
struct Args {
    /// Capabilities document path, or `-` for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Decode with this grammar regardless of the document's version attribute
    #[arg(long)]
    force_version: Option<WmsVersion>,

    /// Maximum element nesting (default: WMS_CAPABILITIES_MAX_DEPTH or 256)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log level
    #[arg(long, default_value = "warn", env = "LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args)?;

    let caps = decode_input(&args)?;
    let output = match args.format {
        OutputFormat::Json => render::json(&caps, args.compact)?,
        OutputFormat::Tree => render::tree(&caps),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end()).context("Failed to write output")?;
    Ok(())
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr);

    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn decode_options(args: &Args) -> DecodeOptions {
    match args.max_depth {
        Some(depth) => DecodeOptions::default().with_max_depth(depth),
        None => DecodeOptions::from_env(),
    }
}

fn decode_input(args: &Args) -> Result<WmsCapabilities> {
    let mut reader = WmsCapabilitiesReader::new(decode_options(args));
    if let Some(version) = args.force_version {
        reader = reader.with_version(version);
    }

    let decoded = if args.input == "-" {
        info!("Reading capabilities from stdin");
        reader.read_from(io::stdin().lock())
    } else {
        info!(path = %args.input, "Reading capabilities file");
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open {}", args.input))?;
        reader.read_from(BufReader::new(file))
    };

    decoded
        .with_context(|| format!("Failed to decode {}", args.input))?
        .with_context(|| format!("{} contains no XML element", args.input))
}
