use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use eyre::{Result, WrapErr as _};
use ndef_report::{
    ReadingEvent, ScannerConfig, TagReport,
    export::{csv::to_csv, json::to_json, text::to_text},
    logging, report,
};

#[derive(Parser)]
#[command(name = "ndef-report")]
#[command(about = "Decode NFC tag readings into structured reports", long_about = None)]
struct Cli {
    /// Log decoding details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Report output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Pretty printed JSON (default)
    #[default]
    Json,
    /// Field,Value table
    Csv,
    /// Plain text
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a report from a reading event saved as JSON
    Event {
        /// Path to the reading event JSON file
        path: PathBuf,
    },

    /// Build a report from raw NDEF message bytes
    Raw {
        /// Hex encoded message, spaces, colons and dashes are ignored
        hex: String,

        /// The bytes are a tag memory dump with the message wrapped in a TLV
        #[arg(long)]
        tlv: bool,

        /// Tag serial number, hex encoded
        #[arg(short, long)]
        serial: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = ScannerConfig::from_env();

    let log_filter = if cli.verbose {
        "debug"
    } else {
        config.log_filter.as_str()
    };
    logging::init(log_filter);

    let event = match cli.command {
        Commands::Event { path } => read_event(&path)?,
        Commands::Raw { hex, tlv, serial } => raw_event(&hex, tlv, serial.as_deref())?,
    };

    let report = report::build_report(&event, &config.scanner_version)
        .wrap_err("unable to build a report from the reading")?;

    println!("{}", render(&report, cli.format)?);

    Ok(())
}

fn read_event(path: &Path) -> Result<ReadingEvent> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("unable to read {}", path.display()))?;

    let event = ReadingEvent::from_json(&json).wrap_err("invalid reading event")?;
    Ok(event)
}

fn raw_event(hex: &str, tlv: bool, serial: Option<&str>) -> Result<ReadingEvent> {
    let bytes = ndef_util::hex_to_bytes(hex).wrap_err("message is not valid hex")?;

    let records = if tlv {
        ndef_decode::parse_tlv_message(&bytes)
    } else {
        ndef_decode::parse_message(&bytes)
    }
    .wrap_err("unable to parse NDEF message")?;

    let mut event = ReadingEvent::from_records(records);

    if let Some(serial) = serial {
        let serial = ndef_util::hex_to_bytes(serial).wrap_err("serial number is not valid hex")?;
        event = event.with_serial_number(serial);
    }

    Ok(event)
}

fn render(report: &TagReport, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => to_json(report)?,
        OutputFormat::Csv => to_csv(report)?,
        OutputFormat::Text => to_text(report),
    };

    Ok(rendered)
}
