//! # poswire CLI
//!
//! Command-line front end: builds one job, prints and cuts it.
//!
//! ## Usage
//!
//! ```bash
//! # Print the demo receipt
//! poswire --host 192.168.1.50 demo
//!
//! # Print a few lines of text
//! poswire --host 192.168.1.50 text "Hello" "World"
//!
//! # Print a centered logo
//! poswire --host 192.168.1.50 image logo.png --center
//!
//! # Barcodes and QR codes
//! poswire --host 192.168.1.50 barcode ean13 1234567890123 --center --human-readable
//! poswire --host 192.168.1.50 qr https://example.com --size 8
//!
//! # Write the job to a file instead of the network
//! poswire --dump job.bin demo receipt-full
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use poswire::{
    PosError, Printer, PrinterConfig, TcpTransport,
    protocol::barcode::barcode1d::{BarcodeSymbol, Symbology},
    protocol::barcode::qr::QrPayload,
    receipt,
    transport::{FileTransport, Transport},
};

/// poswire - ESC/POS receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "poswire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer host name or IP address
    #[arg(long)]
    host: Option<String>,

    /// Raw printing port
    #[arg(long)]
    port: Option<u16>,

    /// JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the job to a file instead of sending it
    #[arg(long, value_name = "FILE")]
    dump: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a demo receipt (omit the name to list them)
    Demo {
        /// Receipt name
        name: Option<String>,
    },

    /// Print lines of text
    Text {
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Print an image file
    Image {
        file: PathBuf,

        /// Center on the paper width
        #[arg(long)]
        center: bool,
    },

    /// Print a 1D barcode
    Barcode {
        /// Symbology: upca, upce, ean13, ean8, code39, i25, codabar, code93, code128, code11, msi
        kind: String,

        data: String,

        #[arg(long)]
        center: bool,

        /// Print the data as text under the symbol
        #[arg(long)]
        human_readable: bool,
    },

    /// Print a QR code
    Qr {
        data: String,

        /// Module size in dots (1-15)
        #[arg(long, default_value = "6")]
        size: u8,

        #[arg(long)]
        center: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PosError> {
    let mut config = match &cli.config {
        Some(path) => PrinterConfig::from_json_file(path)?,
        None => PrinterConfig::default(),
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    if let Commands::Demo { name } = &cli.command {
        match name {
            None => {
                println!("Available receipts:");
                for name in receipt::list_receipts() {
                    println!("  {}", name);
                }
                return Ok(());
            }
            Some(name) if !receipt::is_receipt(name) => {
                return Err(PosError::NotFound(format!(
                    "receipt '{}' (available: {})",
                    name,
                    receipt::list_receipts().join(", ")
                )));
            }
            Some(_) => {}
        }
    }

    let transport = open_transport(&config, cli.dump)?;
    let mut printer = Printer::new(config, transport);

    match cli.command {
        Commands::Demo { name } => {
            let name = name.unwrap_or_else(|| "receipt".to_string());
            receipt::by_name(&name, &mut printer)?;
        }
        Commands::Text { lines } => {
            for line in &lines {
                printer.write_line(line)?;
            }
        }
        Commands::Image { file, center } => {
            printer.print_image_file(&file, center)?;
        }
        Commands::Barcode {
            kind,
            data,
            center,
            human_readable,
        } => {
            let symbology = Symbology::by_name(&kind).ok_or_else(|| {
                PosError::InvalidArgument(format!("Unknown barcode type '{}'", kind))
            })?;
            let mut symbol = BarcodeSymbol::new(symbology, data);
            symbol.print_centered = center;
            symbol.print_human_readable = human_readable;
            printer.print_barcode(&symbol)?;
        }
        Commands::Qr { data, size, center } => {
            let mut payload = QrPayload::new(data, size);
            payload.centered = center;
            printer.print_qr(&payload)?;
        }
    }

    printer.feed_lines(3)?;
    printer.print_and_cut()?;
    printer.reset();
    println!("Printed successfully!");
    Ok(())
}

/// Dump file when `--dump` is given, otherwise the configured TCP printer.
fn open_transport(
    config: &PrinterConfig,
    dump: Option<PathBuf>,
) -> Result<Box<dyn Transport>, PosError> {
    if let Some(path) = dump {
        return Ok(Box::new(FileTransport::new(path)));
    }
    if config.host.is_empty() {
        return Err(PosError::Config(
            "no printer host; pass --host, set \"host\" in --config, or use --dump".to_string(),
        ));
    }
    Ok(Box::new(TcpTransport::from_config(config)))
}
