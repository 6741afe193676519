mod commands;
mod output;

use clap::{Parser, Subcommand};
use pedidos_core::export::DEFAULT_FILE_NAME;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "pedidos",
    version,
    about = "Extract product codes, quantities and page numbers from PDF orders into a spreadsheet"
)]
struct Cli {
    /// Enable verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract order rows from one or more PDFs and write them to an .xlsx file
    Extract {
        /// PDF files, processed in the given order
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Predefined layout (default: jbgf)
        #[arg(short, long, value_name = "NAME", conflicts_with = "layout")]
        preset: Option<String>,

        /// Custom JSON layout file
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Let each quantity be matched by at most one product
        #[arg(long)]
        exclusive: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Spreadsheet to write (only written when rows were found)
        #[arg(long, value_name = "FILE", default_value = DEFAULT_FILE_NAME)]
        xlsx: PathBuf,
    },
    /// Print the positioned text blocks of a PDF, to help tune a layout
    Blocks {
        /// Path to PDF file
        input_file: PathBuf,

        /// Only show this page (1-based)
        #[arg(long)]
        page: Option<usize>,

        /// Predefined layout used to mark block roles (default: jbgf)
        #[arg(short, long, value_name = "NAME", conflicts_with = "layout")]
        preset: Option<String>,

        /// Custom JSON layout file used to mark block roles
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,
    },
    /// Manage and inspect layouts
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
}

#[derive(Subcommand)]
enum LayoutAction {
    /// List predefined layouts
    List,
    /// Print a predefined layout as JSON
    Show {
        /// Preset name (e.g., "jbgf")
        preset: String,
    },
    /// Validate a custom layout file
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr; stdout carries the extracted rows.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not set up logging: {e}");
    }

    let result = match cli.command {
        Commands::Extract {
            input_files,
            preset,
            layout,
            exclusive,
            output,
            xlsx,
        } => commands::extract::run(
            input_files,
            preset.as_deref(),
            layout.as_deref(),
            exclusive,
            &output,
            &xlsx,
        ),
        Commands::Blocks {
            input_file,
            page,
            preset,
            layout,
        } => commands::blocks::run(&input_file, page, preset.as_deref(), layout.as_deref()),
        Commands::Layout { action } => match action {
            LayoutAction::List => commands::layout::list(),
            LayoutAction::Show { preset } => commands::layout::show(&preset),
            LayoutAction::Validate { file } => commands::layout::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
