use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use payalloc::cli::{
    handle_audit_command, handle_config_command, handle_form_command, FormCommands, FormOptions,
};
use payalloc::config::{OutputFormat, PayallocPaths, Settings};
use payalloc::models::PaymentKind;

#[derive(Parser)]
#[command(
    name = "payalloc",
    author = "Kaylee Beyene",
    version,
    about = "Allocate payments across outstanding bills and invoices",
    long_about = "payalloc spreads a payment over a set of outstanding bills (payment made) \
                  or invoices (payment received). It can pay every entry in full, or \
                  allocate an amount to entries in order until it runs out."
)]
struct Cli {
    /// Bills you pay or invoices you collect (defaults to the saved kind, then "made")
    #[arg(short, long, global = true, env = "PAYALLOC_KIND")]
    kind: Option<PaymentKind>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Write the resulting entries to a file (.json, .yaml or .csv) instead of printing them
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Don't record changes in the audit log
    #[arg(long, global = true)]
    no_audit: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Form(FormCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the settings file with the current values
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PayallocPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Form(cmd) => {
            let options = FormOptions {
                kind: cli.kind,
                format: cli.format.unwrap_or(settings.default_format),
                output: cli.output,
                audit: settings.audit_enabled && !cli.no_audit,
            };
            handle_form_command(&paths, &settings, &options, cmd)?;
        }
        Commands::Audit { count } => handle_audit_command(&paths, count)?,
        Commands::Config { init } => handle_config_command(&paths, &settings, init)?,
    }

    Ok(())
}
