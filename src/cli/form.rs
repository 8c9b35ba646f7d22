//! Payment form CLI commands
//!
//! Each command loads an entry snapshot into a form session, runs one form
//! operation, shows or saves the result and then records what changed in the
//! audit log. Nothing is audited unless the result was written.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger};
use crate::config::{OutputFormat, PayallocPaths, Settings};
use crate::display::{format_entry_table, format_totals};
use crate::error::{PayallocError, PayallocResult};
use crate::export::{export_report_file, write_report, AllocationReport};
use crate::models::{EntryId, FormUpdate, Money, PaymentForm, PaymentKind};
use crate::services::{sum_payment_amount, PaymentFormService};
use crate::storage::{load_snapshot, SnapshotFormat};

/// Payment form subcommands
#[derive(Subcommand, Debug)]
pub enum FormCommands {
    /// Pay every entry in full
    Full {
        /// Entry snapshot (.json, .yaml or .csv)
        file: PathBuf,
    },

    /// Spread an amount over the entries, oldest first
    Amount {
        /// Amount to allocate (e.g. "1,250.00"); anything unreadable counts as zero
        #[arg(allow_hyphen_values = true)]
        target: String,

        /// Entry snapshot (.json, .yaml or .csv)
        file: PathBuf,
    },

    /// Set the payment on a single entry
    Set {
        /// Entry snapshot (.json, .yaml or .csv)
        file: PathBuf,

        /// Entry ID
        entry_id: String,

        /// Payment amount (e.g. "100" or "100.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show totals for an entry snapshot
    Totals {
        /// Entry snapshot (.json, .yaml or .csv)
        file: PathBuf,
    },
}

/// Options shared by all form commands
#[derive(Debug, Clone)]
pub struct FormOptions {
    /// Overrides the kind saved in the snapshot
    pub kind: Option<PaymentKind>,
    pub format: OutputFormat,
    /// Write the result here instead of printing it
    pub output: Option<PathBuf>,
    pub audit: bool,
}

/// Form-level view stored in `Allocate` audit entries
#[derive(Serialize)]
struct FormAuditState {
    full_amount: Money,
    total_payment: Money,
}

impl FormAuditState {
    fn of(form: &PaymentForm) -> Self {
        Self {
            full_amount: form.full_amount,
            total_payment: sum_payment_amount(&form.entries),
        }
    }
}

/// Handle payment form commands
pub fn handle_form_command(
    paths: &PayallocPaths,
    settings: &Settings,
    options: &FormOptions,
    cmd: FormCommands,
) -> PayallocResult<()> {
    let service = PaymentFormService::new(settings);

    if let Some(path) = &options.output {
        SnapshotFormat::from_path(path)?;
    }

    let (form, update, action) = match cmd {
        FormCommands::Full { file } => {
            let form = load_form(&file, options.kind)?;
            let update = service.receive_full_amount(&form);
            let action = form.kind.full_amount_label().to_lowercase();
            (form, update, action)
        }
        FormCommands::Amount { target, file } => {
            let form = load_form(&file, options.kind)?;
            let update = service.full_amount_changed(&form, &target)?;
            (form, update, format!("allocate {}", target.trim()))
        }
        FormCommands::Set {
            file,
            entry_id,
            amount,
        } => {
            let form = load_form(&file, options.kind)?;
            let amount = Money::parse(&amount)
                .map_err(|e| PayallocError::Validation(format!("Invalid amount: {}", e)))?;
            let update =
                service.set_entry_payment(&form, &EntryId::new(entry_id.as_str()), amount)?;
            (form, update, format!("set {} to {}", entry_id, amount))
        }
        FormCommands::Totals { file } => {
            let form = load_form(&file, options.kind)?;
            return emit(settings, options, &service, &form);
        }
    };

    let next = form.apply(&update);
    emit(settings, options, &service, &next)?;

    if options.audit {
        record_changes(paths, &form, &next, &update, action)?;
    }
    Ok(())
}

fn load_form(file: &Path, kind: Option<PaymentKind>) -> PayallocResult<PaymentForm> {
    Ok(load_snapshot(file)?.into_form(kind))
}

/// Write the form-wide `Allocate` entry plus one `Update` per changed line
fn record_changes(
    paths: &PayallocPaths,
    before: &PaymentForm,
    after: &PaymentForm,
    update: &FormUpdate,
    action: String,
) -> PayallocResult<()> {
    if update.is_empty() {
        return Ok(());
    }

    paths.ensure_directories()?;
    let logger = AuditLogger::new(paths.audit_log());

    let before_state = serde_json::to_value(FormAuditState::of(before))?;
    let after_state = serde_json::to_value(FormAuditState::of(after))?;
    let entity_name = format!("payment {}: {}", after.kind, action);

    logger.log(&AuditEntry::allocate(
        after.id.to_string(),
        Some(entity_name),
        &before_state,
        &after_state,
        generate_diff(&before_state, &after_state),
    ))?;
    logger.log_entry_changes(after.id, &before.entries, &after.entries)?;

    Ok(())
}

fn emit(
    settings: &Settings,
    options: &FormOptions,
    service: &PaymentFormService,
    form: &PaymentForm,
) -> PayallocResult<()> {
    let totals = service.totals(form);
    let symbol = settings.currency_symbol.as_str();

    if let Some(path) = &options.output {
        let report = AllocationReport::from_form(form, totals.clone());
        let format = export_report_file(&report, path)?;
        println!(
            "{} entries written to {} ({})",
            form.entries.len(),
            path.display(),
            format
        );
        print!("{}", format_totals(&totals, form.kind, symbol));
        return Ok(());
    }

    let format = match options.format {
        OutputFormat::Table => {
            println!("{}", format_entry_table(&form.entries, form.kind, symbol));
            println!();
            print!("{}", format_totals(&totals, form.kind, symbol));
            return Ok(());
        }
        OutputFormat::Json => SnapshotFormat::Json,
        OutputFormat::Yaml => SnapshotFormat::Yaml,
        OutputFormat::Csv => SnapshotFormat::Csv,
    };

    let report = AllocationReport::from_form(form, totals);
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&report, format, &mut handle)?;
    handle.flush()?;

    Ok(())
}
