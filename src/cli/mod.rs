use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, Write, stdin, stdout};
use std::path::Path;

use crate::application::{AppError, FormEvent, FormSession};
use crate::domain::{DocumentKind, LedgerHeader, VatMode, VatRate};
use crate::io::{ExportFormat, Exporter, UploadStub, upload};

/// ks-forms - KS-2 / KS-3 work ledger
#[derive(Parser)]
#[command(name = "ks-forms")]
#[command(about = "Fill in KS-2 and KS-3 construction accounting forms and compute VAT totals")]
#[command(version)]
pub struct Cli {
    /// VAT rate new forms start with: exempt, 0, 10, 20
    #[arg(long, default_value = "exempt", global = true)]
    pub vat_rate: String,

    /// VAT mode new forms start with: excluded, included, added
    #[arg(long, default_value = "excluded", global = true)]
    pub vat_mode: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available document forms
    Forms,

    /// Open a form, replay edit events and print the result
    Fill {
        /// Document kind: ks2 or ks3
        kind: String,

        /// JSON-lines event file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Format: table, json, csv
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Attach an estimate file to a new form
    Upload {
        /// Document kind: ks2 or ks3
        kind: String,

        /// Estimate file (.xlsx, .xls, .csv, .txt)
        file: String,

        /// Format: table, json, csv
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the level.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = if verbose { "ks_forms=debug" } else { "ks_forms=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

impl Cli {
    /// VAT setup for freshly opened forms.
    pub fn defaults(&self) -> Result<LedgerHeader, AppError> {
        let vat_rate = VatRate::from_str(&self.vat_rate)
            .ok_or_else(|| AppError::InvalidVatRate(self.vat_rate.clone()))?;
        let vat_mode = VatMode::from_str(&self.vat_mode)
            .ok_or_else(|| AppError::InvalidVatMode(self.vat_mode.clone()))?;
        Ok(LedgerHeader::new(vat_rate, vat_mode))
    }

    pub fn run(self) -> Result<()> {
        let defaults = self.defaults()?;

        match self.command {
            Commands::Forms => {
                println!("{:<6} {:<6} TITLE", "KIND", "CODE");
                for kind in DocumentKind::all() {
                    println!("{:<6} {:<6} {}", kind.as_str(), kind.code(), kind.title());
                }
            }
            Commands::Fill {
                kind,
                input,
                format,
                output,
            } => {
                let mut session = FormSession::new(defaults);
                session.open(parse_kind(&kind)?);

                let events = match input {
                    Some(path) => {
                        let file = File::open(&path)
                            .with_context(|| format!("Failed to open event file: {}", path))?;
                        FormEvent::read_all(BufReader::new(file))?
                    }
                    None => FormEvent::read_all(stdin().lock())?,
                };
                let applied = session.apply_all(events)?;
                tracing::info!(applied, "Events applied");

                write_output(&session, &format, output.as_deref())?;
            }
            Commands::Upload {
                kind,
                file,
                format,
                output,
            } => {
                let mut session = FormSession::new(defaults);
                session.open(parse_kind(&kind)?);

                let result = upload(&mut session, &UploadStub, Path::new(&file))?;
                eprintln!(
                    "Estimate attached: {} ({} rows imported)",
                    result.file_name, result.drafts
                );

                write_output(&session, &format, output.as_deref())?;
            }
        }

        Ok(())
    }
}

fn parse_kind(kind: &str) -> Result<DocumentKind, AppError> {
    DocumentKind::from_str(kind).ok_or_else(|| AppError::UnknownDocumentKind(kind.to_string()))
}

fn write_output(session: &FormSession, format: &str, output: Option<&str>) -> Result<()> {
    let Some(format) = ExportFormat::from_str(format) else {
        bail!("Unknown format: {}. Use: table, json, csv", format);
    };
    let exporter = Exporter::new(session);

    match output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to create file: {}", path))?;
            let snapshot = exporter.export(format, file)?;
            eprintln!("Exported {} rows to {}", snapshot.items.len(), path);
        }
        None => {
            let mut out = stdout().lock();
            exporter.export(format, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}
