use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::application::{AppError, FormSession};
use crate::domain::{DocumentHeader, DocumentKind, HeaderField, LedgerHeader, LineItem, VatMode};

/// Everything the form currently displays, frozen for export or printing.
/// Totals are the ledger's own figures formatted to two decimals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub kind: DocumentKind,
    pub title: String,
    pub header: DocumentHeader,
    pub vat: LedgerHeader,
    pub items: Vec<LineItem>,
    pub grand_total: String,
    pub vat_amount: String,
    pub total_with_vat: String,
    pub uploaded_file: Option<String>,
}

/// Export formats the shell can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    /// Plain-text print preview
    Table,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Table => "table",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "table" | "preview" | "print" => Some(ExportFormat::Table),
            _ => None,
        }
    }
}

const CSV_COLUMNS: [&str; 8] = [
    "id",
    "specReference",
    "description",
    "unitRateReference",
    "unit",
    "quantity",
    "unitPrice",
    "lineTotal",
];

/// Exporter turning the open form into downloadable or printable output
pub struct Exporter<'a> {
    session: &'a FormSession,
}

impl<'a> Exporter<'a> {
    pub fn new(session: &'a FormSession) -> Self {
        Self { session }
    }

    /// Freeze the displayed state. Fails when no document is open.
    pub fn snapshot(&self) -> Result<DocumentSnapshot, AppError> {
        let kind = self.session.active().ok_or(AppError::NoActiveForm)?;
        let ledger = self.session.ledger();
        let totals = ledger.compute_totals();

        Ok(DocumentSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            kind,
            title: format!("{}: {}", kind.code(), kind.title()),
            header: self.session.header().clone(),
            vat: ledger.header(),
            items: ledger.items().to_vec(),
            grand_total: totals.grand_total_display(),
            vat_amount: totals.vat_amount_display(),
            total_with_vat: totals.total_with_vat_display(),
            uploaded_file: self.session.uploaded_file().map(str::to_string),
        })
    }

    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<DocumentSnapshot, AppError> {
        let snapshot = self.snapshot()?;
        match format {
            ExportFormat::Json => write_json(&snapshot, writer)?,
            ExportFormat::Csv => {
                write_csv(&snapshot, writer)?;
            }
            ExportFormat::Table => write_preview(&snapshot, writer)?,
        }
        tracing::info!(
            document = %snapshot.kind,
            format = format.as_str(),
            rows = snapshot.items.len(),
            "Document exported"
        );
        Ok(snapshot)
    }
}

/// Write the snapshot as pretty-printed JSON.
pub fn write_json<W: Write>(snapshot: &DocumentSnapshot, mut writer: W) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write one CSV row per line item followed by three totals rows.
/// Returns the number of item rows written.
pub fn write_csv<W: Write>(snapshot: &DocumentSnapshot, writer: W) -> Result<usize, AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_COLUMNS)?;

    let mut count = 0;
    for item in &snapshot.items {
        csv_writer.write_record([
            item.id.to_string().as_str(),
            item.spec_reference.as_str(),
            item.description.as_str(),
            item.unit_rate_reference.as_str(),
            item.unit.as_str(),
            item.quantity(),
            item.unit_price(),
            item.line_total(),
        ])?;
        count += 1;
    }

    for (label, value) in [
        ("grandTotal", &snapshot.grand_total),
        ("vatAmount", &snapshot.vat_amount),
        ("totalWithVat", &snapshot.total_with_vat),
    ] {
        csv_writer.write_record(["", "", "", "", "", "", label, value.as_str()])?;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Write a plain-text rendering of the document for printing.
pub fn write_preview<W: Write>(snapshot: &DocumentSnapshot, mut writer: W) -> Result<(), AppError> {
    writeln!(writer, "{}", snapshot.title)?;
    writeln!(writer, "{}", "=".repeat(snapshot.title.chars().count()))?;
    for field in HeaderField::all() {
        let value = snapshot.header.get(field);
        if !value.is_empty() {
            writeln!(writer, "{}: {}", field.label(), value)?;
        }
    }
    if let Some(file) = &snapshot.uploaded_file {
        writeln!(writer, "Смета: {}", file)?;
    }
    writeln!(
        writer,
        "НДС: {} ({})",
        snapshot.vat.vat_rate.label(),
        snapshot.vat.effective_mode()
    )?;
    writeln!(writer)?;

    writeln!(
        writer,
        "{:<4} {:<10} {:<30} {:<12} {:<6} {:>10} {:>12} {:>14}",
        "№", "Смета", "Наименование работ", "Расценка", "Ед.", "Кол-во", "Цена", "Стоимость"
    )?;
    writeln!(writer, "{}", "-".repeat(105))?;
    for item in &snapshot.items {
        writeln!(
            writer,
            "{:<4} {:<10} {:<30} {:<12} {:<6} {:>10} {:>12} {:>14}",
            item.id,
            truncate(&item.spec_reference, 10),
            truncate(&item.description, 30),
            truncate(&item.unit_rate_reference, 12),
            truncate(&item.unit, 6),
            truncate(item.quantity(), 10),
            truncate(item.unit_price(), 12),
            item.line_total()
        )?;
    }
    writeln!(writer, "{}", "-".repeat(105))?;
    writeln!(writer, "{:<40} {:>64}", "Итого:", snapshot.grand_total)?;
    match snapshot.vat.effective_mode() {
        VatMode::Excluded => {}
        VatMode::Included => {
            writeln!(writer, "{:<40} {:>64}", "В том числе НДС:", snapshot.vat_amount)?;
        }
        VatMode::Added => {
            writeln!(writer, "{:<40} {:>64}", "НДС:", snapshot.vat_amount)?;
            writeln!(writer, "{:<40} {:>64}", "Всего с НДС:", snapshot.total_with_vat)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
