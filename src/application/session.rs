use serde::{Deserialize, Serialize};
use std::io::BufRead;

use crate::domain::{
    DocumentHeader, DocumentKind, HeaderField, ItemField, ItemId, Ledger, LedgerHeader,
    LineItemDraft, Totals, VatMode, VatRate,
};

use super::AppError;

/// Largest number of rows a single bulk-add may request.
pub const MAX_BULK_ROWS: usize = 1000;

/// One user action coming from the form.
///
/// Serialized as internally tagged JSON so a shell can replay a session from
/// a JSON-lines stream, e.g. `{"type":"update_item","id":1,"field":"quantity","value":"10"}`.
/// Field names stay plain strings here; they are resolved when applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    AddItem,
    AddItems {
        count: usize,
    },
    DeleteItem {
        id: ItemId,
    },
    UpdateItem {
        id: ItemId,
        field: String,
        value: String,
    },
    SetHeader {
        field: String,
        value: String,
    },
    SetVat {
        #[serde(default)]
        rate: Option<String>,
        #[serde(default)]
        mode: Option<String>,
    },
    Reset,
    Back,
}

impl FormEvent {
    /// Parse a JSON-lines event stream. Blank lines and `#` comments are skipped.
    pub fn read_all<R: BufRead>(reader: R) -> Result<Vec<FormEvent>, AppError> {
        let mut events = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let event = serde_json::from_str(trimmed).map_err(|e| AppError::InvalidEvent {
                line: index + 1,
                message: e.to_string(),
            })?;
            events.push(event);
        }
        Ok(events)
    }
}

/// State of one form-filling session: which document is open, its header,
/// the work ledger and the estimate file attached to it.
///
/// With no document open the session shows the document picker; closing a
/// document discards everything typed into it.
#[derive(Debug, Clone)]
pub struct FormSession {
    defaults: LedgerHeader,
    active: Option<DocumentKind>,
    header: DocumentHeader,
    ledger: Ledger,
    uploaded_file: Option<String>,
}

impl FormSession {
    /// Create a session showing the document picker.
    /// `defaults` is the VAT setup every freshly opened ledger starts with.
    pub fn new(defaults: LedgerHeader) -> Self {
        Self {
            defaults,
            active: None,
            header: DocumentHeader::default(),
            ledger: Ledger::new(defaults),
            uploaded_file: None,
        }
    }

    pub fn active(&self) -> Option<DocumentKind> {
        self.active
    }

    pub fn header(&self) -> &DocumentHeader {
        &self.header
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn uploaded_file(&self) -> Option<&str> {
        self.uploaded_file.as_deref()
    }

    /// Totals as currently displayed.
    pub fn totals(&self) -> Totals {
        self.ledger.compute_totals()
    }

    /// Open a document form with a blank header and a fresh ledger.
    pub fn open(&mut self, kind: DocumentKind) {
        tracing::info!(document = %kind, "Opening form");
        self.clear();
        self.active = Some(kind);
    }

    /// Return to the document picker, dropping everything entered so far.
    pub fn back(&mut self) {
        if let Some(kind) = self.active.take() {
            tracing::info!(document = %kind, "Closing form");
        }
        self.clear();
    }

    fn clear(&mut self) {
        self.header = DocumentHeader::default();
        self.ledger.reset(self.defaults);
        self.uploaded_file = None;
    }

    fn require_active(&self) -> Result<DocumentKind, AppError> {
        self.active.ok_or(AppError::NoActiveForm)
    }

    pub fn add_item(&mut self) -> Result<ItemId, AppError> {
        self.require_active()?;
        let id = self.ledger.add_item();
        tracing::debug!(id, "Added row");
        Ok(id)
    }

    pub fn add_items(&mut self, count: usize) -> Result<Vec<ItemId>, AppError> {
        self.require_active()?;
        if count > MAX_BULK_ROWS {
            return Err(AppError::TooManyRows {
                requested: count,
                max: MAX_BULK_ROWS,
            });
        }
        let ids = self.ledger.add_items(count);
        tracing::debug!(count, rows = self.ledger.len(), "Added rows");
        Ok(ids)
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<(), AppError> {
        self.require_active()?;
        if !self.ledger.contains(id) {
            tracing::warn!(id, "Ignoring delete of unknown row");
        } else if self.ledger.len() == 1 {
            tracing::warn!(id, "Ignoring delete of the last remaining row");
        }
        self.ledger.delete_item(id);
        Ok(())
    }

    /// Apply a cell edit. `field` uses the form's column names.
    pub fn update_item(&mut self, id: ItemId, field: &str, value: &str) -> Result<(), AppError> {
        self.require_active()?;
        let field = ItemField::from_str(field).ok_or_else(|| AppError::UnknownField(field.into()))?;
        if !self.ledger.contains(id) {
            tracing::warn!(id, %field, "Ignoring edit of unknown row");
        }
        self.ledger.update_item(id, field, value);
        tracing::debug!(id, %field, "Updated row");
        Ok(())
    }

    pub fn set_header_field(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        self.require_active()?;
        let field =
            HeaderField::from_str(field).ok_or_else(|| AppError::UnknownField(field.into()))?;
        self.header.set(field, value);
        Ok(())
    }

    /// Change VAT rate and/or mode; a missing part keeps its current value.
    pub fn set_vat(&mut self, rate: Option<&str>, mode: Option<&str>) -> Result<(), AppError> {
        self.require_active()?;
        let mut vat = self.ledger.header();
        if let Some(rate) = rate {
            vat.vat_rate =
                VatRate::from_str(rate).ok_or_else(|| AppError::InvalidVatRate(rate.into()))?;
        }
        if let Some(mode) = mode {
            vat.vat_mode =
                VatMode::from_str(mode).ok_or_else(|| AppError::InvalidVatMode(mode.into()))?;
        }
        tracing::debug!(rate = %vat.vat_rate, mode = %vat.vat_mode, "VAT changed");
        self.ledger.set_header(vat);
        Ok(())
    }

    /// Clear the rows back to a single empty one and restore the default VAT
    /// setup; the document header stays.
    pub fn reset_ledger(&mut self) -> Result<(), AppError> {
        self.require_active()?;
        self.ledger.reset(self.defaults);
        Ok(())
    }

    /// Record an attached estimate file and seed the rows from its drafts.
    /// Zero drafts only records the file; rows typed so far are kept.
    pub fn attach_upload(
        &mut self,
        file_name: impl Into<String>,
        drafts: Vec<LineItemDraft>,
    ) -> Result<(), AppError> {
        self.require_active()?;
        let file_name = file_name.into();
        tracing::info!(file = %file_name, drafts = drafts.len(), "Estimate attached");
        self.ledger.seed(drafts);
        self.uploaded_file = Some(file_name);
        Ok(())
    }

    pub fn apply(&mut self, event: FormEvent) -> Result<(), AppError> {
        match event {
            FormEvent::AddItem => self.add_item().map(|_| ()),
            FormEvent::AddItems { count } => self.add_items(count).map(|_| ()),
            FormEvent::DeleteItem { id } => self.delete_item(id),
            FormEvent::UpdateItem { id, field, value } => self.update_item(id, &field, &value),
            FormEvent::SetHeader { field, value } => self.set_header_field(&field, &value),
            FormEvent::SetVat { rate, mode } => self.set_vat(rate.as_deref(), mode.as_deref()),
            FormEvent::Reset => self.reset_ledger(),
            FormEvent::Back => {
                self.back();
                Ok(())
            }
        }
    }

    /// Apply events in order, stopping at the first shell error.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = FormEvent>) -> Result<usize, AppError> {
        let mut applied = 0;
        for event in events {
            self.apply(event)?;
            applied += 1;
        }
        Ok(applied)
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(LedgerHeader::default())
    }
}
