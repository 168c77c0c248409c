use rust_decimal::Decimal;

use super::{format_money, ItemField, ItemId, LedgerHeader, LineItem, LineItemDraft, VatMode};

/// Ordered list of work rows plus the VAT parameters they are totalled with.
///
/// A ledger never holds zero rows: it starts with one empty row, refuses to
/// delete the last one, and `reset` brings it back to a single row with id 1.
/// Every operation is infallible; bad input is absorbed, not reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    header: LedgerHeader,
    items: Vec<LineItem>,
}

/// Aggregates derived from the current rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of all line totals
    pub grand_total: Decimal,
    pub vat_amount: Decimal,
    pub vat_mode: VatMode,
}

impl Totals {
    /// Amount payable: VAT is added on top only in `Added` mode.
    pub fn total_with_vat(&self) -> Decimal {
        match self.vat_mode {
            VatMode::Added => self.grand_total.saturating_add(self.vat_amount),
            VatMode::Excluded | VatMode::Included => self.grand_total,
        }
    }

    pub fn grand_total_display(&self) -> String {
        format_money(self.grand_total)
    }

    pub fn vat_amount_display(&self) -> String {
        format_money(self.vat_amount)
    }

    pub fn total_with_vat_display(&self) -> String {
        format_money(self.total_with_vat())
    }
}

impl Ledger {
    pub fn new(header: LedgerHeader) -> Self {
        Self {
            header,
            items: vec![LineItem::new(1)],
        }
    }

    pub fn header(&self) -> LedgerHeader {
        self.header
    }

    pub fn set_header(&mut self, header: LedgerHeader) {
        self.header = header;
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id for the next row: highest id currently present plus one.
    /// Recomputed from the rows each time, so deleting the top row frees its id.
    fn next_id(&self) -> ItemId {
        self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1
    }

    /// Append an empty row and return its id.
    pub fn add_item(&mut self) -> ItemId {
        let id = self.next_id();
        self.items.push(LineItem::new(id));
        id
    }

    /// Append `count` empty rows with consecutive ids, the same ids
    /// `count` calls to `add_item` would hand out.
    pub fn add_items(&mut self, count: usize) -> Vec<ItemId> {
        let start = self.next_id();
        self.items.reserve(count);
        (0..count)
            .map(|offset| {
                let id = start.saturating_add(offset as ItemId);
                self.items.push(LineItem::new(id));
                id
            })
            .collect()
    }

    /// Remove a row. Removing the only remaining row, or an unknown id, does nothing.
    pub fn delete_item(&mut self, id: ItemId) {
        if self.items.len() <= 1 {
            return;
        }
        self.items.retain(|item| item.id != id);
    }

    /// Store `value` in `field` of row `id`. Unknown ids are ignored.
    pub fn update_item(&mut self, id: ItemId, field: ItemField, value: impl Into<String>) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.set(field, value);
        }
    }

    /// Sum line totals and derive VAT, row by row in display order.
    pub fn compute_totals(&self) -> Totals {
        let (grand_total, vat_amount) = self.items.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(grand, vat), item| {
                let line_total = item.line_total_value();
                (
                    grand.saturating_add(line_total),
                    vat.saturating_add(self.header.vat_for(line_total)),
                )
            },
        );

        Totals {
            grand_total,
            vat_amount,
            vat_mode: self.header.effective_mode(),
        }
    }

    /// Back to a single empty row with id 1.
    pub fn reset(&mut self, header: LedgerHeader) {
        self.header = header;
        self.items = vec![LineItem::new(1)];
    }

    /// Replace all rows with imported drafts, numbered from 1.
    /// No drafts leaves the current rows untouched.
    pub fn seed(&mut self, drafts: Vec<LineItemDraft>) {
        if drafts.is_empty() {
            return;
        }
        self.items = drafts
            .into_iter()
            .zip(1..)
            .map(|(draft, id)| LineItem::from_draft(id, draft))
            .collect();
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerHeader::default())
    }
}
