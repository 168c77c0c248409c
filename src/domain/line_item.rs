use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{format_money, is_in_range, parse_amount};

pub type ItemId = u32;

/// Editable columns of a work row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    SpecReference,
    Description,
    UnitRateReference,
    Unit,
    Quantity,
    UnitPrice,
}

impl ItemField {
    pub fn all() -> [ItemField; 6] {
        [
            ItemField::SpecReference,
            ItemField::Description,
            ItemField::UnitRateReference,
            ItemField::Unit,
            ItemField::Quantity,
            ItemField::UnitPrice,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::SpecReference => "specReference",
            ItemField::Description => "description",
            ItemField::UnitRateReference => "unitRateReference",
            ItemField::Unit => "unit",
            ItemField::Quantity => "quantity",
            ItemField::UnitPrice => "unitPrice",
        }
    }

    /// Accepts the form's camelCase names as well as snake_case.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().replace('_', "").to_lowercase().as_str() {
            "specreference" => Some(ItemField::SpecReference),
            "description" => Some(ItemField::Description),
            "unitratereference" => Some(ItemField::UnitRateReference),
            "unit" => Some(ItemField::Unit),
            "quantity" => Some(ItemField::Quantity),
            "unitprice" => Some(ItemField::UnitPrice),
            _ => None,
        }
    }

    /// Quantity and unit price feed the line total.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ItemField::Quantity | ItemField::UnitPrice)
    }
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of performed work.
///
/// Numeric columns keep the text exactly as typed; `line_total` is derived
/// from them and rewritten on every numeric edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ItemId,
    /// Position in the external estimate
    pub spec_reference: String,
    pub description: String,
    /// Unit-rate catalog entry (e.g. "ФЕР 06-01-001-01")
    pub unit_rate_reference: String,
    pub unit: String,
    quantity: String,
    unit_price: String,
    line_total: String,
}

impl LineItem {
    /// Create an empty row.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            spec_reference: String::new(),
            description: String::new(),
            unit_rate_reference: String::new(),
            unit: String::new(),
            quantity: String::new(),
            unit_price: String::new(),
            line_total: format_money(Decimal::ZERO),
        }
    }

    /// Create a row from an imported draft.
    pub fn from_draft(id: ItemId, draft: LineItemDraft) -> Self {
        let mut item = Self {
            id,
            spec_reference: draft.spec_reference,
            description: draft.description,
            unit_rate_reference: draft.unit_rate_reference,
            unit: draft.unit,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            line_total: String::new(),
        };
        item.recompute_line_total();
        item
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn unit_price(&self) -> &str {
        &self.unit_price
    }

    /// Formatted `quantity × unit_price`, always two decimals.
    pub fn line_total(&self) -> &str {
        &self.line_total
    }

    /// Line total as a number; an unreadable stored value counts as zero.
    pub fn line_total_value(&self) -> Decimal {
        parse_amount(&self.line_total)
    }

    pub fn get(&self, field: ItemField) -> &str {
        match field {
            ItemField::SpecReference => &self.spec_reference,
            ItemField::Description => &self.description,
            ItemField::UnitRateReference => &self.unit_rate_reference,
            ItemField::Unit => &self.unit,
            ItemField::Quantity => &self.quantity,
            ItemField::UnitPrice => &self.unit_price,
        }
    }

    /// Store `value` verbatim; numeric edits refresh the line total.
    pub fn set(&mut self, field: ItemField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ItemField::SpecReference => self.spec_reference = value,
            ItemField::Description => self.description = value,
            ItemField::UnitRateReference => self.unit_rate_reference = value,
            ItemField::Unit => self.unit = value,
            ItemField::Quantity => self.quantity = value,
            ItemField::UnitPrice => self.unit_price = value,
        }
        if field.is_numeric() {
            self.recompute_line_total();
        }
    }

    /// A product above the accepted range counts as zero.
    fn recompute_line_total(&mut self) {
        let total = parse_amount(&self.quantity).saturating_mul(parse_amount(&self.unit_price));
        let total = if is_in_range(total) { total } else { Decimal::ZERO };
        self.line_total = format_money(total);
    }

    /// True when no column has been filled in.
    pub fn is_blank(&self) -> bool {
        ItemField::all().iter().all(|f| self.get(*f).trim().is_empty())
    }
}

/// A row as produced by an estimate import, before it receives an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemDraft {
    pub spec_reference: String,
    pub description: String,
    pub unit_rate_reference: String,
    pub unit: String,
    pub quantity: String,
    pub unit_price: String,
}

impl LineItemDraft {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = quantity.into();
        self
    }

    pub fn with_unit_price(mut self, unit_price: impl Into<String>) -> Self {
        self.unit_price = unit_price.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}
