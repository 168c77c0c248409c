use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// VAT rate selectable on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatRate {
    /// "Без НДС" - the document carries no VAT at all
    #[default]
    Exempt,
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "20")]
    Twenty,
}

impl VatRate {
    pub fn all() -> [VatRate; 4] {
        [VatRate::Exempt, VatRate::Zero, VatRate::Ten, VatRate::Twenty]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VatRate::Exempt => "exempt",
            VatRate::Zero => "0",
            VatRate::Ten => "10",
            VatRate::Twenty => "20",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().trim_end_matches('%').to_lowercase().as_str() {
            "exempt" | "none" | "excluded" => Some(VatRate::Exempt),
            "0" => Some(VatRate::Zero),
            "10" => Some(VatRate::Ten),
            "20" => Some(VatRate::Twenty),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VatRate::Exempt => "Без НДС",
            VatRate::Zero => "0%",
            VatRate::Ten => "10%",
            VatRate::Twenty => "20%",
        }
    }

    /// Rate in percent. The exempt marker counts as 0.
    pub fn percent(&self) -> Decimal {
        match self {
            VatRate::Exempt | VatRate::Zero => Decimal::ZERO,
            VatRate::Ten => Decimal::TEN,
            VatRate::Twenty => Decimal::from(20),
        }
    }

    /// Rate as a fraction: 20% -> 0.2
    pub fn fraction(&self) -> Decimal {
        self.percent() / Decimal::ONE_HUNDRED
    }
}

impl std::fmt::Display for VatRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How VAT is derived from the line totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatMode {
    /// VAT is neither computed nor shown
    #[default]
    Excluded,
    /// Line totals already contain VAT; the VAT portion is backed out
    Included,
    /// VAT is charged on top of the line totals
    Added,
}

impl VatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VatMode::Excluded => "excluded",
            VatMode::Included => "included",
            VatMode::Added => "added",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "excluded" => Some(VatMode::Excluded),
            "included" => Some(VatMode::Included),
            "added" => Some(VatMode::Added),
            _ => None,
        }
    }
}

impl std::fmt::Display for VatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Document-level parameters affecting aggregate computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerHeader {
    pub vat_rate: VatRate,
    pub vat_mode: VatMode,
}

impl LedgerHeader {
    pub fn new(vat_rate: VatRate, vat_mode: VatMode) -> Self {
        Self { vat_rate, vat_mode }
    }

    /// Mode actually used for computation: an exempt document never carries VAT.
    pub fn effective_mode(&self) -> VatMode {
        if self.vat_rate == VatRate::Exempt {
            VatMode::Excluded
        } else {
            self.vat_mode
        }
    }

    /// VAT contained in or charged on a single line total.
    pub fn vat_for(&self, line_total: Decimal) -> Decimal {
        let rate = self.vat_rate.fraction();
        match self.effective_mode() {
            VatMode::Excluded => Decimal::ZERO,
            VatMode::Included => line_total.saturating_mul(rate) / (Decimal::ONE + rate),
            VatMode::Added => line_total.saturating_mul(rate),
        }
    }
}
