// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use ks_forms::application::FormSession;
use ks_forms::domain::{DocumentKind, ItemField, Ledger, LedgerHeader, VatMode, VatRate};

/// Helper to create a session with a KS-2 form already open
pub fn open_session(vat_rate: VatRate, vat_mode: VatMode) -> FormSession {
    let mut session = FormSession::new(LedgerHeader::new(vat_rate, vat_mode));
    session.open(DocumentKind::Ks2);
    session
}

/// Test fixture: Standard work rows
pub struct StandardRows;

impl StandardRows {
    /// Two rows: 10 × 100.00 and 2 × 50.00 (grand total 1100.00)
    pub fn ledger(header: LedgerHeader) -> Ledger {
        let mut ledger = Ledger::new(header);
        ledger.update_item(1, ItemField::Description, "Кладка стен из кирпича");
        ledger.update_item(1, ItemField::Unit, "м3");
        ledger.update_item(1, ItemField::Quantity, "10");
        ledger.update_item(1, ItemField::UnitPrice, "100.00");

        let second = ledger.add_item();
        ledger.update_item(second, ItemField::Description, "Устройство перемычек");
        ledger.update_item(second, ItemField::Unit, "шт");
        ledger.update_item(second, ItemField::Quantity, "2");
        ledger.update_item(second, ItemField::UnitPrice, "50.00");
        ledger
    }

    /// Same two rows entered through a session
    pub fn fill(session: &mut FormSession) -> Result<()> {
        session.update_item(1, "description", "Кладка стен из кирпича")?;
        session.update_item(1, "quantity", "10")?;
        session.update_item(1, "unitPrice", "100.00")?;

        let second = session.add_item()?;
        session.update_item(second, "description", "Устройство перемычек")?;
        session.update_item(second, "quantity", "2")?;
        session.update_item(second, "unitPrice", "50.00")?;
        Ok(())
    }
}
