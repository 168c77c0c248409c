mod common;

use common::StandardRows;
use ks_forms::domain::{ItemField, ItemId, Ledger, LedgerHeader, VatMode, VatRate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_added_vat_scenario() {
    let ledger = StandardRows::ledger(LedgerHeader::new(VatRate::Twenty, VatMode::Added));
    let totals = ledger.compute_totals();

    assert_eq!(totals.grand_total_display(), "1100.00");
    assert_eq!(totals.vat_amount_display(), "220.00");
    assert_eq!(totals.total_with_vat(), dec!(1320));
}

#[test]
fn test_included_vat_scenario() {
    let ledger = StandardRows::ledger(LedgerHeader::new(VatRate::Twenty, VatMode::Included));
    let totals = ledger.compute_totals();

    // 1100 × 0.2 / 1.2
    assert_eq!(totals.grand_total_display(), "1100.00");
    assert_eq!(totals.vat_amount_display(), "183.33");
    assert_eq!(totals.total_with_vat(), dec!(1100));
}

#[test]
fn test_excluded_vat_is_always_zero() {
    for rate in VatRate::all() {
        let ledger = StandardRows::ledger(LedgerHeader::new(rate, VatMode::Excluded));
        assert_eq!(ledger.compute_totals().vat_amount, Decimal::ZERO);
    }
}

#[test]
fn test_zero_rate_included_yields_zero_vat() {
    let ledger = StandardRows::ledger(LedgerHeader::new(VatRate::Zero, VatMode::Included));
    let totals = ledger.compute_totals();
    assert_eq!(totals.vat_amount, Decimal::ZERO);
    assert_eq!(totals.vat_mode, VatMode::Included);
}

#[test]
fn test_header_change_is_reflected_immediately() {
    let mut ledger = StandardRows::ledger(LedgerHeader::default());
    assert_eq!(ledger.compute_totals().vat_amount, Decimal::ZERO);

    ledger.set_header(LedgerHeader::new(VatRate::Twenty, VatMode::Added));
    assert_eq!(ledger.compute_totals().vat_amount, dec!(220));
}

#[test]
fn test_line_total_follows_every_edit() {
    let mut ledger = Ledger::default();
    ledger.update_item(1, ItemField::Quantity, "3");
    ledger.update_item(1, ItemField::UnitPrice, "19.99");
    assert_eq!(ledger.items()[0].line_total(), "59.97");

    ledger.update_item(1, ItemField::Quantity, "4");
    assert_eq!(ledger.items()[0].line_total(), "79.96");

    ledger.update_item(1, ItemField::UnitPrice, "");
    assert_eq!(ledger.items()[0].line_total(), "0.00");
    assert_eq!(ledger.compute_totals().grand_total_display(), "0.00");
}

#[test]
fn test_unparseable_input_yields_zero_total() {
    let mut ledger = Ledger::default();
    ledger.update_item(1, ItemField::Quantity, "abc");
    ledger.update_item(1, ItemField::UnitPrice, "100");
    assert_eq!(ledger.items()[0].line_total(), "0.00");
    assert_eq!(ledger.items()[0].quantity(), "abc");
}

#[test]
fn test_line_total_rounds_to_two_places() {
    let mut ledger = Ledger::default();
    ledger.update_item(1, ItemField::Quantity, "0.333");
    ledger.update_item(1, ItemField::UnitPrice, "10");
    assert_eq!(ledger.items()[0].line_total(), "3.33");
}

#[test]
fn test_comma_decimal_separator() {
    let mut ledger = Ledger::default();
    ledger.update_item(1, ItemField::Quantity, "1,5");
    ledger.update_item(1, ItemField::UnitPrice, "200");
    assert_eq!(ledger.items()[0].line_total(), "300.00");
}

#[test]
fn test_bulk_add_ten_rows() {
    let mut ledger = Ledger::default();
    ledger.add_items(10);

    let ids: Vec<ItemId> = ledger.items().iter().map(|item| item.id).collect();
    assert_eq!(ids, (1..=11).collect::<Vec<_>>());
}

#[test]
fn test_ids_are_unique_after_deletions() {
    let mut ledger = Ledger::default();
    ledger.add_items(4);
    ledger.delete_item(3);
    ledger.delete_item(1);
    ledger.add_items(2);

    let mut ids: Vec<ItemId> = ledger.items().iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![2, 4, 5, 6, 7]);
    ids.dedup();
    assert_eq!(ids.len(), ledger.len());
}

#[test]
fn test_sole_row_cannot_be_deleted() {
    let mut ledger = Ledger::default();
    ledger.add_item();
    ledger.delete_item(1);
    ledger.delete_item(2);

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.items()[0].id, 2);
}

#[test]
fn test_reset_restores_single_blank_row() {
    let mut ledger = StandardRows::ledger(LedgerHeader::new(VatRate::Twenty, VatMode::Added));
    ledger.add_items(10);
    ledger.reset(LedgerHeader::new(VatRate::Ten, VatMode::Included));

    assert_eq!(ledger.len(), 1);
    let item = &ledger.items()[0];
    assert_eq!(item.id, 1);
    assert!(item.is_blank());
    assert_eq!(item.line_total(), "0.00");
    assert_eq!(
        ledger.header(),
        LedgerHeader::new(VatRate::Ten, VatMode::Included)
    );
}
