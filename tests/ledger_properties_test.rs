// Property-based checks of the work ledger invariants:
// 1. the ledger never holds zero rows
// 2. ids stay unique whatever the add/delete sequence
// 3. a line total does not depend on the order quantity and price were typed
// 4. excluded VAT is always zero

use proptest::prelude::*;
use rust_decimal::Decimal;

use ks_forms::domain::{
    ItemField, ItemId, Ledger, LedgerHeader, VatMode, VatRate, format_money, parse_amount,
};

#[derive(Debug, Clone)]
enum Op {
    Add,
    AddMany(usize),
    Delete(ItemId),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0usize..4).prop_map(Op::AddMany),
        (0u32..16).prop_map(Op::Delete),
    ]
}

fn amount_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100_000, 0u32..100).prop_map(|(units, cents)| format!("{}.{:02}", units, cents)),
        (0u32..1000).prop_map(|units| units.to_string()),
        Just(String::new()),
        Just("abc".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_ledger_never_empty(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut ledger = Ledger::default();
        for op in ops {
            match op {
                Op::Add => { ledger.add_item(); }
                Op::AddMany(n) => { ledger.add_items(n); }
                Op::Delete(id) => ledger.delete_item(id),
            }
            prop_assert!(ledger.len() >= 1);
        }
    }

    #[test]
    fn test_ids_stay_unique(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut ledger = Ledger::default();
        for op in ops {
            match op {
                Op::Add => { ledger.add_item(); }
                Op::AddMany(n) => { ledger.add_items(n); }
                Op::Delete(id) => ledger.delete_item(id),
            }
        }
        let mut ids: Vec<ItemId> = ledger.items().iter().map(|item| item.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), ledger.len());
    }

    #[test]
    fn test_line_total_is_order_independent(quantity in amount_text(), price in amount_text()) {
        let mut forward = Ledger::default();
        forward.update_item(1, ItemField::Quantity, quantity.clone());
        forward.update_item(1, ItemField::UnitPrice, price.clone());

        let mut backward = Ledger::default();
        backward.update_item(1, ItemField::UnitPrice, price.clone());
        backward.update_item(1, ItemField::Quantity, quantity.clone());

        let expected = format_money(parse_amount(&quantity) * parse_amount(&price));
        prop_assert_eq!(forward.items()[0].line_total(), expected.as_str());
        prop_assert_eq!(backward.items()[0].line_total(), expected.as_str());
    }

    #[test]
    fn test_excluded_vat_is_zero(
        prices in prop::collection::vec(amount_text(), 1..8),
        rate_idx in 0usize..4,
    ) {
        let rate = VatRate::all()[rate_idx];
        let mut ledger = Ledger::new(LedgerHeader::new(rate, VatMode::Excluded));
        for (index, price) in prices.into_iter().enumerate() {
            let id = if index == 0 { 1 } else { ledger.add_item() };
            ledger.update_item(id, ItemField::Quantity, "1");
            ledger.update_item(id, ItemField::UnitPrice, price);
        }
        prop_assert_eq!(ledger.compute_totals().vat_amount, Decimal::ZERO);
    }

    #[test]
    fn test_added_vat_matches_rate(units in 0u32..1_000_000, rate_idx in 0usize..4) {
        let rate = VatRate::all()[rate_idx];
        let mut ledger = Ledger::new(LedgerHeader::new(rate, VatMode::Added));
        ledger.update_item(1, ItemField::Quantity, "1");
        ledger.update_item(1, ItemField::UnitPrice, units.to_string());

        let totals = ledger.compute_totals();
        prop_assert_eq!(totals.vat_amount, Decimal::from(units) * rate.fraction());
    }
}
