mod document;
mod ledger;
mod line_item;
mod money;
mod vat;

pub use document::*;
pub use ledger::*;
pub use line_item::*;
pub use money::*;
pub use vat::*;
