// Application layer - form session orchestration on top of the pure ledger.
// Shells (the CLI today) drive a FormSession and hand it to the io
// collaborators for export and estimate upload.

pub mod error;
pub mod session;

pub use error::*;
pub use session::*;
