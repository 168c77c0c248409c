mod export;
mod upload;

pub use export::*;
pub use upload::*;
