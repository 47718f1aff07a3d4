mod category;
mod dates;
mod expense;
mod ledger;
mod money;

pub use category::*;
pub use dates::*;
pub use expense::*;
pub use ledger::*;
pub use money::*;
