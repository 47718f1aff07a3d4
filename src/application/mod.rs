// Application layer - the boundary between the ledger and its presentation.
// The tracker owns the ledger, turns raw form input into validated adds and
// drives the render callback after every change.

pub mod error;
pub mod tracker;

pub use error::*;
pub use tracker::*;
