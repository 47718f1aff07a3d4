// Shared by every integration test binary; each one uses only some helpers.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use spendlog::application::ExpenseTracker;
use spendlog::cli::Session;
use spendlog::io::TableRenderer;

pub type TestTracker = ExpenseTracker<TableRenderer<Vec<u8>>>;

/// Tracker rendering tables into memory
pub fn test_tracker() -> TestTracker {
    ExpenseTracker::new(TableRenderer::new(Vec::new(), "$")).unwrap()
}

/// Everything the tracker's renderer has written so far
pub fn rendered(tracker: &TestTracker) -> String {
    String::from_utf8(tracker.renderer().get_ref().clone()).unwrap()
}

/// Helper to parse an RFC 3339 timestamp
pub fn at(timestamp: &str) -> DateTime<Utc> {
    timestamp.parse().unwrap()
}

/// Run a whole session over `input`, returning the session for inspection
pub fn run_session(input: &str) -> Session<TableRenderer<Vec<u8>>, &[u8], Vec<u8>> {
    let mut session = Session::new(test_tracker(), input.as_bytes(), Vec::new(), "$");
    session.run().unwrap();
    session
}

/// Messages printed by a session (not including rendered tables)
pub fn messages<R: spendlog::Render>(session: &Session<R, &[u8], Vec<u8>>) -> String {
    String::from_utf8(session.output().clone()).unwrap()
}
