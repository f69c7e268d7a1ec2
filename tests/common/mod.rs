//! Common test helpers shared across the integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;

use keepers_query::{Document, FetchOutcome, Fetcher, KeepersError};

/// Reads a portal response from `tests/data`.
pub fn fixture_text(name: &str) -> String {
    fs::read_to_string(format!("tests/data/{name}")).expect("Could not open test file")
}

/// Parses a portal response from `tests/data`.
#[allow(dead_code)]
pub fn fixture_document(name: &str) -> Document {
    Document::from_json_str(&fixture_text(name)).expect("Fixture is not a portal document")
}

/// A successful fetch of a fixture.
#[allow(dead_code)]
pub fn fixture_outcome(name: &str) -> FetchOutcome {
    let raw = fixture_text(name);
    FetchOutcome::Success {
        document: serde_json::from_str(&raw).expect("Fixture is not JSON"),
        raw,
    }
}

/// Fetcher replaying canned outcomes and remembering what was asked for.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    outcomes: RefCell<VecDeque<FetchOutcome>>,
    requested: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedFetcher {
    /// Replays `outcomes` in order; further requests get a 500.
    pub fn new(outcomes: Vec<FetchOutcome>) -> Self {
        ScriptedFetcher {
            outcomes: RefCell::new(outcomes.into()),
            requested: RefCell::new(Vec::new()),
        }
    }

    /// ISSNs fetched so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch(&self, issn: &str) -> Result<FetchOutcome, KeepersError> {
        self.requested.borrow_mut().push(issn.to_string());
        Ok(self
            .outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(FetchOutcome::HttpError(500)))
    }
}
