use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use shelfwise_discounts::{DiscountRunLedger, DiscountSource, PersistenceError};

/// Process-local run ledger. Forgets everything on restart.
#[derive(Debug, Default)]
pub struct InMemoryRunLedger {
    runs: RwLock<HashMap<DiscountSource, NaiveDate>>,
}

impl InMemoryRunLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiscountRunLedger for InMemoryRunLedger {
    fn last_applied(&self, source: DiscountSource) -> Result<Option<NaiveDate>, PersistenceError> {
        let runs = self
            .runs
            .read()
            .map_err(|_| PersistenceError::storage("ledger lock poisoned"))?;
        Ok(runs.get(&source).copied())
    }

    fn mark_applied(&self, source: DiscountSource, date: NaiveDate) -> Result<(), PersistenceError> {
        let mut runs = self
            .runs
            .write()
            .map_err(|_| PersistenceError::storage("ledger lock poisoned"))?;
        runs.insert(source, date);
        Ok(())
    }
}
