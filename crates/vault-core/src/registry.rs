//! In-memory list of design records for the lifetime of a signed-in session.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::design::{self, DesignRecord};

/// Newest-first record list. Records can only be added.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: VecDeque<DesignRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry starting with the demo records.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            records: design::seed_records(now).into(),
        }
    }

    /// Prepends a record; existing records keep their order.
    pub fn add(&mut self, record: DesignRecord) {
        tracing::debug!(id = %record.id, name = %record.name, "design saved");
        self.records.push_front(record);
    }

    pub fn list(&self) -> impl ExactSizeIterator<Item = &DesignRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DesignRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
