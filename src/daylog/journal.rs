//! The canonical record sequence and its mutation contract.
//!
//! A [`Journal`] owns the live records, keeps them sorted by descending date
//! (stable, so equal dates stay in insertion order), and treats every
//! mutation as one atomic step: normalize, mutate in memory, persist. If the
//! gateway rejects the save the in-memory change is rolled back, so the
//! sequence never diverges from what was last persisted.

use crate::error::{DaylogError, Result};
use crate::history::Delta;
use crate::model::Record;
use crate::normalize;
use crate::store::StorageGateway;
use serde_json::Value;

pub struct Journal<G: StorageGateway> {
    gateway: G,
    records: Vec<Record>,
}

impl<G: StorageGateway> Journal<G> {
    /// Open the journal, loading whatever the gateway holds. Corrupt or
    /// missing data is an empty journal, never an error.
    pub fn open(gateway: G) -> Self {
        let mut journal = Self {
            records: gateway.load(),
            gateway,
        };
        journal.sort();
        journal
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalize arbitrary structured input and insert it.
    pub fn add(&mut self, raw: &Value) -> Result<Delta> {
        let record = normalize::normalize(raw)
            .ok_or_else(|| DaylogError::validation("record", "not a structured object"))?;
        self.create(record)
    }

    /// Insert an already-canonical record.
    pub fn create(&mut self, record: Record) -> Result<Delta> {
        if self.find(&record.id).is_some() {
            return Err(DaylogError::DuplicateId(record.id));
        }
        let checkpoint = self.records.clone();
        self.records.push(record.clone());
        self.commit(checkpoint)?;
        Ok(Delta::Add { after: record })
    }

    /// Full-replace the record with the given id from arbitrary input.
    pub fn update(&mut self, id: &str, raw: &Value) -> Result<Delta> {
        let mut record = normalize::normalize(raw)
            .ok_or_else(|| DaylogError::validation("record", "not a structured object"))?;
        record.id = id.to_string();
        self.replace(id, record)
    }

    /// Full-replace with an already-canonical record; its id is forced to `id`.
    pub fn replace(&mut self, id: &str, mut record: Record) -> Result<Delta> {
        let idx = self.index_of(id)?;
        record.id = id.to_string();
        let before = self.records[idx].clone();
        let checkpoint = self.records.clone();
        self.records[idx] = record.clone();
        self.commit(checkpoint)?;
        Ok(Delta::Update {
            before,
            after: record,
        })
    }

    pub fn remove(&mut self, id: &str) -> Result<Delta> {
        let idx = self.index_of(id)?;
        let checkpoint = self.records.clone();
        let before = self.records.remove(idx);
        self.commit(checkpoint)?;
        Ok(Delta::Delete { before })
    }

    /// Insert a batch in one persisted step. Callers are expected to have
    /// weeded out duplicate ids; the whole batch rolls back on failure.
    pub fn insert_batch(&mut self, records: Vec<Record>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let checkpoint = self.records.clone();
        self.records.extend(records);
        self.commit(checkpoint)
    }

    // --- Snapshot operations (undo/redo re-application; no delta emitted) ---

    /// Reinsert a logged snapshot verbatim.
    pub fn insert_snapshot(&mut self, record: Record) -> Result<()> {
        if self.find(&record.id).is_some() {
            return Err(DaylogError::DuplicateId(record.id));
        }
        let checkpoint = self.records.clone();
        self.records.push(record);
        self.commit(checkpoint)
    }

    /// Overwrite the live record with a logged snapshot of the same id.
    pub fn restore_snapshot(&mut self, record: Record) -> Result<()> {
        let idx = self.index_of(&record.id)?;
        let checkpoint = self.records.clone();
        self.records[idx] = record;
        self.commit(checkpoint)
    }

    /// Remove by id, handing the removed record back.
    pub fn remove_snapshot(&mut self, id: &str) -> Result<Record> {
        let idx = self.index_of(id)?;
        let checkpoint = self.records.clone();
        let removed = self.records.remove(idx);
        match self.gateway.save(&self.records) {
            Ok(()) => Ok(removed),
            Err(err) => {
                self.records = checkpoint;
                Err(err)
            }
        }
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| DaylogError::RecordNotFound(id.to_string()))
    }

    /// Re-sort and persist; restore the checkpoint if the gateway refuses.
    fn commit(&mut self, checkpoint: Vec<Record>) -> Result<()> {
        self.sort();
        match self.gateway.save(&self.records) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.records = checkpoint;
                Err(err)
            }
        }
    }

    fn sort(&mut self) {
        // Stable: equal dates keep their relative insertion order.
        self.records.sort_by(|a, b| b.date.cmp(&a.date));
    }
}
