//! One-level undo/redo over journal mutations.
//!
//! Every direct mutation produces a [`Delta`] holding deep before/after
//! snapshots. The [`ActionLog`] keeps at most one delta per direction: a new
//! direct action fills the undo slot and invalidates any pending redo.
//! Undo applies the inverse of the recorded operation through the journal's
//! snapshot methods; redo reapplies the forward operation. Applied snapshots
//! are cloned again, so the log never shares state with the live sequence.

use crate::error::{DaylogError, Result};
use crate::journal::Journal;
use crate::model::Record;
use crate::store::StorageGateway;
use serde::{Deserialize, Serialize};

/// A reversible description of one journal mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Delta {
    Add { after: Record },
    Update { before: Record, after: Record },
    Delete { before: Record },
}

/// Serializable so a short-lived caller (the CLI) can park it between
/// invocations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ActionLog {
    undo_slot: Option<Delta>,
    redo_slot: Option<Delta>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a direct mutation. Clears any pending redo: history is
    /// single-level, and a new action makes the old future unreachable.
    pub fn record(&mut self, delta: Delta) {
        self.undo_slot = Some(delta);
        self.redo_slot = None;
    }

    pub fn can_undo(&self) -> bool {
        self.undo_slot.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.redo_slot.is_some()
    }

    /// Revert the last recorded mutation. On success the delta moves to the
    /// redo slot; on failure (e.g. quota on reinsert) it stays put so the
    /// caller can retry.
    pub fn undo<G: StorageGateway>(&mut self, journal: &mut Journal<G>) -> Result<()> {
        let delta = self.undo_slot.clone().ok_or(DaylogError::NothingToUndo)?;
        match &delta {
            Delta::Add { after } => {
                journal.remove_snapshot(&after.id)?;
            }
            Delta::Update { before, .. } => {
                journal.restore_snapshot(before.clone())?;
            }
            Delta::Delete { before } => {
                journal.insert_snapshot(before.clone())?;
            }
        }
        self.redo_slot = Some(delta);
        self.undo_slot = None;
        Ok(())
    }

    /// Reapply the last undone mutation, moving the delta back to the undo
    /// slot.
    pub fn redo<G: StorageGateway>(&mut self, journal: &mut Journal<G>) -> Result<()> {
        let delta = self.redo_slot.clone().ok_or(DaylogError::NothingToRedo)?;
        match &delta {
            Delta::Add { after } => {
                journal.insert_snapshot(after.clone())?;
            }
            Delta::Update { after, .. } => {
                journal.restore_snapshot(after.clone())?;
            }
            Delta::Delete { before } => {
                journal.remove_snapshot(&before.id)?;
            }
        }
        self.undo_slot = Some(delta);
        self.redo_slot = None;
        Ok(())
    }
}
