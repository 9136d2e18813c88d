use super::{check_quota, decode_records, encode_records, StorageGateway};
use crate::error::Result;
use crate::model::Record;

/// In-memory slot for testing and ephemeral use. Mirrors a bounded
/// browser-storage slot when given a capacity.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    slot: Option<String>,
    capacity: Option<u64>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the slot at `bytes` of serialized data; `save` beyond that fails
    /// with a quota error.
    pub fn with_capacity(bytes: u64) -> Self {
        Self {
            slot: None,
            capacity: Some(bytes),
        }
    }

    /// Raw slot contents, for tests that poke at the stored text.
    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Overwrite the raw slot contents, bypassing serialization.
    pub fn set_raw(&mut self, text: impl Into<String>) {
        self.slot = Some(text.into());
    }
}

impl StorageGateway for MemoryGateway {
    fn save(&mut self, records: &[Record]) -> Result<()> {
        let encoded = encode_records(records)?;
        check_quota(encoded.len(), self.capacity)?;
        self.slot = Some(encoded);
        Ok(())
    }

    fn load(&self) -> Vec<Record> {
        match &self.slot {
            Some(text) => decode_records(text),
            None => Vec::new(),
        }
    }
}
