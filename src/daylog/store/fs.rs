use super::{check_quota, decode_records, encode_records, StorageGateway};
use crate::error::{DaylogError, Result};
use crate::model::Record;
use std::fs;
use std::path::PathBuf;

/// Versioned slot file name; the on-disk analogue of a storage key.
const SLOT_FILENAME: &str = "daylog.v1.json";

/// File-backed slot: the whole sequence lives in one JSON file inside the
/// data directory.
pub struct FileGateway {
    root: PathBuf,
    quota: Option<u64>,
}

impl FileGateway {
    pub fn new(root: PathBuf) -> Self {
        Self { root, quota: None }
    }

    /// Refuse saves whose serialized form exceeds `bytes`.
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn slot_path(&self) -> PathBuf {
        self.root.join(SLOT_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DaylogError::Io)?;
        }
        Ok(())
    }
}

impl StorageGateway for FileGateway {
    fn save(&mut self, records: &[Record]) -> Result<()> {
        let encoded = encode_records(records)?;
        check_quota(encoded.len(), self.quota)?;
        self.ensure_dir()?;
        fs::write(self.slot_path(), encoded).map_err(DaylogError::Io)?;
        Ok(())
    }

    fn load(&self) -> Vec<Record> {
        match fs::read_to_string(self.slot_path()) {
            Ok(text) => decode_records(&text),
            Err(_) => Vec::new(),
        }
    }
}

/// Default storage root: the platform data dir, creatable lazily by `save`.
pub fn default_root() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "daylog").map(|d| d.data_dir().to_path_buf())
}
