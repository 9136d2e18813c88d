use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaylogError {
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("A record with id {0} already exists")]
    DuplicateId(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Storage quota exceeded: {need} bytes needed, {quota} available")]
    StorageQuotaExceeded { need: u64, quota: u64 },

    #[error("Invalid import format: {0}")]
    ImportFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DaylogError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DaylogError>;
