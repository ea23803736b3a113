use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ReplyStoreError {
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write reply file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read reply file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize reply: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize reply: {0}")]
    Deserialization(serde_json::Error),
    #[error("reply {0} not found")]
    NotFound(Uuid),
}

pub type StoreResult<T> = std::result::Result<T, ReplyStoreError>;
