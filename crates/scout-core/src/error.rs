use thiserror::Error;

pub type Result<T> = std::result::Result<T, BriefError>;

#[derive(Debug, Error)]
pub enum BriefError {
    /// The upstream call outlived its wall-clock budget. The abandoned
    /// request future is dropped, not cancelled at the protocol level —
    /// this is a best-effort bound on waiting, not a hard resource cap.
    #[error("Upstream call timed out after {seconds}s")]
    UpstreamTimeout { seconds: u64 },

    #[error("Upstream transport failure: {0}")]
    UpstreamTransport(String),

    /// The model replied, but the reply did not contain a document the
    /// normalizer accepts. Distinct from timeout and transport failure
    /// so callers can discriminate the three.
    #[error("Invalid upstream response: {0}")]
    InvalidUpstreamResponse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::Error),

    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Storage operation error: {0}")]
    StorageOperation(#[from] redb::StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Document serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
