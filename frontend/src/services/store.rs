//! # Store Abstraction
//!
//! The remote bills API as seen by the controllers. Implementations can talk
//! HTTP (`services::api::HttpStore`, browser only) or keep
//! everything in memory ([`crate::services::memory_store::MemoryStore`]).

use async_trait::async_trait;
use shared::{Bill, UpdateBillRequest, UploadResult};
use thiserror::Error;

use crate::ui::document::SelectedFile;

/// Arguments of the upload call
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub file: SelectedFile,
    /// Email of the employee the receipt belongs to
    pub email: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Server error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to serialize request: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("No bill found for selector {0}")]
    UnknownSelector(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote persistence for bills
///
/// Futures are not required to be `Send`: the client is single-threaded and
/// browser fetch futures are not thread-safe.
#[async_trait(?Send)]
pub trait BillsStore {
    /// All bills visible to the current user, in server order
    async fn list(&self) -> StoreResult<Vec<Bill>>;

    /// Upload a receipt; the server creates a bill record and returns its key
    async fn create(&self, request: UploadRequest) -> StoreResult<UploadResult>;

    /// Replace the data of the bill identified by `request.selector`
    async fn update(&self, request: UpdateBillRequest) -> StoreResult<()>;
}
