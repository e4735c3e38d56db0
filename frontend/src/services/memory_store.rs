//! In-process [`BillsStore`], for running the client without a server.

use async_trait::async_trait;
use log::{debug, info};
use shared::{Bill, BillPayload, UpdateBillRequest, UploadResult};
use std::cell::RefCell;
use uuid::Uuid;

use super::store::{BillsStore, StoreError, StoreResult, UploadRequest};

pub struct MemoryStore {
    file_base_url: String,
    bills: RefCell<Vec<Bill>>,
}

impl MemoryStore {
    pub fn new(file_base_url: impl Into<String>) -> Self {
        Self::with_bills(file_base_url, Vec::new())
    }

    pub fn with_bills(file_base_url: impl Into<String>, bills: Vec<Bill>) -> Self {
        Self {
            file_base_url: file_base_url.into().trim_end_matches('/').to_string(),
            bills: RefCell::new(bills),
        }
    }

    /// Snapshot of every stored bill
    pub fn bills(&self) -> Vec<Bill> {
        self.bills.borrow().clone()
    }
}

#[async_trait(?Send)]
impl BillsStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Bill>> {
        Ok(self.bills())
    }

    async fn create(&self, request: UploadRequest) -> StoreResult<UploadResult> {
        let key = Uuid::new_v4().to_string();
        let file_url = format!("{}/{}/{}", self.file_base_url, key, request.file.file_name());

        // The server creates the record on upload; its data arrives with the update
        self.bills.borrow_mut().push(Bill {
            id: key.clone(),
            email: request.email,
            file_url: Some(file_url.clone()),
            file_name: Some(request.file.file_name().to_string()),
            ..Bill::default()
        });
        info!(target: "store", "Stored receipt {} as bill {}", request.file.file_name(), key);

        Ok(UploadResult { file_url, key })
    }

    async fn update(&self, request: UpdateBillRequest) -> StoreResult<()> {
        let payload: BillPayload = serde_json::from_str(&request.data)?;
        let mut bills = self.bills.borrow_mut();
        let slot = bills
            .iter_mut()
            .find(|bill| bill.id == request.selector)
            .ok_or_else(|| StoreError::UnknownSelector(request.selector.clone()))?;
        *slot = payload.into_bill(&request.selector);
        debug!(target: "store", "Updated bill {}", request.selector);
        Ok(())
    }
}
