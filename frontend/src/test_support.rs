//! Fakes shared by the controller tests.

use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};
use shared::{Bill, BillStatus, SessionUser, UpdateBillRequest, UploadResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::ClientConfig;
use crate::controllers::ControllerContext;
use crate::services::navigation::Navigator;
use crate::services::session::{MemoryStorage, StorageSession};
use crate::services::store::{BillsStore, StoreError, StoreResult, UploadRequest};
use crate::ui::{Dialogs, FormField, NewBillDocument, SelectedFile};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Keeps every record on the thread that emitted it, so parallel tests
/// only ever see their own logs
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = format!("[{}] {}", record.target(), record.args());
            RECORDS.with(|records| records.borrow_mut().push((record.level(), line)));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger;

/// Install the capturing logger (once per process) and forget whatever this
/// thread logged so far
pub fn capture_logs() {
    let _ = log::set_logger(&CAPTURE);
    log::set_max_level(LevelFilter::Debug);
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// `error!` lines logged on this thread since the last [`capture_logs`]
pub fn error_logs() -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, line)| line.clone())
            .collect()
    })
}

pub fn bill(id: &str, date: &str) -> Bill {
    Bill {
        id: id.to_string(),
        date: date.to_string(),
        status: BillStatus::Pending,
        ..Bill::default()
    }
}

fn http_error(status: u16) -> StoreError {
    StoreError::Http {
        status,
        message: format!("Erreur {}", status),
    }
}

/// Store that records every call and answers with canned data
#[derive(Default)]
pub struct FakeStore {
    bills: Vec<Bill>,
    upload: Option<UploadResult>,
    list_calls: Cell<usize>,
    list_failure: Cell<Option<u16>>,
    create_failure: Cell<Option<u16>>,
    update_failure: Cell<Option<u16>>,
    create_calls: RefCell<Vec<UploadRequest>>,
    update_calls: RefCell<Vec<UpdateBillRequest>>,
}

impl FakeStore {
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn create_calls(&self) -> Vec<UploadRequest> {
        self.create_calls.borrow().clone()
    }

    pub fn update_calls(&self) -> Vec<UpdateBillRequest> {
        self.update_calls.borrow().clone()
    }

    pub fn fail_list_with(&self, status: u16) {
        self.list_failure.set(Some(status));
    }

    pub fn fail_create_with(&self, status: u16) {
        self.create_failure.set(Some(status));
    }

    pub fn fail_update_with(&self, status: u16) {
        self.update_failure.set(Some(status));
    }

    pub fn clear_update_failure(&self) {
        self.update_failure.set(None);
    }
}

#[async_trait(?Send)]
impl BillsStore for FakeStore {
    async fn list(&self) -> StoreResult<Vec<Bill>> {
        self.list_calls.set(self.list_calls.get() + 1);
        match self.list_failure.get() {
            Some(status) => Err(http_error(status)),
            None => Ok(self.bills.clone()),
        }
    }

    async fn create(&self, request: UploadRequest) -> StoreResult<UploadResult> {
        self.create_calls.borrow_mut().push(request);
        if let Some(status) = self.create_failure.get() {
            return Err(http_error(status));
        }
        self.upload
            .clone()
            .ok_or_else(|| StoreError::Network("no upload configured".to_string()))
    }

    async fn update(&self, request: UpdateBillRequest) -> StoreResult<()> {
        self.update_calls.borrow_mut().push(request);
        match self.update_failure.get() {
            Some(status) => Err(http_error(status)),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_string());
    }
}

#[derive(Default)]
pub struct RecordingDialogs {
    alerts: RefCell<Vec<String>>,
    previews: RefCell<Vec<(String, String)>>,
}

impl RecordingDialogs {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    /// `(url, file name)` of every opened preview
    pub fn previews(&self) -> Vec<(String, String)> {
        self.previews.borrow().clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn show_receipt(&self, url: &str, file_name: &str) {
        self.previews
            .borrow_mut()
            .push((url.to_string(), file_name.to_string()));
    }
}

/// The new bill form as plain values
#[derive(Default)]
pub struct FakeDocument {
    fields: RefCell<HashMap<FormField, String>>,
    file: RefCell<Option<SelectedFile>>,
}

impl FakeDocument {
    pub fn set_field(&self, field: FormField, value: &str) {
        self.fields.borrow_mut().insert(field, value.to_string());
    }

    pub fn select_file(&self, file: SelectedFile) {
        *self.file.borrow_mut() = Some(file);
    }

    /// What the file input would display
    pub fn file_input_value(&self) -> String {
        self.file
            .borrow()
            .as_ref()
            .map(|f| format!("C:\\fakepath\\{}", f.file_name()))
            .unwrap_or_default()
    }
}

impl NewBillDocument for FakeDocument {
    fn field_value(&self, field: FormField) -> String {
        self.fields.borrow().get(&field).cloned().unwrap_or_default()
    }

    fn selected_file(&self) -> Option<SelectedFile> {
        self.file.borrow().clone()
    }

    fn clear_file_input(&self) {
        *self.file.borrow_mut() = None;
    }
}

/// Wires fakes into a [`ControllerContext`] with `a@a` logged in as an employee
pub struct TestHarness {
    pub store: Rc<FakeStore>,
    pub navigator: Rc<RecordingNavigator>,
    pub dialogs: Rc<RecordingDialogs>,
    pub document: Rc<FakeDocument>,
    pub session: Rc<StorageSession<MemoryStorage>>,
    use_store: bool,
}

impl TestHarness {
    fn build(store: FakeStore, use_store: bool) -> Self {
        capture_logs();
        let session = StorageSession::new(MemoryStorage::new());
        session
            .log_in(&SessionUser {
                user_type: "Employee".to_string(),
                email: "a@a".to_string(),
            })
            .expect("session user serializes");

        Self {
            store: Rc::new(store),
            navigator: Rc::new(RecordingNavigator::default()),
            dialogs: Rc::new(RecordingDialogs::default()),
            document: Rc::new(FakeDocument::default()),
            session: Rc::new(session),
            use_store,
        }
    }

    pub fn without_store() -> Self {
        Self::build(FakeStore::default(), false)
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self::build(
            FakeStore {
                bills,
                ..FakeStore::default()
            },
            true,
        )
    }

    pub fn with_upload(file_url: &str, key: &str) -> Self {
        Self::build(
            FakeStore {
                upload: Some(UploadResult {
                    file_url: file_url.to_string(),
                    key: key.to_string(),
                }),
                ..FakeStore::default()
            },
            true,
        )
    }

    pub fn log_out(&self) {
        self.session.log_out();
    }

    pub fn context(&self) -> ControllerContext {
        let store: Option<Rc<dyn BillsStore>> = if self.use_store {
            Some(self.store.clone())
        } else {
            None
        };
        ControllerContext {
            store,
            navigator: self.navigator.clone(),
            session: self.session.clone(),
            dialogs: self.dialogs.clone(),
            config: ClientConfig::default(),
        }
    }
}
