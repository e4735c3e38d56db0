//! New bill form: receipt upload on file selection, then bill submission.
//!
//! ```text
//! Idle --valid file, upload ok--> FileReady --submit, update ok--> Done
//!  ^                                  |
//!  +------ invalid file --------------+
//! ```
//!
//! A failed upload or update leaves the state where it was so the employee
//! can try again. Without a store the upload is skipped and submitting goes
//! straight back to the bills list.

use log::{debug, error, info, warn};
use shared::{BillPayload, BillStatus, UpdateBillRequest, UploadResult};
use std::rc::Rc;
use thiserror::Error;

use super::ControllerContext;
use crate::services::navigation::Route;
use crate::services::store::{StoreError, UploadRequest};
use crate::ui::{EventSource, FormField, NewBillDocument, UiEvent};

/// VAT percentage used when the form leaves it empty
const DEFAULT_PCT: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewBillState {
    /// No receipt uploaded yet
    Idle,
    /// Receipt uploaded, bill can be submitted
    FileReady,
    /// Bill submitted and the user sent back to the list
    Done,
}

#[derive(Debug, Error)]
pub enum NewBillError {
    #[error("No file selected")]
    NoFile,
    #[error("Unsupported receipt file: {0}")]
    UnsupportedFile(String),
    #[error("No logged-in user in session")]
    MissingSession,
    #[error("A receipt must be uploaded before the bill is submitted")]
    MissingReceipt,
    #[error("Failed to serialize bill: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of handling a receipt selection
#[derive(Debug)]
pub enum FileOutcome {
    /// The receipt was stored remotely and its identifiers kept
    Uploaded(UploadResult),
    /// The file was refused before any network call
    Rejected(NewBillError),
    /// No store configured, nothing to upload to
    Skipped,
    /// The upload could not be performed
    Failed(NewBillError),
}

/// Result of handling a form submission
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The bill was saved and the user sent back to the list
    Submitted,
    /// No store configured; the user was sent back without saving
    SubmittedWithoutStore,
    /// Nothing was saved and the user stays on the form
    Failed(NewBillError),
}

pub struct NewBillController {
    context: ControllerContext,
    document: Rc<dyn NewBillDocument>,
    state: NewBillState,
    bill_id: Option<String>,
    file_url: Option<String>,
    file_name: Option<String>,
}

impl NewBillController {
    pub fn new(context: ControllerContext, document: Rc<dyn NewBillDocument>) -> Self {
        Self {
            context,
            document,
            state: NewBillState::Idle,
            bill_id: None,
            file_url: None,
            file_name: None,
        }
    }

    pub fn state(&self) -> NewBillState {
        self.state
    }

    /// Key of the bill record created by the upload
    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Validate the selected receipt and upload it right away
    pub async fn handle_change_file(&mut self) -> FileOutcome {
        let Some(file) = self.document.selected_file() else {
            debug!(target: "new_bill", "File input changed without a file");
            return FileOutcome::Rejected(NewBillError::NoFile);
        };
        let file_name = file.file_name().to_string();

        if !self.context.config.accepts_file_name(&file_name) {
            warn!(target: "new_bill", "Rejected receipt {} ({})", file_name, file.mime_type);
            self.context.dialogs.alert(&format!(
                "Seuls les fichiers {} sont acceptés",
                self.context.config.allowed_extensions.join(", ")
            ));
            self.document.clear_file_input();
            self.forget_receipt();
            return FileOutcome::Rejected(NewBillError::UnsupportedFile(file_name));
        }

        let Some(store) = self.context.store.clone() else {
            debug!(target: "new_bill", "No store configured, skipping upload of {}", file_name);
            return FileOutcome::Skipped;
        };
        let Some(user) = self.context.session.current_user() else {
            error!(target: "new_bill", "Cannot upload {}: {}", file_name, NewBillError::MissingSession);
            return FileOutcome::Failed(NewBillError::MissingSession);
        };

        match store.create(UploadRequest { file, email: user.email }).await {
            Ok(result) => {
                info!(target: "new_bill", "Uploaded {} as bill {}", file_name, result.key);
                self.bill_id = Some(result.key.clone());
                self.file_url = Some(result.file_url.clone());
                self.file_name = Some(file_name);
                self.state = NewBillState::FileReady;
                FileOutcome::Uploaded(result)
            }
            Err(e) => {
                error!(target: "new_bill", "Failed to upload {}: {}", file_name, e);
                FileOutcome::Failed(e.into())
            }
        }
    }

    /// Build the bill from the form and persist it
    pub async fn handle_submit(&mut self) -> SubmitOutcome {
        let result = self.persist().await;
        self.on_submit_outcome(result)
    }

    /// Payload for the current form contents, or why it cannot be built
    pub fn build_payload(&self) -> Result<BillPayload, NewBillError> {
        let user = self
            .context
            .session
            .current_user()
            .ok_or(NewBillError::MissingSession)?;
        let (Some(file_url), Some(file_name)) = (&self.file_url, &self.file_name) else {
            return Err(NewBillError::MissingReceipt);
        };
        let field = |f: FormField| self.document.field_value(f);

        Ok(BillPayload {
            email: user.email,
            expense_type: field(FormField::ExpenseType),
            name: field(FormField::ExpenseName),
            amount: parse_int(&field(FormField::Amount)).unwrap_or(0),
            date: field(FormField::Date),
            vat: field(FormField::Vat),
            pct: parse_int(&field(FormField::Pct))
                .filter(|pct| *pct != 0)
                .unwrap_or(DEFAULT_PCT),
            commentary: field(FormField::Commentary),
            file_url: file_url.clone(),
            file_name: file_name.clone(),
            status: BillStatus::Pending,
        })
    }

    async fn persist(&self) -> Result<bool, NewBillError> {
        let Some(store) = &self.context.store else {
            return Ok(false);
        };
        let selector = self.bill_id.clone().ok_or(NewBillError::MissingReceipt)?;
        let payload = self.build_payload()?;
        let data = serde_json::to_string(&payload)?;

        store.update(UpdateBillRequest { selector, data }).await?;
        Ok(true)
    }

    fn on_submit_outcome(&mut self, result: Result<bool, NewBillError>) -> SubmitOutcome {
        match result {
            Ok(saved) => {
                self.state = NewBillState::Done;
                self.context.navigator.navigate(Route::Bills.path());
                if saved {
                    info!(target: "new_bill", "Bill {} submitted", self.bill_id.as_deref().unwrap_or_default());
                    SubmitOutcome::Submitted
                } else {
                    debug!(target: "new_bill", "No store configured, returning to bills");
                    SubmitOutcome::SubmittedWithoutStore
                }
            }
            Err(e) => {
                error!(target: "new_bill", "Failed to submit bill: {}", e);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn forget_receipt(&mut self) {
        self.bill_id = None;
        self.file_url = None;
        self.file_name = None;
        self.state = NewBillState::Idle;
    }

    pub async fn handle_event(&mut self, event: &UiEvent) {
        match event {
            UiEvent::FileChanged => {
                self.handle_change_file().await;
            }
            UiEvent::FormSubmitted => {
                self.handle_submit().await;
            }
            other => debug!(target: "new_bill", "Ignoring {:?} on the new bill page", other),
        }
    }

    /// Handle events until the source is exhausted
    pub async fn run<E: EventSource + ?Sized>(&mut self, events: &mut E) {
        while let Some(event) = events.next_event().await {
            self.handle_event(&event).await;
        }
    }
}

/// Leading integer of `value`, the way form numbers have always been read:
/// `"42"` and `"42.7"` give 42, `"-3 €"` gives -3, `"abc"` gives nothing
fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
