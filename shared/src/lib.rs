use serde::{Deserialize, Serialize};
use std::fmt;

/// One expense report as stored by the remote API.
///
/// Records coming back from a listing are allowed to be partial, every
/// missing field falls back to its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bill {
    pub id: String,
    /// ISO date (`YYYY-MM-DD`) as entered in the form, or a display string
    /// once the list view has formatted it
    pub date: String,
    pub status: BillStatus,
    /// Expense category, e.g. "Transports"
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    /// VAT amount, kept as typed by the employee
    pub vat: String,
    /// VAT percentage
    pub pct: i64,
    pub commentary: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub email: String,
}

/// Review state of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// Label shown in the bills table
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refused",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        };
        write!(f, "{}", s)
    }
}

/// Response of the upload call: where the receipt now lives and the key of
/// the bill record created alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub file_url: String,
    pub key: String,
}

/// Bill data sent as the body of an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPayload {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: i64,
    pub date: String,
    pub vat: String,
    pub pct: i64,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: BillStatus,
}

impl BillPayload {
    /// Materialize the payload as the bill record identified by `id`
    pub fn into_bill(self, id: &str) -> Bill {
        Bill {
            id: id.to_string(),
            date: self.date,
            status: self.status,
            expense_type: self.expense_type,
            name: self.name,
            amount: self.amount as f64,
            vat: self.vat,
            pct: self.pct,
            commentary: self.commentary,
            file_url: Some(self.file_url),
            file_name: Some(self.file_name),
            email: self.email,
        }
    }
}

/// Update call arguments: `data` holds a JSON-encoded [`BillPayload`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBillRequest {
    pub selector: String,
    pub data: String,
}

/// The logged-in user as persisted in session storage under `user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "type")]
    pub user_type: String,
    pub email: String,
}
