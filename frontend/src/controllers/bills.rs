use log::{debug, error, info};
use shared::Bill;

use super::ControllerContext;
use crate::services::date_utils::format_date_or_raw;
use crate::services::navigation::Route;
use crate::services::store::StoreError;
use crate::ui::{EventSource, UiEvent};

/// Logic behind the employee bills list
pub struct BillsController {
    context: ControllerContext,
}

impl BillsController {
    pub fn new(context: ControllerContext) -> Self {
        Self { context }
    }

    /// Fetch the bills with dates formatted for display.
    ///
    /// Dates that do not parse are passed through untouched; order and every
    /// other field are left as the store returned them.
    pub async fn get_bills(&self) -> Result<Vec<Bill>, StoreError> {
        let Some(store) = &self.context.store else {
            debug!(target: "bills", "No store configured, showing an empty list");
            return Ok(Vec::new());
        };

        let bills = match store.list().await {
            Ok(bills) => bills,
            Err(e) => {
                error!(target: "bills", "Failed to fetch bills: {}", e);
                return Err(e);
            }
        };

        Ok(bills
            .into_iter()
            .map(|bill| Bill {
                date: format_date_or_raw(&bill.date),
                ..bill
            })
            .collect())
    }

    pub fn handle_click_new_bill(&self) {
        self.context.navigator.navigate(Route::NewBill.path());
    }

    /// Open the receipt preview for the clicked bill row
    pub fn handle_click_icon_eye(&self, bill_url: &str) {
        let file_name = receipt_file_name(bill_url);
        info!(target: "bills", "Previewing receipt {} ({})", file_name, bill_url);
        self.context.dialogs.show_receipt(bill_url, file_name);
    }

    pub fn handle_event(&self, event: &UiEvent) {
        match event {
            UiEvent::NewBillClicked => self.handle_click_new_bill(),
            UiEvent::IconEyeClicked { bill_url } => self.handle_click_icon_eye(bill_url),
            other => debug!(target: "bills", "Ignoring {:?} on the bills page", other),
        }
    }

    /// Handle events until the source is exhausted
    pub async fn run<E: EventSource + ?Sized>(&self, events: &mut E) {
        while let Some(event) = events.next_event().await {
            self.handle_event(&event);
        }
    }
}

/// Last path segment of a receipt URL, without query or fragment
fn receipt_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}
