//! # Controllers
//!
//! Page logic for the employee side of the application. A controller reads
//! the state of its page through the `ui` abstractions, talks to the store,
//! and decides where to navigate. Rendering is left to the host.

pub mod bills;
pub mod new_bill;

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::services::memory_store::MemoryStore;
use crate::services::navigation::Navigator;
use crate::services::session::SessionProvider;
use crate::services::store::BillsStore;
use crate::ui::Dialogs;

pub use bills::BillsController;
pub use new_bill::{FileOutcome, NewBillController, NewBillError, NewBillState, SubmitOutcome};

/// Collaborators shared by every controller
#[derive(Clone)]
pub struct ControllerContext {
    /// Remote store; `None` runs the pages without persistence
    pub store: Option<Rc<dyn BillsStore>>,
    pub navigator: Rc<dyn Navigator>,
    pub session: Rc<dyn SessionProvider>,
    pub dialogs: Rc<dyn Dialogs>,
    pub config: ClientConfig,
}

impl ControllerContext {
    /// Context persisting into a [`MemoryStore`] whose receipts live under
    /// `config.file_base_url`
    pub fn in_memory(
        config: ClientConfig,
        session: Rc<dyn SessionProvider>,
        navigator: Rc<dyn Navigator>,
        dialogs: Rc<dyn Dialogs>,
    ) -> Self {
        let store = MemoryStore::new(config.file_base_url.clone());
        Self {
            store: Some(Rc::new(store)),
            navigator,
            session,
            dialogs,
            config,
        }
    }
}
