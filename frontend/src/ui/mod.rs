pub mod document;
pub mod events;

pub use document::{Dialogs, FormField, NewBillDocument, SelectedFile};
pub use events::{event_channel, EventQueue, EventSender, EventSource, UiEvent};
