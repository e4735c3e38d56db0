//! User interactions delivered to the controllers.
//!
//! The view layer translates its own events (DOM listeners, egui responses,
//! test scripts) into [`UiEvent`] values and pushes them through an
//! [`EventSender`]; controllers pull them from the matching [`EventQueue`].

use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// "New bill" button on the bills page
    NewBillClicked,
    /// Eye icon of a bill row; carries the row's `data-bill-url`
    IconEyeClicked { bill_url: String },
    /// The receipt input changed
    FileChanged,
    /// The new bill form was submitted
    FormSubmitted,
}

#[async_trait(?Send)]
pub trait EventSource {
    /// Next event, or `None` once the view is gone
    async fn next_event(&mut self) -> Option<UiEvent>;
}

/// Handle used by the view to publish events
#[derive(Clone)]
pub struct EventSender {
    sender: UnboundedSender<UiEvent>,
}

impl EventSender {
    /// Queue an event. Returns false when the consuming controller is gone.
    pub fn emit(&self, event: UiEvent) -> bool {
        self.sender.unbounded_send(event).is_ok()
    }
}

/// Receiving end of [`event_channel`]
pub struct EventQueue {
    receiver: UnboundedReceiver<UiEvent>,
}

#[async_trait(?Send)]
impl EventSource for EventQueue {
    async fn next_event(&mut self) -> Option<UiEvent> {
        self.receiver.next().await
    }
}

/// Create a connected sender/queue pair. The queue ends when every sender has
/// been dropped.
pub fn event_channel() -> (EventSender, EventQueue) {
    let (sender, receiver) = mpsc::unbounded();
    (EventSender { sender }, EventQueue { receiver })
}
