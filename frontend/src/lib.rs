//! # Billed frontend
//!
//! Employee-side logic of the Billed expense report application: the bills
//! list and the new bill form. Views render whatever they like and forward
//! user interactions as [`ui::UiEvent`]s; the controllers own the workflow
//! and reach the outside world only through injected collaborators:
//!
//! - [`services::store::BillsStore`] for persistence
//! - [`services::navigation::Navigator`] for page changes
//! - [`services::session::SessionProvider`] for the logged-in user
//! - [`ui::Dialogs`] and [`ui::NewBillDocument`] for the page itself
//!
//! In the browser build, `services::api::HttpStore` and the adapters in
//! `services::browser` provide the real implementations.

pub mod config;
pub mod controllers;
pub mod services;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use config::ClientConfig;
pub use controllers::{BillsController, ControllerContext, NewBillController};
