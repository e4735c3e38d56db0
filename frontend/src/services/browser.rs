//! Browser adapters: `localStorage`, `window.alert` and hash navigation.

use gloo::storage::{LocalStorage, Storage};
use log::warn;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use super::api::HttpStore;
use super::navigation::Navigator;
use super::session::{KeyValueStorage, SessionProvider, StorageSession};
use crate::config::ClientConfig;
use crate::controllers::{BillsController, ControllerContext, NewBillController};
use crate::ui::{event_channel, Dialogs, EventSender, NewBillDocument};

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::raw().set_item(key, value) {
            warn!(target: "session", "Failed to write {} to localStorage: {:?}", key, e);
        }
    }

    fn remove_item(&self, key: &str) {
        if let Err(e) = LocalStorage::raw().remove_item(key) {
            warn!(target: "session", "Failed to remove {} from localStorage: {:?}", key, e);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowDialogs;

impl Dialogs for WindowDialogs {
    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn show_receipt(&self, url: &str, file_name: &str) {
        let opened = web_sys::window()
            .map(|window| window.open_with_url_and_target(url, "_blank"));
        if !matches!(opened, Some(Ok(Some(_)))) {
            warn!(target: "bills", "Could not open receipt preview {} ({})", file_name, url);
        }
    }
}

/// Navigates by rewriting `window.location`: hash routes only change the
/// fragment, anything else is a full page load
#[derive(Debug, Clone, Copy, Default)]
pub struct HashNavigator;

impl Navigator for HashNavigator {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            warn!("No window to navigate to {}", path);
            return;
        };
        let location = window.location();
        let result = if path.starts_with('#') {
            location.set_hash(path)
        } else {
            location.assign(path)
        };
        if let Err(e) = result {
            warn!("Navigation to {} failed: {:?}", path, e);
        }
    }
}

/// Context backed by the HTTP API, `localStorage`, `window.alert` and hash
/// navigation
pub fn browser_context(config: ClientConfig) -> ControllerContext {
    let session: Rc<dyn SessionProvider> = Rc::new(StorageSession::new(BrowserStorage));
    let store = HttpStore::new(config.api_base_url.clone(), session.clone());
    ControllerContext {
        store: Some(Rc::new(store)),
        navigator: Rc::new(HashNavigator),
        session,
        dialogs: Rc::new(WindowDialogs),
        config,
    }
}

/// Start the bills page controller; the view reports clicks on the returned sender
pub fn mount_bills(context: ControllerContext) -> EventSender {
    let (sender, mut queue) = event_channel();
    spawn_local(async move {
        BillsController::new(context).run(&mut queue).await;
    });
    sender
}

/// Start the new bill controller for a rendered form
pub fn mount_new_bill(context: ControllerContext, document: Rc<dyn NewBillDocument>) -> EventSender {
    let (sender, mut queue) = event_channel();
    spawn_local(async move {
        NewBillController::new(context, document).run(&mut queue).await;
    });
    sender
}
