pub mod date_utils;
pub mod logging;
pub mod memory_store;
pub mod navigation;
pub mod session;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod browser;
