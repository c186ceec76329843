//! Platform abstraction layer
//!
//! Only the browser needs event plumbing; the native build drives the
//! session directly.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{ListenerHandle, attach_keyboard, attach_touch};
