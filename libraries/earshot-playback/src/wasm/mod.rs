//! WASM bindings for earshot-playback
//!
//! Exposes [`PlayerController`](crate::PlayerController) to web pages, with
//! one `<audio>` element per bound item.

/// Warn through `tracing` and on the browser console
///
/// Nothing installs a `tracing` subscriber in the page, so the console is
/// where these actually show up.
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        tracing::warn!("{}", message);
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&message));
    }};
}

mod audio;
mod controller;

pub use controller::WasmPlayerController;
