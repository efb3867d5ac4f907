//! WASM-compatible PlayerController wrapper

use super::audio::{Dispatcher, HtmlAudioBackend};
use crate::{PlayableItem, PlaybackError, PlayerConfig, PlayerController};
use js_sys::Function;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Browser-facing player controller
///
/// Wraps [`PlayerController`] with `<audio>`-element sources and a
/// JavaScript-friendly API. Controller events are forwarded to the
/// callback registered with `onEvent`.
#[wasm_bindgen]
pub struct WasmPlayerController {
    inner: Rc<RefCell<PlayerController>>,
    dispatcher: Rc<Dispatcher>,
}

#[wasm_bindgen]
impl WasmPlayerController {
    /// Create a controller; `config` may be omitted for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPlayerController, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            decode(config)?
        };

        let dispatcher = Dispatcher::new();
        let backend = HtmlAudioBackend::new(dispatcher.clone());
        let controller = PlayerController::new(config, Box::new(backend)).map_err(js_error)?;

        let inner = Rc::new(RefCell::new(controller));
        dispatcher.attach(&inner);

        Ok(Self { inner, dispatcher })
    }

    // ===== Selection =====

    /// Play a single item (`{ title, members, url, thumbnail, duration }`)
    pub fn play(&self, item: JsValue) -> Result<(), JsValue> {
        let item: PlayableItem = decode(item)?;
        self.with_controller(|c| c.play(item))?.map_err(js_error)
    }

    /// Replace the queue and start at `index`
    #[wasm_bindgen(js_name = playList)]
    pub fn play_list(&self, items: JsValue, index: usize) -> Result<(), JsValue> {
        let items: Vec<PlayableItem> = decode(items)?;
        self.with_controller(|c| c.play_list(items, index))?
            .map_err(js_error)
    }

    // ===== Transport =====

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&self) -> Result<bool, JsValue> {
        self.with_controller(|c| c.toggle_play())
    }

    #[wasm_bindgen(js_name = toggleLoop)]
    pub fn toggle_loop(&self) -> Result<bool, JsValue> {
        self.with_controller(|c| c.toggle_loop())
    }

    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&self) -> Result<bool, JsValue> {
        self.with_controller(|c| c.toggle_shuffle())
    }

    /// Seek to a whole-second position
    pub fn seek(&self, seconds: u32) -> Result<bool, JsValue> {
        self.with_controller(|c| c.seek(seconds))
    }

    #[wasm_bindgen(js_name = playNext)]
    pub fn play_next(&self) -> Result<bool, JsValue> {
        self.with_controller(|c| c.play_next())
    }

    #[wasm_bindgen(js_name = playPrevious)]
    pub fn play_previous(&self) -> Result<bool, JsValue> {
        self.with_controller(|c| c.play_previous())
    }

    #[wasm_bindgen(js_name = togglePanel)]
    pub fn toggle_panel(&self) -> Result<bool, JsValue> {
        self.with_controller(|c| c.toggle_panel())
    }

    // ===== State Queries =====

    /// Everything the player UI renders, as a plain object
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let view = self
            .inner
            .try_borrow()
            .map_err(|_| JsValue::from_str("Player is busy"))?
            .view();
        serde_wasm_bindgen::to_value(&view)
            .map_err(|e| js_error(PlaybackError::Serialization(e.to_string())))
    }

    #[wasm_bindgen(js_name = elapsedSeconds)]
    pub fn elapsed_seconds(&self) -> Result<u32, JsValue> {
        let controller = self
            .inner
            .try_borrow()
            .map_err(|_| JsValue::from_str("Player is busy"))?;
        Ok(controller.elapsed_seconds())
    }

    // ===== Event Listeners =====

    /// Register the callback receiving every controller event
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        self.dispatcher.set_listener(callback);
    }

    // ===== Internal =====

    /// Run `f` on the controller, then forward the events it produced
    ///
    /// The borrow is released before the listener runs so the listener may
    /// call back into the player.
    fn with_controller<T>(
        &self,
        f: impl FnOnce(&mut PlayerController) -> T,
    ) -> Result<T, JsValue> {
        let (result, events) = {
            let mut controller = self
                .inner
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("Player is busy"))?;
            let result = f(&mut controller);
            (result, controller.drain_events())
        };
        self.dispatcher.notify(&events);
        Ok(result)
    }
}

fn decode<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_error(PlaybackError::Serialization(e.to_string())))
}

fn js_error(error: impl Display) -> JsValue {
    let message = error.to_string();
    console_warn!("{}", message);
    JsValue::from_str(&message)
}
