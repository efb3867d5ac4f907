//! `HtmlAudioElement` media backend

use crate::controller::PlayerController;
use crate::events::PlayerEvent;
use crate::source::{MediaBackend, MediaEvent, MediaEventKind, MediaSource, SourceId};
use crate::types::PlayableItem;
use js_sys::{Function, Promise, Reflect};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

/// Element callbacks owned by one source
type SourceHandlers = Vec<Closure<dyn FnMut()>>;

/// Routes element callbacks into the controller and controller events out
/// to the page
///
/// Handlers of superseded sources are parked in `retired` rather than freed
/// on the spot: a source is usually superseded from inside one of its own
/// callbacks (`ended` advancing to the next item), and a closure must not be
/// freed while it runs. They are freed on the next delivery.
///
/// `play()` promises can settle long after their source is gone, so every
/// source shares the one rejection handler owned here, called with the
/// source id bound as its first argument.
pub(crate) struct Dispatcher {
    controller: RefCell<Weak<RefCell<PlayerController>>>,
    listener: RefCell<Option<Function>>,
    retired: RefCell<Vec<SourceHandlers>>,
    rejection: Closure<dyn FnMut(JsValue, JsValue)>,
}

impl Dispatcher {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Dispatcher>| {
            let this = this.clone();
            let rejection = Closure::wrap(Box::new(move |id: JsValue, _reason: JsValue| {
                let (Some(dispatcher), Some(id)) = (this.upgrade(), id.as_f64()) else {
                    return;
                };
                // A blocked autoplay rejects play() without any pause event
                dispatcher.deliver(MediaEvent::new(
                    SourceId::new(id as u64),
                    MediaEventKind::Paused,
                ));
            }) as Box<dyn FnMut(JsValue, JsValue)>);

            Self {
                controller: RefCell::new(Weak::new()),
                listener: RefCell::new(None),
                retired: RefCell::new(Vec::new()),
                rejection,
            }
        })
    }

    pub(crate) fn attach(&self, controller: &Rc<RefCell<PlayerController>>) {
        *self.controller.borrow_mut() = Rc::downgrade(controller);
    }

    pub(crate) fn set_listener(&self, callback: Function) {
        *self.listener.borrow_mut() = Some(callback);
    }

    /// Feed one element callback to the controller
    fn deliver(&self, event: MediaEvent) {
        self.retired.borrow_mut().clear();

        let Some(controller) = self.controller.borrow().upgrade() else {
            return;
        };
        let events = match controller.try_borrow_mut() {
            Ok(mut controller) => {
                controller.handle_media_event(event);
                controller.drain_events()
            }
            Err(_) => {
                console_warn!("Dropped {:?} from {}: controller busy", event.kind, event.source);
                return;
            }
        };
        self.notify(&events);
    }

    /// Hand controller events to the page's listener
    pub(crate) fn notify(&self, events: &[PlayerEvent]) {
        let Some(callback) = self.listener.borrow().clone() else {
            return;
        };
        for event in events {
            match serde_wasm_bindgen::to_value(event) {
                Ok(value) => {
                    callback.call1(&JsValue::NULL, &value).ok();
                }
                Err(e) => console_warn!("Failed to convert {:?}: {}", event, e),
            }
        }
    }

    /// Report a rejected `play()` as a pause of source `id`
    fn watch_play(&self, id: SourceId, promise: &Promise) -> Result<(), JsValue> {
        let handler: &Function = self.rejection.as_ref().unchecked_ref();
        let handler = handler.bind1(&JsValue::NULL, &JsValue::from_f64(id.get() as f64));

        let catch: Function = Reflect::get(promise, &JsValue::from_str("catch"))?.dyn_into()?;
        catch.call1(promise, &handler)?;
        Ok(())
    }

    fn retire(&self, handlers: SourceHandlers) {
        self.retired.borrow_mut().push(handlers);
    }
}

/// One `<audio>` element bound to a single item
struct HtmlAudioSource {
    id: SourceId,
    element: HtmlAudioElement,
    handlers: Option<SourceHandlers>,
    dispatcher: Rc<Dispatcher>,
}

impl HtmlAudioSource {
    fn open(
        id: SourceId,
        item: &PlayableItem,
        dispatcher: &Rc<Dispatcher>,
    ) -> Result<Self, JsValue> {
        let element = HtmlAudioElement::new_with_src(&item.url)?;
        element.set_preload("metadata");

        let handler = |kind: MediaEventKind| {
            let dispatcher = dispatcher.clone();
            Closure::wrap(Box::new(move || dispatcher.deliver(MediaEvent::new(id, kind)))
                as Box<dyn FnMut()>)
        };

        let loaded = handler(MediaEventKind::MetadataLoaded);
        let tick = handler(MediaEventKind::PositionTick);
        let ended = handler(MediaEventKind::Ended);
        let played = handler(MediaEventKind::Played);
        let paused = handler(MediaEventKind::Paused);

        element.set_onloadedmetadata(Some(loaded.as_ref().unchecked_ref()));
        element.set_ontimeupdate(Some(tick.as_ref().unchecked_ref()));
        element.set_onended(Some(ended.as_ref().unchecked_ref()));
        element.set_onplay(Some(played.as_ref().unchecked_ref()));
        element.set_onpause(Some(paused.as_ref().unchecked_ref()));

        Ok(Self {
            id,
            element,
            handlers: Some(vec![loaded, tick, ended, played, paused]),
            dispatcher: dispatcher.clone(),
        })
    }
}

impl MediaSource for HtmlAudioSource {
    fn play(&mut self) {
        let promise = match self.element.play() {
            Ok(promise) => promise,
            Err(e) => {
                console_warn!("play() failed: {:?}", e);
                return;
            }
        };
        if let Err(e) = self.dispatcher.watch_play(self.id, &promise) {
            console_warn!("Could not watch play() of {}: {:?}", self.id, e);
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            console_warn!("pause() failed: {:?}", e);
        }
    }

    fn position(&self) -> f64 {
        self.element.current_time()
    }

    fn set_position(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn set_looping(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }
}

impl Drop for HtmlAudioSource {
    fn drop(&mut self) {
        self.element.set_onloadedmetadata(None);
        self.element.set_ontimeupdate(None);
        self.element.set_onended(None);
        self.element.set_onplay(None);
        self.element.set_onpause(None);
        self.element.pause().ok();
        // Abort any in-flight download
        self.element.remove_attribute("src").ok();
        self.element.load();

        if let Some(handlers) = self.handlers.take() {
            self.dispatcher.retire(handlers);
        }
    }
}

/// Stand-in for an element the browser refused to create
struct DetachedSource;

impl MediaSource for DetachedSource {
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn position(&self) -> f64 {
        0.0
    }
    fn set_position(&mut self, _seconds: f64) {}
    fn set_looping(&mut self, _looping: bool) {}
}

/// Backend creating one detached `<audio>` element per item
pub(crate) struct HtmlAudioBackend {
    dispatcher: Rc<Dispatcher>,
}

impl HtmlAudioBackend {
    pub(crate) fn new(dispatcher: Rc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl MediaBackend for HtmlAudioBackend {
    fn open(&mut self, id: SourceId, item: &PlayableItem) -> Box<dyn MediaSource> {
        match HtmlAudioSource::open(id, item, &self.dispatcher) {
            Ok(source) => Box::new(source),
            Err(e) => {
                console_warn!("Could not create audio element for {}: {:?}", item.url, e);
                Box::new(DetachedSource)
            }
        }
    }
}
