//! Browser host
//!
//! Wires a [`LoopDriver`] to a page: keyboard and pointer subscriptions,
//! request-animation-frame scheduling, bird image loading, and a JSON
//! snapshot handed to a JavaScript draw callback every frame. `stop` (or
//! dropping the handle) cancels the pending frame and removes every
//! listener, so nothing runs after the host component unmounts.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

use crate::asset::AssetStatus;
use crate::config::GameConfig;
use crate::driver::LoopDriver;
use crate::input::{Action, KeyCode, RawInput};
use crate::sim::GamePhase;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// An event subscription that unsubscribes itself on drop
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

struct Host {
    driver: LoopDriver,
    canvas: HtmlCanvasElement,
    on_frame: Option<js_sys::Function>,
    image: Option<HtmlImageElement>,
    raf_id: Option<i32>,
    listeners: Vec<Listener>,
}

impl Host {
    fn post(&mut self, action: Action) {
        self.driver.post(action);
    }
}

/// Handle exported to JavaScript
#[wasm_bindgen]
pub struct FlappyGame {
    host: Rc<RefCell<Host>>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
}

#[wasm_bindgen]
impl FlappyGame {
    /// `config_json` may be a partial object; `on_frame` receives the
    /// snapshot JSON once per frame.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
        on_frame: Option<js_sys::Function>,
    ) -> Result<FlappyGame, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json),
            None => Ok(GameConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = js_sys::Date::now() as u64;
        let driver = LoopDriver::new(config, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let host = Host {
            driver,
            canvas,
            on_frame,
            image: None,
            raf_id: None,
            listeners: Vec::new(),
        };
        Ok(FlappyGame {
            host: Rc::new(RefCell::new(host)),
            frame_callback: Rc::new(RefCell::new(None)),
        })
    }

    /// Subscribe to input, start loading the bird image and schedule frames.
    /// On failure everything is torn down again so a later `start` can retry.
    pub fn start(&self) -> Result<(), JsValue> {
        if !self.host.borrow_mut().driver.start() {
            return Ok(());
        }
        let result = self.attach();
        if result.is_err() {
            teardown(&self.host);
        }
        result
    }

    /// Stop the loop and release every subscription
    pub fn stop(&self) {
        teardown(&self.host);
    }

    pub fn flap(&self) {
        self.host.borrow_mut().post(Action::Flap);
    }

    pub fn reset(&self) {
        self.host.borrow_mut().post(Action::Reset);
    }

    pub fn play(&self) {
        self.host.borrow_mut().post(Action::Play);
    }

    /// Side-panel Play/Stop button
    pub fn toggle(&self) {
        self.host.borrow_mut().post(Action::Toggle);
    }

    pub fn status(&self) -> String {
        match self.host.borrow().driver.status() {
            GamePhase::Ready => "ready",
            GamePhase::Running => "running",
            GamePhase::GameOver => "gameover",
        }
        .to_string()
    }

    pub fn score(&self) -> u32 {
        self.host.borrow().driver.score()
    }

    pub fn best(&self) -> u32 {
        self.host.borrow().driver.best()
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.host.borrow().driver.snapshot().to_json()
    }

    /// The decoded bird image, once available
    pub fn image(&self) -> Option<HtmlImageElement> {
        let host = self.host.borrow();
        if host.driver.asset().is_available() {
            host.image.clone()
        } else {
            None
        }
    }
}

impl FlappyGame {
    fn attach(&self) -> Result<(), JsValue> {
        subscribe_input(&self.host)?;
        load_image(&self.host)?;

        if self.frame_callback.borrow().is_none() {
            let host = Rc::downgrade(&self.host);
            let callback = Rc::downgrade(&self.frame_callback);
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                if let (Some(host), Some(callback)) = (host.upgrade(), callback.upgrade()) {
                    run_frame(&host, &callback, time);
                }
            });
            *self.frame_callback.borrow_mut() = Some(closure);
        }
        request_frame(&self.host, &self.frame_callback)
    }
}

impl Drop for FlappyGame {
    fn drop(&mut self) {
        teardown(&self.host);
    }
}

fn teardown(host: &Rc<RefCell<Host>>) {
    let mut h = host.borrow_mut();
    h.driver.stop();
    if let Some(id) = h.raf_id.take() {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id);
        }
    }
    h.listeners.clear();
}

fn request_frame(
    host: &Rc<RefCell<Host>>,
    callback: &Rc<RefCell<Option<FrameCallback>>>,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback = callback.borrow();
    let Some(closure) = callback.as_ref() else {
        return Ok(());
    };
    let id = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    host.borrow_mut().raf_id = Some(id);
    Ok(())
}

fn run_frame(host: &Rc<RefCell<Host>>, callback: &Rc<RefCell<Option<FrameCallback>>>, time: f64) {
    // Release the borrow before calling into JS, which may call back into us
    let (json, on_frame) = {
        let mut h = host.borrow_mut();
        h.raf_id = None;
        match h.driver.frame(time) {
            Some(snapshot) => (snapshot.to_json(), h.on_frame.clone()),
            None => return,
        }
    };

    if let Some(on_frame) = on_frame {
        if let Err(e) = on_frame.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            log::warn!("Frame callback threw: {:?}", e);
        }
    }

    let still_running = host.borrow().driver.is_running();
    if still_running {
        if let Err(e) = request_frame(host, callback) {
            log::error!("Failed to schedule frame: {:?}", e);
        }
    }
}

fn with_host(host: &Weak<RefCell<Host>>, f: impl FnOnce(&mut Host)) {
    let Some(host) = host.upgrade() else {
        return;
    };
    match host.try_borrow_mut() {
        Ok(mut h) => f(&mut h),
        Err(_) => log::warn!("Input arrived while the game was busy"),
    };
}

fn subscribe_input(host: &Rc<RefCell<Host>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let canvas: EventTarget = host.borrow().canvas.clone().into();

    // Keyboard
    let weak = Rc::downgrade(host);
    let on_key = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let raw = RawInput::Key(KeyCode::from_code(&key.code()));
        if raw.suppresses_default() {
            event.prevent_default();
        }
        with_host(&weak, |h| {
            h.driver.dispatch(raw);
        });
    });
    let key_listener = Listener::attach(window.as_ref(), "keydown", on_key)?;

    // Click / touch / pen
    let weak = Rc::downgrade(host);
    let on_pointer = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        with_host(&weak, |h| {
            h.driver.dispatch(RawInput::PointerDown);
        });
    });
    let pointer_listener = Listener::attach(&canvas, "pointerdown", on_pointer)?;

    let mut h = host.borrow_mut();
    h.listeners.push(key_listener);
    h.listeners.push(pointer_listener);
    Ok(())
}

fn load_image(host: &Rc<RefCell<Host>>) -> Result<(), JsValue> {
    let source = {
        let h = host.borrow();
        // Failures are final; a pending load interrupted by stop starts over
        if h.driver.asset_status() != AssetStatus::Pending {
            return Ok(());
        }
        match h.driver.asset().source() {
            Some(source) => source.to_string(),
            None => return Ok(()),
        }
    };

    let image = HtmlImageElement::new()?;

    let weak = Rc::downgrade(host);
    let on_load = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        with_host(&weak, |h| h.driver.asset_loaded());
    });
    let load_listener = Listener::attach(image.as_ref(), "load", on_load)?;

    let weak = Rc::downgrade(host);
    let on_error = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        with_host(&weak, |h| h.driver.asset_failed("image failed to load"));
    });
    let error_listener = Listener::attach(image.as_ref(), "error", on_error)?;

    image.set_src(&source);

    let mut h = host.borrow_mut();
    h.listeners.push(load_listener);
    h.listeners.push(error_listener);
    h.image = Some(image);
    Ok(())
}
