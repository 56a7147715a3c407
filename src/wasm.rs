//! WebAssembly bindings
//!
//! Provides a [`ViewportProvider`] backed by the browser `window` and exposes
//! the classifier, the device watcher and the field reseter to JavaScript.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use log::warn;
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use web_sys::js_sys::{Function, JSON};

use crate::{
    device::{self, DeviceInfo, DeviceType, ListenerId, ResizeHandler, Subscription, ViewportProvider},
    reset::{ResetOptions, reset_fields},
};

const RESIZE_EVENT: &str = "resize";

/// Initialize the WASM module and set up logging
///
/// This runs automatically when the WASM module is loaded.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    if console_log::init_with_level(log::Level::Info).is_err() {
        warn!("logger already initialized");
    }
}

/// Classify a viewport width, returning the lowercase category name
#[wasm_bindgen]
pub fn device_type(width: f64) -> String {
    DeviceType::from_width(width).as_str().to_string()
}

fn current_device_type() -> Option<DeviceType> {
    BrowserViewport::new().map(|viewport| device::device_type(&viewport))
}

/// Category of the current window, `None` outside of a browser
#[wasm_bindgen]
pub fn window_device_type() -> Option<String> {
    current_device_type().map(|device_type| device_type.as_str().to_string())
}

#[wasm_bindgen]
pub fn is_mobile() -> bool {
    current_device_type().is_some_and(DeviceType::is_mobile)
}

#[wasm_bindgen]
pub fn is_tablet() -> bool {
    current_device_type().is_some_and(DeviceType::is_tablet)
}

#[wasm_bindgen]
pub fn is_desktop() -> bool {
    current_device_type().is_some_and(DeviceType::is_desktop)
}

#[wasm_bindgen]
pub fn is_widescreen() -> bool {
    current_device_type().is_some_and(DeviceType::is_widescreen)
}

#[wasm_bindgen]
pub fn is_full_hd() -> bool {
    current_device_type().is_some_and(DeviceType::is_full_hd)
}

/// Subscription handle returned by [`watch_device`]
///
/// Freeing the handle from JavaScript releases the window listener.
#[wasm_bindgen]
pub struct DeviceWatch {
    subscription: Subscription<BrowserViewport>,
}

#[wasm_bindgen]
impl DeviceWatch {
    /// Stop notifications. Calling this again is a no-op.
    pub fn unsubscribe(&self) {
        self.subscription.unsubscribe();
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.subscription.is_active()
    }
}

/// Call `callback` with `{ type, width, height }` now and after every window resize
#[wasm_bindgen]
pub fn watch_device(callback: Function) -> Result<DeviceWatch, JsValue> {
    let viewport =
        BrowserViewport::new().ok_or_else(|| JsValue::from_str("no browser window available"))?;

    let subscription = device::on_device_change(Rc::new(viewport), move |info| {
        if let Err(e) = notify(&callback, &info) {
            warn!("device change callback failed: {e:?}");
        }
    });

    Ok(DeviceWatch { subscription })
}

fn notify(callback: &Function, info: &DeviceInfo) -> Result<(), JsValue> {
    let json = serde_json::to_string(info).map_err(|e| JsValue::from_str(&e.to_string()))?;
    callback.call1(&JsValue::NULL, &JSON::parse(&json)?)?;
    Ok(())
}

/// Reset a JSON document with JSON-encoded options and return the result as JSON
#[wasm_bindgen]
pub fn reset_fields_json(target: &str, options: &str) -> Result<String, JsValue> {
    let mut document: serde_json::Value =
        serde_json::from_str(target).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = if options.trim().is_empty() {
        ResetOptions::default()
    } else {
        ResetOptions::from_json_str(options).map_err(|e| JsValue::from_str(&format!("{e:#}")))?
    };

    reset_fields(&mut document, &options);

    serde_json::to_string(&document).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Viewport of the current browser window
pub struct BrowserViewport {
    window: web_sys::Window,
    listeners: RefCell<HashMap<ListenerId, Closure<dyn Fn()>>>,
    next_id: Cell<u64>,
}

impl BrowserViewport {
    /// Returns `None` outside of a browser main thread
    pub fn new() -> Option<Self> {
        Some(Self {
            window: web_sys::window()?,
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        })
    }

    fn dimension(value: Result<JsValue, JsValue>) -> f64 {
        value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0)
    }

    fn detach(&self, closure: &Closure<dyn Fn()>) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(RESIZE_EVENT, closure.as_ref().unchecked_ref())
        {
            warn!("failed to remove resize listener: {e:?}");
        }
    }
}

// listeners must not outlive their closures
impl Drop for BrowserViewport {
    fn drop(&mut self) {
        for (_, closure) in self.listeners.take() {
            self.detach(&closure);
        }
    }
}

impl ViewportProvider for BrowserViewport {
    fn inner_width(&self) -> f64 {
        Self::dimension(self.window.inner_width())
    }

    fn inner_height(&self) -> f64 {
        Self::dimension(self.window.inner_height())
    }

    fn add_resize_listener(&self, handler: ResizeHandler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let closure = Closure::<dyn Fn()>::new(move || handler());
        if let Err(e) = self
            .window
            .add_event_listener_with_callback(RESIZE_EVENT, closure.as_ref().unchecked_ref())
        {
            warn!("failed to register resize listener: {e:?}");
        }
        self.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) {
        let Some(closure) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        self.detach(&closure);
    }
}
