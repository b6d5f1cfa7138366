//! Browser binding: feeds DOM pointer events into a [`TapRecognizer`] and
//! dispatches the resulting `tap` as a `CustomEvent` on the down target.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, EventTarget, MouseEvent, Touch, TouchEvent};

use crate::config::TapConfig;
use crate::error::TapError;
use crate::model::{Coordinates, InputSignal, MouseButton, Point, PointerKind, Source, TapEvent};
use crate::recognizer::{CancelCause, ClickOutcome, DownOutcome, EndOutcome, TapRecognizer};

pub const TAP_EVENT: &str = "tap";

type Recognizer = TapRecognizer<EventTarget, EndSubscription>;

/// End listeners attached for one open gesture; removed on drop.
pub struct EndSubscription {
    root: EventTarget,
    listeners: Vec<(&'static str, Function)>,
}

impl EndSubscription {
    fn attach(root: EventTarget, kind: PointerKind, ends: &EndCallbacks) -> Self {
        let listeners = match kind {
            PointerKind::Mouse => vec![("mouseup", ends.mouse_up.clone())],
            PointerKind::Touch => vec![
                ("touchend", ends.touch_end.clone()),
                ("touchcancel", ends.touch_cancel.clone()),
            ],
        };
        for (name, f) in &listeners {
            if let Err(err) = root.add_event_listener_with_callback(name, f) {
                log::warn!("could not listen for {name}: {:?}", err);
            }
        }
        Self { root, listeners }
    }
}

impl Drop for EndSubscription {
    fn drop(&mut self) {
        for (name, f) in &self.listeners {
            let _ = self.root.remove_event_listener_with_callback(name, f);
        }
    }
}

#[derive(Clone)]
struct EndCallbacks {
    mouse_up: Function,
    touch_end: Function,
    touch_cancel: Function,
}

// Closures live as long as the binding is enabled.
struct Handlers {
    root: EventTarget,
    touch_start: Closure<dyn FnMut(TouchEvent)>,
    mouse_down: Closure<dyn FnMut(MouseEvent)>,
    click: Closure<dyn FnMut(MouseEvent)>,
    touch_end: Closure<dyn FnMut(TouchEvent)>,
    touch_cancel: Closure<dyn FnMut(TouchEvent)>,
    mouse_up: Closure<dyn FnMut(MouseEvent)>,
}

impl Handlers {
    fn new(inner: &Rc<Inner>) -> Self {
        let weak = Rc::downgrade(inner);
        Self {
            root: inner.root.clone(),
            touch_start: touch_closure(&weak, |inner, e| inner.handle_down(touch_signal(&e))),
            mouse_down: mouse_closure(&weak, |inner, e| inner.handle_down(mouse_signal(&e))),
            click: mouse_closure(&weak, |inner, e| inner.handle_click(&e)),
            touch_end: touch_closure(&weak, |inner, e| inner.handle_end(touch_signal(&e))),
            touch_cancel: touch_closure(&weak, |inner, e| inner.handle_cancel(&e)),
            mouse_up: mouse_closure(&weak, |inner, e| inner.handle_end(mouse_signal(&e))),
        }
    }

    fn root_listeners(&self) -> [(&'static str, &Function); 3] {
        [
            ("touchstart", self.touch_start.as_ref().unchecked_ref()),
            ("mousedown", self.mouse_down.as_ref().unchecked_ref()),
            ("click", self.click.as_ref().unchecked_ref()),
        ]
    }

    fn attach(&self) -> Result<(), TapError> {
        for (name, f) in self.root_listeners() {
            self.root.add_event_listener_with_callback(name, f)?;
        }
        Ok(())
    }

    fn end_callbacks(&self) -> EndCallbacks {
        EndCallbacks {
            mouse_up: self.mouse_up.as_ref().unchecked_ref::<Function>().clone(),
            touch_end: self.touch_end.as_ref().unchecked_ref::<Function>().clone(),
            touch_cancel: self.touch_cancel.as_ref().unchecked_ref::<Function>().clone(),
        }
    }
}

impl Drop for Handlers {
    fn drop(&mut self) {
        for (name, f) in self.root_listeners() {
            let _ = self.root.remove_event_listener_with_callback(name, f);
        }
    }
}

fn touch_closure(
    weak: &Weak<Inner>,
    handle: fn(&Inner, TouchEvent),
) -> Closure<dyn FnMut(TouchEvent)> {
    let weak = weak.clone();
    Closure::wrap(Box::new(move |e: TouchEvent| {
        if let Some(inner) = weak.upgrade() {
            handle(&inner, e);
        }
    }) as Box<dyn FnMut(_)>)
}

fn mouse_closure(
    weak: &Weak<Inner>,
    handle: fn(&Inner, MouseEvent),
) -> Closure<dyn FnMut(MouseEvent)> {
    let weak = weak.clone();
    Closure::wrap(Box::new(move |e: MouseEvent| {
        if let Some(inner) = weak.upgrade() {
            handle(&inner, e);
        }
    }) as Box<dyn FnMut(_)>)
}

struct Inner {
    root: EventTarget,
    recognizer: RefCell<Recognizer>,
    handlers: RefCell<Option<Handlers>>,
}

impl Inner {
    fn handle_down(&self, signal: Option<InputSignal<EventTarget>>) {
        let Some(signal) = signal else { return };
        let Some(ends) = self.handlers.borrow().as_ref().map(Handlers::end_callbacks) else {
            return;
        };
        let root = self.root.clone();
        let outcome = self
            .recognizer
            .borrow_mut()
            .on_down(&signal, move |kind| EndSubscription::attach(root, kind, &ends));
        if let DownOutcome::Ignored(reason) = outcome {
            log::trace!("down ignored: {:?}", reason);
        }
    }

    fn handle_end(&self, signal: Option<InputSignal<EventTarget>>) {
        let Some(signal) = signal else { return };
        // no borrow may be held while listeners run
        let outcome = self.recognizer.borrow_mut().on_end(&signal);
        if let EndOutcome::Tap(tap) = outcome {
            match dispatch_tap(&tap) {
                Ok(prevented) => self.recognizer.borrow_mut().settle_tap(prevented),
                Err(err) => log::warn!("tap dispatch failed: {err}"),
            }
        }
    }

    fn handle_cancel(&self, e: &TouchEvent) {
        let outcome = self.recognizer.borrow_mut().on_cancel(CancelCause::Platform);
        if outcome.prevent_default {
            e.prevent_default();
        }
    }

    fn handle_click(&self, e: &MouseEvent) {
        let Some(signal) = mouse_signal(e) else { return };
        let outcome = self.recognizer.borrow_mut().on_click(&signal);
        if outcome == ClickOutcome::Suppress {
            e.prevent_default();
            e.stop_propagation();
        }
    }
}

/// Tap recognition attached to one root element. Clones share the binding;
/// dropping the last clone detaches every listener.
#[derive(Clone)]
pub struct TapBinding {
    inner: Rc<Inner>,
}

impl TapBinding {
    /// Creates a disabled binding on `root`.
    pub fn new(root: EventTarget, config: TapConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                root,
                recognizer: RefCell::new(TapRecognizer::new(config)),
                handlers: RefCell::new(None),
            }),
        }
    }

    /// Binds to `document.body` and enables right away.
    pub fn install_on_body(config: TapConfig) -> Result<Self, TapError> {
        config.validate()?;
        let window = web_sys::window().ok_or(TapError::NoWindow)?;
        let document = window.document().ok_or(TapError::NoDocument)?;
        let body = document.body().ok_or(TapError::NoBody)?;
        let binding = Self::new(body.into(), config);
        binding.enable()?;
        Ok(binding)
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.handlers.borrow().is_some()
    }

    pub fn is_tracking(&self) -> bool {
        self.inner.recognizer.borrow().is_tracking()
    }

    pub fn enable(&self) -> Result<(), TapError> {
        if self.is_enabled() {
            return Ok(());
        }
        let handlers = Handlers::new(&self.inner);
        handlers.attach()?;
        *self.inner.handlers.borrow_mut() = Some(handlers);
        log::debug!("tap listeners attached");
        Ok(())
    }

    pub fn disable(&self) {
        let Some(handlers) = self.inner.handlers.borrow_mut().take() else {
            return;
        };
        self.inner.recognizer.borrow_mut().reset();
        drop(handlers);
        log::debug!("tap listeners detached");
    }

    pub fn config(&self) -> TapConfig {
        *self.inner.recognizer.borrow().config()
    }

    pub fn set_config(&self, config: TapConfig) -> Result<(), TapError> {
        config.validate()?;
        self.inner.recognizer.borrow_mut().set_config(config);
        Ok(())
    }
}

fn point(x: i32, y: i32) -> Point {
    Point::new(x as f64, y as f64)
}

fn mouse_signal(e: &MouseEvent) -> Option<InputSignal<EventTarget>> {
    Some(InputSignal {
        target: e.target()?,
        source: Source::Mouse {
            button: MouseButton::from_dom(e.button()),
            coords: Coordinates {
                client: point(e.client_x(), e.client_y()),
                screen: point(e.screen_x(), e.screen_y()),
                page: point(e.page_x(), e.page_y()),
            },
        },
        synthetic: !e.is_trusted(),
    })
}

fn touch_coords(t: &Touch) -> Coordinates {
    Coordinates {
        client: point(t.client_x(), t.client_y()),
        screen: point(t.screen_x(), t.screen_y()),
        page: point(t.page_x(), t.page_y()),
    }
}

fn touch_signal(e: &TouchEvent) -> Option<InputSignal<EventTarget>> {
    let list = e.changed_touches();
    let changed = (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| touch_coords(&t))
        .collect();
    Some(InputSignal {
        target: e.target()?,
        source: Source::Touch {
            changed,
            active: e.touches().length() as usize,
        },
        synthetic: !e.is_trusted(),
    })
}

/// Fires the tap and reports whether a listener prevented its default.
fn dispatch_tap(tap: &TapEvent<EventTarget>) -> Result<bool, TapError> {
    let c = &tap.coords;
    let detail = Object::new();
    for (key, value) in [
        ("clientX", c.client.x),
        ("clientY", c.client.y),
        ("screenX", c.screen.x),
        ("screenY", c.screen.y),
        ("pageX", c.page.x),
        ("pageY", c.page.y),
    ] {
        Reflect::set(&detail, &JsValue::from_str(key), &JsValue::from_f64(value))?;
    }
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(TAP_EVENT, &init)?;
    tap.target.dispatch_event(&event)?;
    Ok(event.default_prevented())
}
