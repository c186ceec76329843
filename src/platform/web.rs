//! Browser event wiring
//!
//! DOM listeners feed the input samplers inside a shared `PongSession`.
//! Each listener lives as long as its `ListenerHandle`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent, PointerEvent};

use crate::input::Viewport;
use crate::session::PongSession;

/// A registered DOM listener; removed again on drop
pub struct ListenerHandle {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl ListenerHandle {
    /// Listen for `event` on `target`, downcasting to `E` before calling `handler`
    pub fn new<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        });
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::new(0.0, 0.0);
    };
    let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    Viewport::new(size(window.inner_width()), size(window.inner_height()))
}

/// Keyboard: movement keys, calibrate, restart and the board placement keys
pub fn attach_keyboard(
    target: &EventTarget,
    session: Rc<RefCell<PongSession>>,
) -> Result<Vec<ListenerHandle>, JsValue> {
    let mut handles = Vec::new();

    {
        let session = session.clone();
        handles.push(ListenerHandle::new(target, "keydown", move |event: KeyboardEvent| {
            if session.borrow_mut().desktop_mut().key_down(&event.key()) {
                event.prevent_default();
            }
        })?);
    }

    {
        let session = session.clone();
        handles.push(ListenerHandle::new(target, "keyup", move |event: KeyboardEvent| {
            if session.borrow_mut().desktop_mut().key_up(&event.key()) {
                event.prevent_default();
            }
        })?);
    }

    // Keys released while unfocused never fire keyup
    handles.push(ListenerHandle::new(target, "blur", move |_event: Event| {
        session.borrow_mut().desktop_mut().release_all();
    })?);

    Ok(handles)
}

/// Pointer drags in the player's half of the screen
pub fn attach_touch(
    target: &EventTarget,
    session: Rc<RefCell<PongSession>>,
) -> Result<Vec<ListenerHandle>, JsValue> {
    let mut handles = Vec::new();

    {
        let session = session.clone();
        handles.push(ListenerHandle::new(target, "pointerdown", move |event: PointerEvent| {
            let started = session.borrow_mut().touch_mut().pointer_down(
                event.pointer_id(),
                event.client_x() as f32,
                event.client_y() as f32,
                viewport(),
            );
            if started {
                event.prevent_default();
            }
        })?);
    }

    {
        let session = session.clone();
        handles.push(ListenerHandle::new(target, "pointermove", move |event: PointerEvent| {
            session.borrow_mut().touch_mut().pointer_move(
                event.pointer_id(),
                event.client_y() as f32,
                viewport(),
            );
        })?);
    }

    for name in ["pointerup", "pointercancel"] {
        let session = session.clone();
        handles.push(ListenerHandle::new(target, name, move |event: PointerEvent| {
            session.borrow_mut().touch_mut().pointer_end(event.pointer_id());
        })?);
    }

    Ok(handles)
}
