use std::cell::RefCell;
use std::rc::Rc;

use viewer_core::{Viewer, WheelDeltaMode};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// A DOM listener that detaches itself when dropped.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", kind, e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

pub fn wire_input_handlers(
    viewer: &Rc<RefCell<Viewer>>,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<Vec<EventListener>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    Ok(vec![
        wire_pointermove(&window, viewer, canvas)?,
        wire_wheel(&window, viewer)?,
        wire_resize(&window, viewer, canvas)?,
    ])
}

fn wire_pointermove(
    window: &web::Window,
    viewer: &Rc<RefCell<Viewer>>,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<EventListener> {
    let viewer = viewer.clone();
    let canvas = canvas.clone();
    EventListener::new(window, "pointermove", true, move |ev| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            let (x, y) = dom::pointer_canvas_px(ev, &canvas);
            viewer.borrow_mut().on_pointer_move(x, y);
        }
    })
}

// Non-passive so preventDefault can stop the page from scrolling.
fn wire_wheel(window: &web::Window, viewer: &Rc<RefCell<Viewer>>) -> anyhow::Result<EventListener> {
    let viewer = viewer.clone();
    EventListener::new(window, "wheel", false, move |ev| {
        ev.prevent_default();
        if let Some(ev) = ev.dyn_ref::<web::WheelEvent>() {
            let mode = WheelDeltaMode::from_dom(ev.delta_mode());
            viewer.borrow_mut().on_wheel(ev.delta_y() as f32, mode);
        }
    })
}

fn wire_resize(
    window: &web::Window,
    viewer: &Rc<RefCell<Viewer>>,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<EventListener> {
    let viewer = viewer.clone();
    let canvas = canvas.clone();
    EventListener::new(window, "resize", true, move |_| {
        let viewport = dom::sync_canvas_backing_size(&canvas);
        viewer.borrow_mut().on_resize(viewport);
    })
}
