use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use viewer_core::gpu::GpuRenderer;
use viewer_core::{TickOutcome, Viewer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::events::EventListener;

pub struct FrameContext {
    pub viewer: Rc<RefCell<Viewer>>,
    pub renderer: GpuRenderer<'static>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) -> TickOutcome {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        self.viewer.borrow_mut().tick(dt, &mut self.renderer)
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Running `requestAnimationFrame` loop plus the listeners feeding it.
pub struct LoopHandle {
    viewer: Rc<RefCell<Viewer>>,
    tick: TickClosure,
    raf_id: Rc<Cell<Option<i32>>>,
    listeners: Vec<EventListener>,
}

impl LoopHandle {
    /// Cancel the pending frame, release the frame closure and detach input.
    pub fn stop(self) {
        self.viewer.borrow_mut().stop();
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself
        self.tick.borrow_mut().take();
        drop(self.listeners);
    }
}

fn request_frame(tick: &TickClosure) -> Option<i32> {
    let w = web::window()?;
    let cb = tick.borrow();
    let cb = cb.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

pub fn start_loop(mut frame_ctx: FrameContext, listeners: Vec<EventListener>) -> LoopHandle {
    let viewer = frame_ctx.viewer.clone();
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let raf_id_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_id_tick.set(None);
        if frame_ctx.frame() == TickOutcome::Stopped {
            return;
        }
        raf_id_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    raf_id.set(request_frame(&tick));
    log::info!("[loop] started");

    LoopHandle {
        viewer,
        tick,
        raf_id,
        listeners,
    }
}
