#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use viewer_core::gpu::GpuRenderer;
use viewer_core::{load_channel, ModelMesh, Viewer, ViewerConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod loader;

thread_local! {
    static ACTIVE_LOOP: RefCell<Option<frame::LoopHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viewer-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the render loop and detach all input listeners.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(handle) = ACTIVE_LOOP.with(|slot| slot.borrow_mut().take()) {
        handle.stop();
    }
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(dom::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", dom::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let viewport = dom::sync_canvas_backing_size(&canvas);
    let viewer = Rc::new(RefCell::new(Viewer::new(ViewerConfig::default(), viewport)?));

    // Start the fetch first so it overlaps adapter/device setup
    let reference = dom::model_reference(&document);
    let (completer, slot) = load_channel::<ModelMesh>(&reference);
    viewer.borrow_mut().expect_model(slot);
    loader::spawn_fetch(completer);

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let renderer =
        GpuRenderer::new(&instance, surface, viewport.width, viewport.height).await?;

    let listeners = events::wire_input_handlers(&viewer, &canvas)?;
    let handle = frame::start_loop(
        frame::FrameContext {
            viewer,
            renderer,
            last_instant: Instant::now(),
        },
        listeners,
    );
    ACTIVE_LOOP.with(|slot| {
        if let Some(previous) = slot.borrow_mut().replace(handle) {
            previous.stop();
        }
    });
    Ok(())
}
