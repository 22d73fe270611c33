use viewer_core::constants::DEFAULT_MODEL_REFERENCE;
use viewer_core::Viewport;
use web_sys as web;

pub const CANVAS_ID: &str = "app-canvas";
pub const CONTAINER_ID: &str = "model-container";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Match the canvas backing store to its CSS size times the device pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Viewport {
    let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    Viewport::new(w_px, h_px, dpr as f32)
}

/// Pointer position in canvas backing-store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    (
        (x_css / w) * canvas.width() as f32,
        (y_css / h) * canvas.height() as f32,
    )
}

/// Asset to load: `data-model` on the container element, else the default.
pub fn model_reference(document: &web::Document) -> String {
    document
        .get_element_by_id(CONTAINER_ID)
        .and_then(|el| el.get_attribute("data-model"))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL_REFERENCE.to_string())
}
