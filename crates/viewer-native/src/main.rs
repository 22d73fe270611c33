use std::path::Path;
use std::time::Instant;

use viewer_core::constants::DEFAULT_MODEL_REFERENCE;
use viewer_core::gpu::GpuRenderer;
use viewer_core::{
    load_channel, ModelMesh, TickOutcome, Viewer, ViewerConfig, ViewerError, Viewport,
    WheelDeltaMode,
};
use winit::event::{Event, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

fn viewport_of(window: &Window) -> Viewport {
    let size = window.inner_size();
    Viewport::new(size.width, size.height, window.scale_factor() as f32)
}

fn read_model(path: &str) -> Result<ModelMesh, ViewerError> {
    let bytes = std::fs::read(Path::new(path)).map_err(|e| ViewerError::asset_load(path, e))?;
    ModelMesh::decode_asset(path, &bytes)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let reference = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_MODEL_REFERENCE.to_string());

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(format!("Model viewer - {reference}"))
        .build(&event_loop)?;
    // The surface borrows the window for the life of the event loop
    let window = &window;

    let viewport = viewport_of(window);
    let mut viewer = Viewer::new(ViewerConfig::default(), viewport)?;

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window)?;
    let mut renderer = pollster::block_on(GpuRenderer::new(
        &instance,
        surface,
        viewport.width,
        viewport.height,
    ))?;

    let (completer, slot) = load_channel::<ModelMesh>(&reference);
    viewer.expect_model(slot);
    log::info!("[load] reading {}", reference);
    completer.complete(read_model(&reference));

    let mut last_frame = Instant::now();
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CursorMoved { position, .. } => {
                viewer.on_pointer_move(position.x as f32, position.y as f32);
            }
            // winit reports wheel-up as positive; the viewer expects DOM sign (down = positive)
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => viewer.on_wheel(-y, WheelDeltaMode::Line),
                MouseScrollDelta::PixelDelta(p) => {
                    viewer.on_wheel(-p.y as f32, WheelDeltaMode::Pixel)
                }
            },
            WindowEvent::Resized(_) => viewer.on_resize(viewport_of(window)),
            WindowEvent::CloseRequested => {
                viewer.stop();
                elwt.exit();
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = now - last_frame;
            last_frame = now;
            match viewer.tick(dt, &mut renderer) {
                TickOutcome::Continue => window.request_redraw(),
                TickOutcome::Stopped => elwt.exit(),
            }
        }
        _ => {}
    })?;
    Ok(())
}
