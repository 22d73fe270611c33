// Render loop driver tests against a recording renderer.

use std::cell::RefCell;
use std::f32::consts::PI;
use std::time::Duration;

use glam::Vec3;
use viewer_core::{
    load_channel, FrameView, LoopPhase, MeshVertex, ModelMesh, SceneRenderer, TickOutcome, Viewer,
    ViewerConfig, ViewerError, Viewport, WheelDeltaMode,
};

const DT: Duration = Duration::from_micros(16_667);

// Records log lines per test thread.
struct CaptureLog;

thread_local! {
    static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

impl log::Log for CaptureLog {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        LINES.with(|l| l.borrow_mut().push(record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLog = CaptureLog;

fn capture_logs() {
    if log::set_logger(&CAPTURE).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
    LINES.with(|l| l.borrow_mut().clear());
}

fn captured(prefix: &str) -> Vec<String> {
    LINES.with(|l| {
        l.borrow()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .cloned()
            .collect()
    })
}

#[derive(Default)]
struct Recorder {
    uploads: usize,
    resizes: Vec<(u32, u32)>,
    frames: Vec<FrameView>,
    fail_upload: bool,
    fail_render: bool,
}

impl SceneRenderer for Recorder {
    fn upload_model(&mut self, _mesh: &ModelMesh) -> anyhow::Result<()> {
        if self.fail_upload {
            anyhow::bail!("out of device memory");
        }
        self.uploads += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }

    fn render(&mut self, frame: &FrameView) -> anyhow::Result<()> {
        self.frames.push(*frame);
        if self.fail_render {
            anyhow::bail!("surface lost");
        }
        Ok(())
    }
}

fn viewer() -> Viewer {
    Viewer::new(ViewerConfig::default(), Viewport::new(800, 600, 1.0)).unwrap()
}

fn vertex(p: [f32; 3]) -> MeshVertex {
    MeshVertex {
        position: p,
        normal: [0.0, 1.0, 0.0],
        color: [1.0; 4],
    }
}

// Two opposite corners of a 4 x 2 x 8 box centered at (1, 2, 3), plus one more to make a triangle.
fn box_mesh() -> ModelMesh {
    ModelMesh {
        vertices: vec![
            vertex([-1.0, 1.0, -1.0]),
            vertex([3.0, 3.0, 7.0]),
            vertex([3.0, 1.0, -1.0]),
        ],
        indices: vec![0, 1, 2],
    }
}

fn loaded_viewer(renderer: &mut Recorder) -> Viewer {
    let mut viewer = viewer();
    let (completer, slot) = load_channel("model.glb");
    viewer.expect_model(slot);
    completer.complete(Ok(box_mesh()));
    assert_eq!(viewer.tick(DT, renderer), TickOutcome::Continue);
    viewer
}

#[test]
fn ticks_before_load_render_background_only() {
    let mut viewer = viewer();
    let mut r = Recorder::default();
    let (_completer, slot) = load_channel::<ModelMesh>("model.glb");
    viewer.expect_model(slot);

    for _ in 0..3 {
        assert_eq!(viewer.tick(DT, &mut r), TickOutcome::Continue);
    }
    assert_eq!(viewer.phase(), LoopPhase::NoObjectLoaded);
    assert_eq!(r.frames.len(), 3);
    assert!(r.frames.iter().all(|f| f.model.is_none()));
    assert_eq!(r.uploads, 0);
    assert_eq!(r.resizes, vec![(800, 600)]);
}

#[test]
fn tick_without_any_load_is_harmless() {
    let mut viewer = viewer();
    let mut r = Recorder::default();
    viewer.on_pointer_move(0.0, 0.0);
    viewer.on_wheel(100.0, WheelDeltaMode::Pixel);
    assert_eq!(viewer.tick(DT, &mut r), TickOutcome::Continue);
    assert!(r.frames[0].model.is_none());
    // Orientation only animates once a model is present
    assert_eq!(viewer.state().current.yaw, 0.0);
}

#[test]
fn completed_load_uploads_and_fits_model() {
    let mut r = Recorder::default();
    let viewer = loaded_viewer(&mut r);

    assert_eq!(viewer.phase(), LoopPhase::ObjectLoaded);
    assert_eq!(r.uploads, 1);

    let placement = viewer.state().model.expect("model placed");
    assert!((placement.normalization.scale - 0.25).abs() < 1e-6);
    assert!((placement.normalization.translation - Vec3::new(-1.0, -2.0, -3.0)).length() < 1e-5);

    // 8 * 1000 seeds the camera, then the zoom range pulls it in
    assert_eq!(viewer.state().distance, 5.0);
    assert_eq!(viewer.state().camera.eye, Vec3::new(0.0, 0.0, 5.0));

    let frame = r.frames.last().unwrap();
    let model = frame.model.expect("model drawn in the same tick");
    assert!(model.transform_point3(Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
}

#[test]
fn failed_load_keeps_rendering_background() {
    capture_logs();
    let mut viewer = viewer();
    let mut r = Recorder::default();
    let (completer, slot) = load_channel::<ModelMesh>("missing.glb");
    viewer.expect_model(slot);
    completer.complete(Err(ViewerError::asset_load("missing.glb", "404 Not Found")));

    for _ in 0..3 {
        assert_eq!(viewer.tick(DT, &mut r), TickOutcome::Continue);
    }
    assert_eq!(viewer.phase(), LoopPhase::NoObjectLoaded);
    assert_eq!(r.uploads, 0);
    assert_eq!(r.frames.len(), 3);
    assert!(r.frames.iter().all(|f| f.model.is_none()));

    let errors = captured("Error loading model:");
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(errors[0].contains("missing.glb") && errors[0].contains("404 Not Found"));
}

#[test]
fn empty_and_degenerate_meshes_are_rejected() {
    let flat_point = ModelMesh {
        vertices: vec![vertex([1.0, 1.0, 1.0]); 3],
        indices: vec![0, 1, 2],
    };
    for mesh in [ModelMesh::default(), flat_point] {
        let mut viewer = viewer();
        let mut r = Recorder::default();
        let (completer, slot) = load_channel("bad.glb");
        viewer.expect_model(slot);
        completer.complete(Ok(mesh));
        viewer.tick(DT, &mut r);

        assert_eq!(viewer.phase(), LoopPhase::NoObjectLoaded);
        assert_eq!(r.uploads, 0);
        assert!(viewer.state().model.is_none());
    }
}

#[test]
fn upload_failure_leaves_viewer_unloaded() {
    let mut viewer = viewer();
    let mut r = Recorder {
        fail_upload: true,
        ..Recorder::default()
    };
    let (completer, slot) = load_channel("model.glb");
    viewer.expect_model(slot);
    completer.complete(Ok(box_mesh()));
    viewer.tick(DT, &mut r);

    assert_eq!(viewer.phase(), LoopPhase::NoObjectLoaded);
    assert!(r.frames[0].model.is_none());
}

#[test]
fn later_loads_are_ignored_once_loaded() {
    let mut r = Recorder::default();
    let mut viewer = loaded_viewer(&mut r);

    let (completer, slot) = load_channel("other.glb");
    viewer.expect_model(slot);
    completer.complete(Ok(box_mesh()));
    viewer.tick(DT, &mut r);
    assert_eq!(r.uploads, 1);
}

#[test]
fn pointer_input_is_picked_up_on_next_tick() {
    let mut r = Recorder::default();
    let mut viewer = loaded_viewer(&mut r);

    // Right edge, vertical center
    viewer.on_pointer_move(800.0, 300.0);
    assert!((viewer.state().target.yaw - PI * 0.5).abs() < 1e-6);
    assert_eq!(viewer.state().target.pitch, 0.0);
    assert_eq!(viewer.state().current.yaw, 0.0);

    viewer.tick(DT, &mut r);
    assert!((viewer.state().current.yaw - 0.1 * PI * 0.5).abs() < 1e-6);

    for _ in 0..200 {
        viewer.tick(DT, &mut r);
    }
    assert!((viewer.state().current.yaw - PI * 0.5).abs() < 1e-4);
}

#[test]
fn wheel_moves_camera_within_range() {
    let mut r = Recorder::default();
    let mut viewer = loaded_viewer(&mut r);

    viewer.on_wheel(-2000.0, WheelDeltaMode::Pixel);
    assert!((viewer.state().distance - 4.0).abs() < 1e-5);
    viewer.tick(DT, &mut r);
    assert!((r.frames.last().unwrap().eye.z - 4.0).abs() < 1e-5);

    viewer.on_wheel(-100.0, WheelDeltaMode::Page);
    assert_eq!(viewer.state().distance, 2.0);
    viewer.on_wheel(f32::NAN, WheelDeltaMode::Pixel);
    assert_eq!(viewer.state().distance, 2.0);
}

#[test]
fn resize_reaches_renderer_once() {
    capture_logs();
    let mut r = Recorder::default();
    let mut viewer = viewer();
    viewer.tick(DT, &mut r);

    viewer.on_resize(Viewport::new(1024, 512, 2.0));
    assert!((viewer.state().camera.aspect - 2.0).abs() < 1e-6);
    viewer.tick(DT, &mut r);
    viewer.tick(DT, &mut r);
    assert_eq!(r.resizes, vec![(800, 600), (1024, 512)]);
    assert_eq!(
        captured("[render] viewport"),
        vec!["[render] viewport 800x600 @1x", "[render] viewport 1024x512 @2x"]
    );

    // A collapsed viewport is not forwarded
    viewer.on_resize(Viewport::new(0, 0, 1.0));
    viewer.tick(DT, &mut r);
    assert_eq!(r.resizes.len(), 2);
    assert!(viewer.state().camera.aspect.is_finite());
}

#[test]
fn render_errors_do_not_stop_the_loop() {
    let mut viewer = viewer();
    let mut r = Recorder {
        fail_render: true,
        ..Recorder::default()
    };
    assert_eq!(viewer.tick(DT, &mut r), TickOutcome::Continue);
    assert_eq!(viewer.tick(DT, &mut r), TickOutcome::Continue);
    assert_eq!(r.frames.len(), 2);
}

#[test]
fn stopped_viewer_renders_nothing() {
    let mut r = Recorder::default();
    let mut viewer = loaded_viewer(&mut r);
    let frames = r.frames.len();

    viewer.stop();
    assert!(viewer.is_stopped());
    assert_eq!(viewer.tick(DT, &mut r), TickOutcome::Stopped);
    assert_eq!(viewer.tick(DT, &mut r), TickOutcome::Stopped);
    assert_eq!(r.frames.len(), frames);
}

#[test]
fn invalid_config_is_rejected() {
    let config = ViewerConfig {
        min_zoom: 6.0,
        max_zoom: 5.0,
        ..ViewerConfig::default()
    };
    assert!(matches!(
        Viewer::new(config, Viewport::new(800, 600, 1.0)),
        Err(ViewerError::InvalidConfig(_))
    ));

    let config = ViewerConfig {
        smoothing_factor: 0.0,
        ..ViewerConfig::default()
    };
    assert!(Viewer::new(config, Viewport::new(800, 600, 1.0)).is_err());
}
