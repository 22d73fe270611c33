//! The render loop driver and the controller that owns all viewer state.

use std::time::Duration;

use crate::config::ViewerConfig;
use crate::constants::BACKGROUND_RGB;
use crate::error::{Result, ViewerError};
use crate::fit::{FrameFit, FrameFitter};
use crate::load::LoadSlot;
use crate::mesh::ModelMesh;
use crate::orientation::{MotionSmoother, PointerOrientation, PointerState};
use crate::scene::{srgb_to_linear, FrameView, Lighting, SceneRenderer};
use crate::state::{ModelPlacement, ViewerState, Viewport};
use crate::zoom::{wheel_delta_pixels, WheelDeltaMode, ZoomController};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    NoObjectLoaded,
    ObjectLoaded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stopped,
}

/// Owns the viewer state and drives it once per display refresh.
///
/// Input handlers call the `on_*` methods; the host's frame callback calls
/// [`Viewer::tick`]. Everything runs on one thread.
pub struct Viewer {
    state: ViewerState,
    phase: LoopPhase,
    fitter: FrameFitter,
    pointer: PointerOrientation,
    smoother: MotionSmoother,
    zoom: ZoomController,
    lighting: Lighting,
    pending: Option<LoadSlot<ModelMesh>>,
    rendered_size: Option<(u32, u32)>,
    stopped: bool,
}

impl Viewer {
    pub fn new(config: ViewerConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: ViewerState::new(&config, viewport),
            phase: LoopPhase::NoObjectLoaded,
            fitter: FrameFitter::new(&config),
            pointer: PointerOrientation::new(&config),
            smoother: MotionSmoother::new(&config),
            zoom: ZoomController::new(&config),
            lighting: Lighting::default(),
            pending: None,
            rendered_size: None,
            stopped: false,
        })
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Watch `slot` for the model. A second call replaces an unfinished load.
    pub fn expect_model(&mut self, slot: LoadSlot<ModelMesh>) {
        if self.phase == LoopPhase::ObjectLoaded {
            log::warn!("[load] model already loaded; ignoring further loads");
            return;
        }
        self.pending = Some(slot);
    }

    pub fn on_pointer_move(&mut self, px: f32, py: f32) {
        let vp = self.state.viewport;
        let pointer = PointerState::from_pixels(px, py, vp.width as f32, vp.height as f32);
        self.state.pointer = pointer;
        self.state.target = self.pointer.target_for(pointer);
    }

    pub fn on_wheel(&mut self, delta: f32, mode: WheelDeltaMode) {
        let px = wheel_delta_pixels(delta, mode, self.state.viewport.height as f32);
        let distance = self.zoom.apply(self.state.distance, px);
        log::debug!("[input] wheel {:.1}px distance={:.3}", px, distance);
        self.state.set_distance(distance);
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.state.set_viewport(viewport);
    }

    /// Stop ticking. Later ticks render nothing and report `Stopped`.
    pub fn stop(&mut self) {
        if !self.stopped {
            log::info!("[loop] stopped");
        }
        self.stopped = true;
        self.pending = None;
    }

    /// One display refresh: pick up a finished load, smooth, render.
    pub fn tick<R>(&mut self, dt: Duration, renderer: &mut R) -> TickOutcome
    where
        R: SceneRenderer + ?Sized,
    {
        if self.stopped {
            return TickOutcome::Stopped;
        }
        self.poll_load(renderer);

        let vp = self.state.viewport;
        let size = (vp.width, vp.height);
        if self.rendered_size != Some(size) && size.0 > 0 && size.1 > 0 {
            log::info!("[render] viewport {}x{} @{}x", vp.width, vp.height, vp.pixel_ratio);
            renderer.resize(size.0, size.1);
            self.rendered_size = Some(size);
        }

        if self.phase == LoopPhase::ObjectLoaded {
            let target = self.state.target;
            self.smoother.step(&mut self.state.current, target, dt);
        }

        if let Err(e) = renderer.render(&self.frame_view()) {
            log::error!("[render] {:?}", e);
        }
        TickOutcome::Continue
    }

    pub fn frame_view(&self) -> FrameView {
        FrameView {
            view_proj: self.state.camera.view_projection(),
            model: self.state.model_matrix(),
            eye: self.state.camera.eye,
            lighting: self.lighting,
            clear_color: srgb_to_linear(BACKGROUND_RGB),
        }
    }

    fn poll_load<R>(&mut self, renderer: &mut R)
    where
        R: SceneRenderer + ?Sized,
    {
        let Some(result) = self.pending.as_ref().and_then(LoadSlot::take_ready) else {
            return;
        };
        self.pending = None;
        match result.and_then(|mesh| self.install(mesh, renderer)) {
            Ok(fit) => {
                log::info!(
                    "[fit] scale={:.4} translation={} distance={:.2}",
                    fit.transform.scale,
                    fit.transform.translation,
                    self.state.distance
                );
            }
            Err(e) => log::error!("Error loading model: {}", e),
        }
    }

    fn install<R>(&mut self, mesh: ModelMesh, renderer: &mut R) -> Result<FrameFit>
    where
        R: SceneRenderer + ?Sized,
    {
        let bounds = mesh.bounds().ok_or(ViewerError::EmptyModel)?;
        let fit = self.fitter.fit(&bounds)?;
        renderer
            .upload_model(&mesh)
            .map_err(|e| ViewerError::asset_load("<gpu upload>", format!("{e:#}")))?;
        self.apply_fit(&fit);
        Ok(fit)
    }

    /// Place the model and seed the camera. The seed is clamped into the
    /// zoom range like any other distance change.
    fn apply_fit(&mut self, fit: &FrameFit) {
        self.state.model = Some(ModelPlacement {
            normalization: fit.transform,
        });
        let distance = self.zoom.clamp(fit.initial_distance);
        self.state.set_distance(distance);
        self.phase = LoopPhase::ObjectLoaded;
    }
}
