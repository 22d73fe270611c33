//! Mutable viewer state shared by the input handlers and the render loop.
//!
//! Every field has one writer: pointer handling writes `pointer` and
//! `target`, zoom writes `distance`, resize writes `viewport` and the camera
//! aspect, and only the render loop advances `current`.

use glam::{Mat4, Vec3};

use crate::config::ViewerConfig;
use crate::constants::CAMERA_START_DISTANCE;
use crate::fit::NormalizationTransform;
use crate::orientation::{Orientation, PointerState};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(config: &ViewerConfig, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_START_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: config.fov_y_degrees.to_radians(),
            znear: config.z_near,
            zfar: config.z_far,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Place the eye on +Z at `distance` from the origin.
    pub fn set_distance(&mut self, distance: f32) {
        self.eye = Vec3::new(0.0, 0.0, distance);
    }
}

/// Output surface size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// The fitted model's placement in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelPlacement {
    pub normalization: NormalizationTransform,
}

#[derive(Clone, Debug)]
pub struct ViewerState {
    pub camera: Camera,
    pub distance: f32,
    pub viewport: Viewport,
    pub pointer: PointerState,
    pub target: Orientation,
    pub current: Orientation,
    pub model: Option<ModelPlacement>,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig, viewport: Viewport) -> Self {
        let distance = CAMERA_START_DISTANCE.max(config.min_zoom).min(config.max_zoom);
        let mut camera = Camera::new(config, viewport.aspect());
        camera.set_distance(distance);
        Self {
            camera,
            distance,
            viewport,
            pointer: PointerState::default(),
            target: Orientation::ZERO,
            current: Orientation::ZERO,
            model: None,
        }
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
        self.camera.set_distance(distance);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
    }

    /// World transform of the model: normalize, then rotate about the origin.
    pub fn model_matrix(&self) -> Option<Mat4> {
        self.model
            .map(|m| self.current.matrix() * m.normalization.matrix())
    }
}
