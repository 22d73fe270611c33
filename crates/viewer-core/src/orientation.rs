use std::f32::consts::PI;
use std::time::Duration;

use glam::{EulerRot, Mat4};

use crate::config::{SmoothingMode, ViewerConfig};

/// Model rotation as two angles in radians.
///
/// `yaw` turns about the vertical (Y) axis, `pitch` about the horizontal (X) axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub const ZERO: Self = Self { yaw: 0.0, pitch: 0.0 };

    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Rotation matrix in XYZ Euler order (pitch first, then yaw).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }

    /// Largest per-axis distance to `other`.
    pub fn gap(&self, other: &Orientation) -> f32 {
        (self.yaw - other.yaw).abs().max((self.pitch - other.pitch).abs())
    }
}

/// Pointer position normalized to `[-1, 1]` on both axes, origin at the viewport center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub nx: f32,
    pub ny: f32,
}

impl PointerState {
    /// Normalize a pixel position. Zero-sized viewports count as 1 px so
    /// the mapping stays total.
    pub fn from_pixels(px: f32, py: f32, width: f32, height: f32) -> Self {
        let w = width.max(1.0);
        let h = height.max(1.0);
        Self {
            nx: normalize_axis(px, w),
            ny: normalize_axis(py, h),
        }
    }
}

#[inline]
fn normalize_axis(p: f32, extent: f32) -> f32 {
    let n = (p / extent) * 2.0 - 1.0;
    if n.is_finite() {
        n.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Maps pointer position to a target orientation.
///
/// Screen Y grows downward and so does pitch: moving the pointer down tilts
/// the model in the same sense every time. Do not invert it.
#[derive(Clone, Copy, Debug)]
pub struct PointerOrientation {
    pub sensitivity: f32,
}

impl PointerOrientation {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            sensitivity: config.sensitivity,
        }
    }

    pub fn target_for(&self, pointer: PointerState) -> Orientation {
        let k = PI * self.sensitivity;
        Orientation {
            yaw: pointer.nx * k,
            pitch: pointer.ny * k,
        }
    }
}

/// Exponential smoothing of the displayed orientation toward its target.
#[derive(Clone, Copy, Debug)]
pub struct MotionSmoother {
    pub factor: f32,
    pub mode: SmoothingMode,
}

impl MotionSmoother {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            factor: config.smoothing_factor,
            mode: config.smoothing_mode,
        }
    }

    /// Fraction of the remaining gap closed by a tick lasting `dt`.
    pub fn effective_factor(&self, dt: Duration) -> f32 {
        match self.mode {
            SmoothingMode::PerFrame => self.factor,
            SmoothingMode::TimeNormalized { reference_hz } => {
                let frames = dt.as_secs_f32() * reference_hz;
                (1.0 - (1.0 - self.factor).powf(frames)).clamp(0.0, 1.0)
            }
        }
    }

    /// Advance `current` one tick toward `target`.
    pub fn step(&self, current: &mut Orientation, target: Orientation, dt: Duration) {
        let a = self.effective_factor(dt);
        current.yaw += (target.yaw - current.yaw) * a;
        current.pitch += (target.pitch - current.pitch) * a;
    }
}
