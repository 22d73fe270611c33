use crate::constants::*;
use crate::error::{Result, ViewerError};

/// How the motion smoother treats elapsed time between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SmoothingMode {
    #[default]
    /// Close a fixed fraction of the gap every tick. Perceived speed scales
    /// with the display refresh rate.
    PerFrame,
    /// Rescale the factor to elapsed time so that one tick of
    /// `1 / reference_hz` seconds matches `PerFrame`.
    TimeNormalized { reference_hz: f32 },
}

impl SmoothingMode {
    /// Time-normalized smoothing tuned at the default reference rate.
    pub fn time_normalized() -> Self {
        SmoothingMode::TimeNormalized {
            reference_hz: SMOOTHING_REFERENCE_HZ,
        }
    }
}

/// Tunables for fitting, orbit, smoothing, zoom and projection.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub canonical_size: f32,
    pub initial_distance_multiplier: f32,
    pub sensitivity: f32,
    pub smoothing_factor: f32,
    pub smoothing_mode: SmoothingMode,
    pub zoom_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canonical_size: CANONICAL_SIZE,
            initial_distance_multiplier: INITIAL_DISTANCE_MULTIPLIER,
            sensitivity: POINTER_SENSITIVITY,
            smoothing_factor: SMOOTHING_FACTOR,
            smoothing_mode: SmoothingMode::PerFrame,
            zoom_speed: ZOOM_SPEED,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            fov_y_degrees: CAMERA_FOV_Y_DEGREES,
            z_near: CAMERA_Z_NEAR,
            z_far: CAMERA_Z_FAR,
        }
    }
}

impl ViewerConfig {
    /// Reject values outside the domains the controllers assume.
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: String) -> Result<()> {
            Err(ViewerError::InvalidConfig(msg))
        }
        if !(self.canonical_size.is_finite() && self.canonical_size > 0.0) {
            return invalid(format!("canonical_size must be > 0, got {}", self.canonical_size));
        }
        if !(self.initial_distance_multiplier.is_finite() && self.initial_distance_multiplier > 0.0)
        {
            return invalid(format!(
                "initial_distance_multiplier must be > 0, got {}",
                self.initial_distance_multiplier
            ));
        }
        if !self.sensitivity.is_finite() {
            return invalid(format!("sensitivity must be finite, got {}", self.sensitivity));
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return invalid(format!(
                "smoothing_factor must be in (0, 1], got {}",
                self.smoothing_factor
            ));
        }
        if let SmoothingMode::TimeNormalized { reference_hz } = self.smoothing_mode {
            if !(reference_hz.is_finite() && reference_hz > 0.0) {
                return invalid(format!("reference_hz must be > 0, got {reference_hz}"));
            }
        }
        if !self.zoom_speed.is_finite() {
            return invalid(format!("zoom_speed must be finite, got {}", self.zoom_speed));
        }
        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite())
            || self.min_zoom <= 0.0
            || self.min_zoom > self.max_zoom
        {
            return invalid(format!(
                "zoom range must satisfy 0 < min <= max, got [{}, {}]",
                self.min_zoom, self.max_zoom
            ));
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return invalid(format!("fov_y_degrees must be in (0, 180), got {}", self.fov_y_degrees));
        }
        if !(self.z_near > 0.0 && self.z_far > self.z_near) {
            return invalid(format!(
                "clip planes must satisfy 0 < near < far, got {} / {}",
                self.z_near, self.z_far
            ));
        }
        Ok(())
    }
}
