use crate::config::ViewerConfig;
use crate::constants::WHEEL_LINE_PX;

/// Unit a host reports wheel deltas in (mirrors `WheelEvent.deltaMode`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDeltaMode {
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => WheelDeltaMode::Line,
            2 => WheelDeltaMode::Page,
            _ => WheelDeltaMode::Pixel,
        }
    }
}

/// Convert a wheel delta to pixels. A page is one viewport height.
#[inline]
pub fn wheel_delta_pixels(delta: f32, mode: WheelDeltaMode, page_height: f32) -> f32 {
    match mode {
        WheelDeltaMode::Pixel => delta,
        WheelDeltaMode::Line => delta * WHEEL_LINE_PX,
        WheelDeltaMode::Page => delta * page_height.max(1.0),
    }
}

/// Wheel-driven camera distance, bounded to `[min, max]`.
#[derive(Clone, Copy, Debug)]
pub struct ZoomController {
    pub speed: f32,
    pub min: f32,
    pub max: f32,
}

impl ZoomController {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            speed: config.zoom_speed,
            min: config.min_zoom,
            max: config.max_zoom,
        }
    }

    #[inline]
    pub fn clamp(&self, distance: f32) -> f32 {
        if distance.is_nan() {
            return self.max;
        }
        distance.clamp(self.min, self.max)
    }

    /// Distance after a wheel delta in pixels; positive zooms out.
    /// Non-finite deltas leave the distance as it was.
    pub fn apply(&self, distance: f32, delta_px: f32) -> f32 {
        if !delta_px.is_finite() {
            return self.clamp(distance);
        }
        self.clamp(distance + delta_px * self.speed)
    }
}
