//! Fitting an arbitrary model into the canonical viewing frame.
//!
//! A loaded model is recentered on the origin and uniformly scaled so its
//! largest dimension equals the configured canonical size. The same extent
//! seeds the initial camera distance.

use glam::{Mat4, Vec3};

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box enclosing `points`, or `None` when there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn largest_dimension(&self) -> f32 {
        self.size().max_element()
    }
}

/// Translate-then-scale transform that normalizes a model: `v' = scale * (v + translation)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizationTransform {
    pub translation: Vec3,
    pub scale: f32,
}

impl Default for NormalizationTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl NormalizationTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale)) * Mat4::from_translation(self.translation)
    }

    #[inline]
    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        (p + self.translation) * self.scale
    }

    /// Bounds of a box after normalization. Scale is positive so corners stay ordered.
    pub fn apply_bounds(&self, bounds: &Bounds) -> Bounds {
        Bounds {
            min: self.apply_point(bounds.min),
            max: self.apply_point(bounds.max),
        }
    }
}

/// Result of fitting one model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameFit {
    pub transform: NormalizationTransform,
    /// `largest extent * multiplier`, before clamping into the zoom range.
    pub initial_distance: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct FrameFitter {
    pub canonical_size: f32,
    pub distance_multiplier: f32,
}

impl FrameFitter {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            canonical_size: config.canonical_size,
            distance_multiplier: config.initial_distance_multiplier,
        }
    }

    /// Compute the normalization for `bounds`.
    ///
    /// Flat boxes (one or two zero dimensions) fit normally since only the
    /// largest dimension matters. A box with no extent at all, or with
    /// non-finite corners, is rejected.
    pub fn fit(&self, bounds: &Bounds) -> Result<FrameFit> {
        let size = bounds.size();
        let largest = size.max_element();
        if !size.is_finite() || !bounds.min.is_finite() || largest <= 0.0 {
            return Err(ViewerError::DegenerateBounds { size });
        }
        Ok(FrameFit {
            transform: NormalizationTransform {
                translation: -bounds.center(),
                scale: self.canonical_size / largest,
            },
            initial_distance: largest * self.distance_multiplier,
        })
    }
}
