// Host-side tests for frame fitting.

use glam::Vec3;
use viewer_core::{Bounds, FrameFitter, ViewerConfig, ViewerError};

const EPS: f32 = 1e-5;

fn fitter() -> FrameFitter {
    FrameFitter::new(&ViewerConfig::default())
}

#[test]
fn fitted_bounds_are_centered_and_canonical() {
    let boxes = [
        (Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 2.0, 8.0)),
        (Vec3::new(-50.0, 0.0, 12.5), Vec3::new(300.0, 10.0, 0.5)),
        (Vec3::ZERO, Vec3::new(0.001, 0.002, 0.0005)),
        (Vec3::new(7.0, -7.0, 7.0), Vec3::splat(1.0)),
    ];
    for (center, size) in boxes {
        let bounds = Bounds::from_center_size(center, size);
        let fit = fitter().fit(&bounds).expect("non-degenerate box fits");
        let fitted = fit.transform.apply_bounds(&bounds);

        assert!(fitted.center().length() < 1e-3, "center {:?}", fitted.center());
        let largest = fitted.largest_dimension();
        assert!(
            (largest - 2.0).abs() < 1e-4,
            "largest dimension {} for size {:?}",
            largest,
            size
        );
    }
}

#[test]
fn matrix_agrees_with_point_transform() {
    let bounds = Bounds::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 2.0, 8.0));
    let fit = fitter().fit(&bounds).unwrap();
    let m = fit.transform.matrix();
    for p in [bounds.min, bounds.max, bounds.center()] {
        let a = m.transform_point3(p);
        let b = fit.transform.apply_point(p);
        assert!((a - b).length() < EPS);
    }
    // The box center lands on the origin, not merely shifted by -center before scaling
    assert!(m.transform_point3(bounds.center()).length() < EPS);
}

#[test]
fn flat_model_fits_on_its_nonzero_dimensions() {
    // A plane with no depth
    let bounds = Bounds::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::new(6.0, 3.0, 0.0));
    let fit = fitter().fit(&bounds).unwrap();
    assert!((fit.transform.scale - 2.0 / 6.0).abs() < EPS);
    assert!((fit.initial_distance - 6.0 * 1000.0).abs() < 1e-2);

    // A line segment
    let bounds = Bounds::from_center_size(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0));
    let fit = fitter().fit(&bounds).unwrap();
    assert!((fit.transform.scale - 0.5).abs() < EPS);
}

#[test]
fn zero_extent_is_rejected() {
    let bounds = Bounds::from_center_size(Vec3::new(3.0, 3.0, 3.0), Vec3::ZERO);
    match fitter().fit(&bounds) {
        Err(ViewerError::DegenerateBounds { size }) => assert_eq!(size, Vec3::ZERO),
        other => panic!("expected DegenerateBounds, got {:?}", other),
    }
}

#[test]
fn non_finite_extent_is_rejected() {
    let bounds = Bounds {
        min: Vec3::new(0.0, 0.0, 0.0),
        max: Vec3::new(f32::INFINITY, 1.0, 1.0),
    };
    assert!(matches!(
        fitter().fit(&bounds),
        Err(ViewerError::DegenerateBounds { .. })
    ));

    let bounds = Bounds {
        min: Vec3::new(f32::NAN, 0.0, 0.0),
        max: Vec3::new(1.0, 1.0, 1.0),
    };
    assert!(matches!(
        fitter().fit(&bounds),
        Err(ViewerError::DegenerateBounds { .. })
    ));
}

#[test]
fn bounds_from_points() {
    assert!(Bounds::from_points(std::iter::empty()).is_none());

    let b = Bounds::from_points([
        Vec3::new(1.0, -2.0, 0.5),
        Vec3::new(-1.0, 4.0, 0.0),
        Vec3::new(0.0, 0.0, 3.0),
    ])
    .unwrap();
    assert_eq!(b.min, Vec3::new(-1.0, -2.0, 0.0));
    assert_eq!(b.max, Vec3::new(1.0, 4.0, 3.0));
    assert_eq!(b.size(), Vec3::new(2.0, 6.0, 3.0));
    assert_eq!(b.center(), Vec3::new(0.0, 1.0, 1.5));
}

#[test]
fn custom_canonical_size_and_multiplier() {
    let config = ViewerConfig {
        canonical_size: 3.0,
        initial_distance_multiplier: 2.5,
        ..ViewerConfig::default()
    };
    let fit = FrameFitter::new(&config)
        .fit(&Bounds::from_center_size(Vec3::ZERO, Vec3::new(1.0, 1.5, 0.5)))
        .unwrap();
    assert!((fit.transform.scale - 2.0).abs() < EPS);
    assert!((fit.initial_distance - 3.75).abs() < EPS);
}
