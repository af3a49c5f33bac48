//! Integration tests for curves, followers, particle fields and the frame loop.
//!
//! Particle content is random, so field tests check structure (lengths,
//! palette membership, signs) rather than literal values, except where a
//! fixed seed makes the run reproducible.

use pathfield::prelude::*;
use pathfield::curve::SEGMENT_COUNT;
use pathfield::{Error, FieldUpdate};

fn close(a: Vec2, b: Vec2, tol: f32) -> bool {
    a.distance(b) <= tol
}

// ============================================================================
// Curve
// ============================================================================

#[test]
fn test_curve_is_closed() {
    for (w, h, r) in [(6.0, 10.0, 2.0), (4.0, 4.0, 10.0), (12.0, 3.0, 0.5), (2.0, 5.0, 0.0)] {
        let curve = RoundedRectCurve::new(w, h, r).unwrap();
        let start = curve.get_point(0.0);
        let end = curve.get_point(1.0 - 1e-6);
        assert!(close(start, end, 1e-3 * curve.total_length()), "{}x{} r{}", w, h, r);
    }
}

#[test]
fn test_segment_boundaries_continuous() {
    let curve = RoundedRectCurve::new(6.0, 10.0, 2.0).unwrap();
    let eps = 1e-4;
    // One parameter unit is total_length of arc length.
    let tol = 2.0 * eps * curve.total_length() + 1e-4;
    for i in 0..SEGMENT_COUNT {
        let boundary = curve.cumulative()[i];
        let before = curve.get_point(boundary - eps);
        let after = curve.get_point(boundary + eps);
        assert!(
            close(before, after, tol),
            "jump at boundary {}: {:?} vs {:?}",
            i,
            before,
            after
        );
    }
}

#[test]
fn test_segment_lengths_sum_to_total() {
    let curve = RoundedRectCurve::new(6.0, 10.0, 2.0).unwrap();
    let sum: f32 = curve.segment_lengths().iter().sum();
    assert_eq!(sum, curve.total_length());
    let fractions: f32 = curve.segment_fractions().iter().sum();
    assert!((fractions - 1.0).abs() < 1e-5);
}

#[test]
fn test_radius_clamp_keeps_curve_valid() {
    let curve = RoundedRectCurve::new(4.0, 4.0, 10.0).unwrap();
    assert_eq!(curve.radius(), 2.0);
    let points = curve.sample(400);
    for pair in points.windows(2) {
        assert!(pair[0].distance(pair[1]) < 0.1);
    }
    assert!(close(points[0], curve.get_point(1.0 - 1e-6), 1e-3));
}

#[test]
fn test_configure_rejects_non_positive_dimensions() {
    assert!(matches!(
        RoundedRectCurve::new(0.0, 10.0, 1.0),
        Err(Error::InvalidDimensions { .. })
    ));
    assert!(matches!(
        RoundedRectCurve::new(6.0, -10.0, 1.0),
        Err(Error::InvalidDimensions { .. })
    ));
}

#[test]
fn test_start_point_for_reference_rectangle() {
    // 6 x 10 with r = 2: left = -1, top = -3, so the top edge is y = -5.
    let curve = RoundedRectCurve::new(6.0, 10.0, 2.0).unwrap();
    let p = curve.get_point(0.0);
    assert!(close(p, Vec2::new(-1.0, -5.0), 1e-5), "got {:?}", p);

    // Still on the straight top edge a little further along.
    let (segment, _) = curve.locate(0.01);
    assert_eq!(segment, 0);
    let q = curve.get_point(0.01);
    assert!((q.y + 5.0).abs() < 1e-5);
    assert!(q.x > p.x);
}

// ============================================================================
// Follower
// ============================================================================

#[test]
fn test_follower_preserves_order_over_full_cycle() {
    let curve = RoundedRectCurve::new(6.0, 10.0, 2.0).unwrap();
    let config = FollowerConfig {
        count: 20,
        spacing: 0.05,
        speed: 0.1,
    };
    let mut follower = PathFollower::new(curve, config).unwrap();

    for _ in 0..200 {
        follower.advance(0.05);
        let params = follower.parameters();
        let head = params[0];
        // Distance behind the head, measured backwards along the path.
        let behind: Vec<f32> = params[1..]
            .iter()
            .map(|p| (head - p).rem_euclid(1.0))
            .collect();
        assert!(behind[0] > 0.0);
        for (i, pair) in behind.windows(2).enumerate() {
            assert!(pair[0] < pair[1], "marker {} overtook marker {}", i + 2, i + 1);
        }
    }
}

// ============================================================================
// Particle field
// ============================================================================

#[test]
fn test_field_structure() {
    let params = FieldParams::default().with_count(5000);
    let palette = Palette::default();
    let sizes = SizePalette::default();
    let field = ParticleField::generate(&params, &palette, &sizes).unwrap();
    let b = field.buffers();

    assert_eq!(b.len(), 5000);
    assert_eq!(b.positions.len(), 5000 * 3);
    assert_eq!(b.colors.len(), 5000 * 3);
    assert_eq!(b.sizes.len(), 5000);
    assert_eq!(b.speeds.len(), 5000);
    assert_eq!(b.jitter.len(), 5000 * 3);

    for i in 0..b.len() {
        assert!(sizes.contains(b.sizes[i]));
        assert!(palette.contains(b.color(i)));
        assert!(b.jitter(i).min_element() >= 0.0);
    }
}

#[test]
fn test_field_uses_every_palette_entry() {
    let params = FieldParams::default().with_count(5000).with_seed(77);
    let palette = Palette::default();
    let sizes = SizePalette::default();
    let field = ParticleField::generate(&params, &palette, &sizes).unwrap();
    let b = field.buffers();
    for color in palette.colors() {
        assert!((0..b.len()).any(|i| b.color(i) == *color));
    }
    for size in sizes.sizes() {
        assert!(b.sizes.contains(size));
    }
}

#[test]
fn test_update_is_time_deterministic() {
    let params = FieldParams::default().with_count(2000);
    let mut field =
        ParticleField::generate(&params, &Palette::default(), &SizePalette::default()).unwrap();
    assert_eq!(field.update(8.25), FieldUpdate::Positions);
    let first = field.buffers().positions.clone();
    field.update(100.0);
    field.update(8.25);
    assert_eq!(field.buffers().positions, first);
}

// ============================================================================
// Frame driver
// ============================================================================

fn driver_with(count: u32) -> FrameDriver<RecordingRenderer> {
    let config = SceneConfig {
        field: Some(FieldParams::default().with_count(count).with_seed(1)),
        ..SceneConfig::default()
    };
    FrameDriver::new(config, RecordingRenderer::new()).unwrap()
}

#[test]
fn test_regeneration_releases_previous_field() {
    let mut driver = driver_with(300);
    let first = driver.state().field().unwrap().handle;

    let second = driver
        .regenerate(FieldParams::default().with_count(600).with_seed(2))
        .unwrap();

    let renderer = driver.renderer();
    assert_eq!(renderer.live_fields(), vec![second]);
    assert!(renderer.field(first).is_none());
    assert_eq!(renderer.released, vec![first]);
    assert_eq!(renderer.field(second).unwrap().buffers.len(), 600);
}

#[test]
fn test_invalid_edit_leaves_previous_state() {
    let mut driver = driver_with(300);
    driver.tick(1.0);
    let handle = driver.state().field().unwrap().handle;

    let bad = FieldParams::default().with_radius(-3.0);
    assert!(driver.regenerate(bad).is_err());

    driver.tick(2.0);
    assert_eq!(driver.state().field().unwrap().handle, handle);
    assert_eq!(driver.renderer().live_fields(), vec![handle]);
    assert_eq!(driver.renderer().last_frame().unwrap().particles, 300);
}

#[test]
fn test_replayed_frames_match() {
    let mut a = driver_with(500).with_time(Time::fixed(1.0 / 60.0));
    let mut b = driver_with(500).with_time(Time::fixed(1.0 / 60.0));
    for _ in 0..120 {
        a.frame();
        b.frame();
    }
    let handle_a = a.state().field().unwrap().handle;
    let handle_b = b.state().field().unwrap().handle;
    assert_eq!(
        a.renderer().field(handle_a).unwrap().buffers.positions,
        b.renderer().field(handle_b).unwrap().buffers.positions
    );
    assert_eq!(a.renderer().markers, b.renderer().markers);
    assert_eq!(a.renderer().frames.len(), 120);
}

#[test]
fn test_spiral_scene_rotates_without_moving_particles() {
    let params = FieldParams::default()
        .with_count(1000)
        .with_spiral(4, 2.0)
        .with_seed(3);
    let mut driver =
        FrameDriver::new(SceneConfig::field_only(params), RecordingRenderer::new()).unwrap();
    let handle = driver.state().field().unwrap().handle;
    let initial = driver.renderer().field(handle).unwrap().buffers.positions.clone();

    driver.tick(50.0);

    let recorded = driver.renderer().field(handle).unwrap();
    assert_eq!(recorded.buffers.positions, initial);
    assert_eq!(recorded.position_updates, 0);
    assert!((recorded.rotation_y - 1.0).abs() < 1e-5);
    assert!(driver.renderer().markers.is_empty());
}
