//! End-to-end tests for the heatmap render pipeline.

use heatmap_renderer::{render, RenderError};
use wifi_common::SamplePoint;

fn decode(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory(png)
        .expect("render must produce a decodable PNG")
        .to_rgba8()
}

// ============================================================================
// Empty input
// ============================================================================

#[test]
fn test_empty_points_is_fully_transparent() {
    let png = render(&[], 120, 80).unwrap();
    let img = decode(&png);

    assert_eq!((img.width(), img.height()), (120, 80));
    assert!(
        img.pixels().all(|p| p.0[3] == 0),
        "empty input must yield alpha = 0 everywhere"
    );
}

// ============================================================================
// Dimension handling
// ============================================================================

#[test]
fn test_zero_dimensions_rejected() {
    assert!(matches!(
        render(&[], 0, 100),
        Err(RenderError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        render(&[SamplePoint::new(5.0, 5.0, -50)], 100, 0),
        Err(RenderError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_output_matches_requested_size_small() {
    let points = [SamplePoint::new(50.0, 50.0, -55)];
    let img = decode(&render(&points, 64, 48).unwrap());
    assert_eq!((img.width(), img.height()), (64, 48));
}

#[test]
fn test_output_matches_requested_size_above_grid_cap() {
    // 400x300 exceeds the internal evaluation grid, forcing the Lanczos
    // resample path; the output must still be exactly the requested size.
    let points = [
        SamplePoint::new(20.0, 20.0, -45),
        SamplePoint::new(80.0, 70.0, -80),
    ];
    let img = decode(&render(&points, 400, 300).unwrap());
    assert_eq!((img.width(), img.height()), (400, 300));
}

// ============================================================================
// Visual semantics
// ============================================================================

/// Mean color over a small window centered on a pixel, counting only
/// non-transparent pixels.
fn mean_color(img: &image::RgbaImage, cx: u32, cy: u32, radius: u32) -> (f64, f64, f64) {
    let (mut r, mut g, mut b, mut n) = (0.0, 0.0, 0.0, 0.0);
    for y in cy.saturating_sub(radius)..=(cy + radius).min(img.height() - 1) {
        for x in cx.saturating_sub(radius)..=(cx + radius).min(img.width() - 1) {
            let p = img.get_pixel(x, y).0;
            if p[3] > 0 {
                r += p[0] as f64;
                g += p[1] as f64;
                b += p[2] as f64;
                n += 1.0;
            }
        }
    }
    (r / n, g / n, b / n)
}

#[test]
fn test_two_point_scenario_ramp_direction() {
    // Strong signal at (10,10), weak at (90,90), per the documented
    // convention: strong = cool blue end, weak = warm red end.
    let points = [
        SamplePoint::new(10.0, 10.0, -40),
        SamplePoint::new(90.0, 90.0, -85),
    ];
    let img = decode(&render(&points, 200, 200).unwrap());

    assert_eq!((img.width(), img.height()), (200, 200));
    assert!(
        img.pixels().any(|p| p.0[3] > 0),
        "heatmap must contain visible pixels"
    );

    // Logical (10,10) maps to pixel (~20,~20) at 200x200; (90,90) to (~180,~180)
    let (sr, _, sb) = mean_color(&img, 20, 20, 3);
    let (wr, _, wb) = mean_color(&img, 180, 180, 3);

    assert!(sb > sr, "strong-signal region must be blue-dominant");
    assert!(wr > wb, "weak-signal region must be red-dominant");
}

#[test]
fn test_vertical_orientation_pinned() {
    // Strong sample near logical y = 0 must color the TOP of the image.
    let points = [
        SamplePoint::new(50.0, 5.0, -35),
        SamplePoint::new(50.0, 95.0, -88),
    ];
    let img = decode(&render(&points, 100, 100).unwrap());

    let (_, _, top_b) = mean_color(&img, 50, 5, 2);
    let (_, _, bottom_b) = mean_color(&img, 50, 95, 2);
    assert!(
        top_b > bottom_b,
        "logical y = 0 must land at the top row of the image"
    );
}

#[test]
fn test_heatmap_is_semi_transparent() {
    let points = [SamplePoint::new(50.0, 50.0, -50)];
    let img = decode(&render(&points, 50, 50).unwrap());

    // Alpha blending factor is fixed below full opacity
    for p in img.pixels() {
        assert!(p.0[3] < 255);
        assert!(p.0[3] > 0);
    }
}

// ============================================================================
// Robustness
// ============================================================================

#[test]
fn test_duplicate_coordinates_do_not_fail() {
    let points = [
        SamplePoint::new(40.0, 40.0, -35),
        SamplePoint::new(40.0, 40.0, -85),
        SamplePoint::new(60.0, 60.0, -60),
    ];
    let png = render(&points, 100, 100).expect("duplicates must not break rendering");
    let img = decode(&png);
    assert_eq!((img.width(), img.height()), (100, 100));
}

#[test]
fn test_out_of_range_rssi_still_renders() {
    let points = [
        SamplePoint::new(25.0, 25.0, -5), // stronger than the reference max
        SamplePoint::new(75.0, 75.0, -120), // weaker than the reference min
    ];
    let img = decode(&render(&points, 80, 80).unwrap());
    assert_eq!((img.width(), img.height()), (80, 80));
}

#[test]
fn test_render_is_idempotent() {
    let points = [
        SamplePoint::new(15.0, 30.0, -48),
        SamplePoint::new(70.0, 60.0, -77),
        SamplePoint::new(45.0, 85.0, -62),
    ];
    let a = render(&points, 150, 150).unwrap();
    let b = render(&points, 150, 150).unwrap();
    assert_eq!(a, b, "identical inputs must produce identical bytes");
}
