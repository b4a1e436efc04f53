//! Tests for BoundingBox operations.

use radar_common::bbox::{BboxParseError, BoundingBox};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_copy() {
    let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let bbox2 = bbox1;
    assert_eq!(bbox1, bbox2);
}

#[test]
fn test_from_corners_with_flipped_y() {
    // Upper-left / lower-right ordering as found in some area attributes
    let bbox = BoundingBox::from_corners(-10.0, 60.0, 30.0, 50.0);
    assert_eq!(bbox, BoundingBox::new(-10.0, 50.0, 30.0, 60.0));
}

// ============================================================================
// from_csv_string tests
// ============================================================================

#[test]
fn test_parse_floating() {
    let bbox = BoundingBox::from_csv_string("-125.5,24.75,-66.25,50.125").unwrap();
    assert!((bbox.min_x - (-125.5)).abs() < 0.001);
    assert!((bbox.min_y - 24.75).abs() < 0.001);
    assert!((bbox.max_x - (-66.25)).abs() < 0.001);
    assert!((bbox.max_y - 50.125).abs() < 0.001);
}

#[test]
fn test_parse_with_whitespace() {
    let bbox = BoundingBox::from_csv_string(" 6, 51.3 ,49 ,70.2").unwrap();
    assert_eq!(bbox, BoundingBox::new(6.0, 51.3, 49.0, 70.2));
}

#[test]
fn test_parse_scientific_notation() {
    let bbox = BoundingBox::from_csv_string("1e-6,2e-6,1e6,2e6").unwrap();
    assert!((bbox.min_x - 1e-6).abs() < 1e-10);
    assert!((bbox.max_x - 1e6).abs() < 0.001);
}

#[test]
fn test_parse_too_few_values() {
    let result = BoundingBox::from_csv_string("0,0,100");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_too_many_values() {
    let result = BoundingBox::from_csv_string("0,0,100,100,5");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_invalid_number() {
    let result = BoundingBox::from_csv_string("0,abc,100,100");
    assert!(matches!(result, Err(BboxParseError::InvalidNumber(_))));
}

// ============================================================================
// Geometry tests
// ============================================================================

#[test]
fn test_width_height_center() {
    let bbox = BoundingBox::new(-250_000.0, -100_000.0, 250_000.0, 300_000.0);
    assert_eq!(bbox.width(), 500_000.0);
    assert_eq!(bbox.height(), 400_000.0);
    assert_eq!(bbox.center(), (0.0, 100_000.0));
}

#[test]
fn test_contains_point_edges() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains_point(0.0, 0.0));
    assert!(bbox.contains_point(10.0, 10.0));
    assert!(bbox.contains_point(5.0, 5.0));
    assert!(!bbox.contains_point(-0.1, 5.0));
    assert!(!bbox.contains_point(5.0, 10.1));
}

#[test]
fn test_approx_eq() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(0.0005, 0.0, 10.0, 9.9995);
    assert!(a.approx_eq(&b, 0.001));
    assert!(!a.approx_eq(&b, 0.0001));
}
