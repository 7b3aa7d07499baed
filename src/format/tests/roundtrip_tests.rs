//! Save-then-load round trips.

use tempfile::TempDir;

use crate::format::{load, save};
use crate::model::{AnnotationSet, Label, Point, Quad, complete_quad};

fn roundtrip(set: &AnnotationSet) -> AnnotationSet {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("labels").join("img.txt");
    save(&path, set).unwrap();
    let report = load(&path).unwrap();
    assert!(!report.has_warnings());
    report.annotations
}

#[test]
fn test_empty_set_roundtrip() {
    assert_eq!(roundtrip(&AnnotationSet::new()), AnnotationSet::new());
}

#[test]
fn test_completed_quads_roundtrip_in_order() {
    let mut set = AnnotationSet::new();
    let clicks = [
        ((10, 10), (10, 50), (30, 50)),
        ((0, 0), (1, 2), (5, 1)),
        ((100, 40), (160, 120), (90, 170)),
        ((-20, -20), (-20, 15), (-55, 5)),
    ];
    for (i, (a, b, c)) in clicks.into_iter().enumerate() {
        let quad = complete_quad(
            Point::new(a.0, a.1),
            Point::new(b.0, b.1),
            Point::new(c.0, c.1),
        )
        .unwrap();
        set.push(quad, Label::new(format!("class_{}", i)).unwrap());
    }

    assert_eq!(roundtrip(&set), set);
}

#[test]
fn test_extreme_coordinates_roundtrip() {
    let mut set = AnnotationSet::new();
    set.push(
        Quad::from_points([
            Point::new(i32::MIN, i32::MAX),
            Point::new(0, -1),
            Point::new(i32::MAX, 0),
            Point::new(-7, i32::MIN),
        ]),
        Label::new("edge-case").unwrap(),
    );
    assert_eq!(roundtrip(&set), set);
}

#[test]
fn test_unicode_label_roundtrip() {
    let mut set = AnnotationSet::new();
    set.push(
        Quad::from_points([
            Point::new(1, 1),
            Point::new(1, 4),
            Point::new(4, 4),
            Point::new(4, 1),
        ]),
        Label::new("自転車").unwrap(),
    );
    assert_eq!(roundtrip(&set), set);
}
