use stage_shooter::collision::*;

use speculoos::prelude::*;

// ── intersects ────────────────────────────────────────────────────────────────

#[test]
fn overlapping_boxes_collide() {
    assert!(intersects(0, 0, 10, 10, 5, 5, 10, 10));
}

#[test]
fn touching_edges_do_not_collide() {
    // Right edge of A == left edge of B
    assert!(!intersects(0, 0, 10, 10, 10, 0, 10, 10));
    // Bottom edge of A == top edge of B
    assert!(!intersects(0, 0, 10, 10, 0, 10, 10, 10));
}

#[test]
fn one_pixel_overlap_collides() {
    assert!(intersects(0, 0, 10, 10, 9, 9, 10, 10));
}

#[test]
fn containment_collides() {
    assert!(intersects(0, 0, 100, 100, 40, 40, 6, 16));
    assert!(intersects(40, 40, 6, 16, 0, 0, 100, 100));
}

#[test]
fn far_apart_boxes_miss() {
    assert!(!intersects(0, 0, 10, 10, 500, 500, 10, 10));
}

#[test]
fn intersects_is_symmetric() {
    let boxes = [
        (0, 0, 10, 10),
        (5, 5, 10, 10),
        (10, 0, 10, 10),
        (-8, 3, 12, 4),
        (2, -20, 6, 16),
        (9, 9, 1, 1),
        (3, 12, 40, 2),
    ];
    for &(ax, ay, aw, ah) in &boxes {
        for &(bx, by, bw, bh) in &boxes {
            assert_eq!(
                intersects(ax, ay, aw, ah, bx, by, bw, bh),
                intersects(bx, by, bw, bh, ax, ay, aw, ah),
                "A=({ax},{ay},{aw},{ah}) B=({bx},{by},{bw},{bh})"
            );
        }
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_helpers() {
    let r = Rect::new(10, 20, 30, 40);
    assert_that(&r.center_x()).is_equal_to(25);
    assert_that(&r.bottom()).is_equal_to(60);
}

#[test]
fn rect_intersects_matches_free_function() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(10, 5, 10, 10);
    let c = Rect::new(9, 5, 10, 10);
    assert_that(&a.intersects(&b)).is_false();
    assert_that(&a.intersects(&c)).is_true();
}
