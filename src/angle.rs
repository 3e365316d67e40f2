//! Joint-angle geometry
//!
//! Computes the included angle at the middle joint of a three-joint chain,
//! folded onto a single [0, 180] degree scale so the result represents
//! flexion/extension regardless of limb orientation in the image plane.

use crate::landmarks::Point;

/// Included angle at `p2` between the rays p2→p1 and p2→p3, in degrees
///
/// The signed difference of the two polar angles is taken, converted to
/// degrees, made absolute and folded back into [0, 180]. Any finite input
/// produces a finite output; coincident points yield 0.
pub fn included_angle(p1: Point, p2: Point, p3: Point) -> f64 {
    let radians = (p3.y - p2.y).atan2(p3.x - p2.x) - (p1.y - p2.y).atan2(p1.x - p2.x);
    let degrees = radians.to_degrees().abs();
    let folded = if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    };
    // atan2 is defined for zero vectors, but guard the exact-coincidence case
    if folded.is_finite() {
        folded
    } else {
        0.0
    }
}
