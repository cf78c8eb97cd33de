// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the angle computation displayed by the angle
//! tool and the proximity predicate used by the eraser.

use crate::models::annotation::{Annotation, Point};

/// Half-width of the axis-aligned box the eraser tests against, in
/// overlay pixels.
pub const ERASER_RADIUS: f64 = 20.0;

/// Angle at vertex `p2` between rays `p2->p1` and `p2->p3`, in degrees
/// normalized to `[0, 360)`.
///
/// The value is the counterclockwise sweep from the first ray to the
/// second, so reversing the point order yields the reflex complement.
pub fn angle_at_vertex(p1: Point, p2: Point, p3: Point) -> f64 {
    let radians = (p3.y - p2.y).atan2(p3.x - p2.x) - (p1.y - p2.y).atan2(p1.x - p2.x);
    let mut degrees = radians.to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    degrees
}

/// Whether `probe` lands within `radius` of any stored point of the
/// annotation, using a strict axis-aligned box test.
///
/// This is point proximity, not stroke proximity: a long line is only
/// erasable near its endpoints, never along its middle.
pub fn hit_test(annotation: &Annotation, probe: Point, radius: f64) -> bool {
    annotation
        .points
        .iter()
        .any(|p| (p.x - probe.x).abs() < radius && (p.y - probe.y).abs() < radius)
}
