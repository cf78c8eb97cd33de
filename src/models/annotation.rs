// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the core data structures for representing
//! measurement shapes pinned to video playback moments.

use serde::{Deserialize, Serialize};

/// A 2D point in overlay-canvas pixel space.
///
/// Coordinates are relative to the top-left corner of the playback
/// surface, in the same pixel space the pointer events arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Kind of measurement shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Angle,
    Rect,
}

/// One stored measurement shape, bound to a specific playback moment.
///
/// Point-count invariants are enforced by the constructors: `Line` and
/// `Rect` carry exactly two points (for `Rect`, diagonal corners);
/// `Angle` carries exactly three, with the vertex in the middle. The
/// timestamp is fixed at commit time and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub points: Vec<Point>,
    /// Video playback time this shape is pinned to, in seconds.
    pub timestamp: f64,
    /// Stroke color as a `#RRGGBB` hex string.
    pub color: String,
}

impl Annotation {
    /// Create a line annotation between two endpoints.
    pub fn line(a: Point, b: Point, timestamp: f64, color: &str) -> Self {
        Self {
            kind: ShapeKind::Line,
            points: vec![a, b],
            timestamp,
            color: color.to_string(),
        }
    }

    /// Create an angle annotation; `vertex` is the middle point the
    /// two rays meet at.
    pub fn angle(a: Point, vertex: Point, b: Point, timestamp: f64, color: &str) -> Self {
        Self {
            kind: ShapeKind::Angle,
            points: vec![a, vertex, b],
            timestamp,
            color: color.to_string(),
        }
    }

    /// Create a rectangle annotation from two diagonal corners.
    pub fn rect(a: Point, b: Point, timestamp: f64, color: &str) -> Self {
        Self {
            kind: ShapeKind::Rect,
            points: vec![a, b],
            timestamp,
            color: color.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_enforce_point_counts() {
        let line = Annotation::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 2.0, "#3B82F6");
        assert_eq!(line.points.len(), 2);

        let angle = Annotation::angle(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            2.0,
            "#3B82F6",
        );
        assert_eq!(angle.points.len(), 3);

        let rect = Annotation::rect(Point::new(0.0, 0.0), Point::new(4.0, 3.0), 2.0, "#3B82F6");
        assert_eq!(rect.points.len(), 2);
    }

    #[test]
    fn test_wire_format_matches_stored_rows() {
        let ann = Annotation::rect(Point::new(1.0, 2.0), Point::new(3.0, 4.0), 12.5, "#EF4444");
        let json = serde_json::to_value(&ann).unwrap();

        assert_eq!(json["type"], "rect");
        assert_eq!(json["timestamp"], 12.5);
        assert_eq!(json["color"], "#EF4444");
        assert_eq!(json["points"][0]["x"], 1.0);
        assert_eq!(json["points"][1]["y"], 4.0);
    }

    #[test]
    fn test_kind_round_trips_lowercase() {
        for (kind, name) in [
            (ShapeKind::Line, "\"line\""),
            (ShapeKind::Angle, "\"angle\""),
            (ShapeKind::Rect, "\"rect\""),
        ] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), name);
            assert_eq!(serde_json::from_str::<ShapeKind>(name).unwrap(), kind);
        }
    }
}
