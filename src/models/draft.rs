// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing interaction state machine.
//!
//! Tracks in-progress point capture per tool and emits completed
//! annotations. The draft lives only here: it is cleared on tool
//! change, commit, or explicit reset, and committed shapes always carry
//! the exact point count their kind requires, so malformed shapes are
//! unrepresentable downstream.
//!
//! Capture rules per tool:
//! - Line / Rect: press anchors the first point, motion previews the
//!   second, release commits. A press released without motion captures
//!   nothing and the draft is discarded.
//! - Angle: each click (or press) fixes one point; pointer motion only
//!   moves a transient preview vertex. The third fixed point commits.
//! - Eraser: no capture at all; a click requests an erase at that spot.

use super::annotation::{Annotation, Point};

/// Drawing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Line,
    Angle,
    Rect,
    Eraser,
}

/// Pointer event delivered by the overlay surface, in overlay pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button went down and the pointer started moving (drag gestures).
    Pressed(Point),
    /// Pointer moved, button state irrelevant.
    Moved(Point),
    /// Button released at the end of a drag gesture.
    Released(Point),
    /// Press and release without intervening motion.
    Clicked(Point),
}

/// What an event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Nothing observable happened (capture may have advanced).
    None,
    /// A finished annotation, ready for the store.
    Committed(Annotation),
    /// The eraser was clicked; the caller removes whatever it hits.
    Erase(Point),
}

/// In-progress capture state for the active tool.
#[derive(Default)]
pub struct DraftMachine {
    tool: Option<ToolKind>,
    /// Points fixed by clicks/presses, in capture order.
    points: Vec<Point>,
    /// Transient preview point tracking the pointer; never committed.
    hover: Option<Point>,
    /// A line/rect press-drag capture is underway.
    dragging: bool,
}

impl DraftMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Option<ToolKind> {
        self.tool
    }

    /// Select a tool, unconditionally discarding any draft.
    pub fn select_tool(&mut self, tool: Option<ToolKind>) {
        self.tool = tool;
        self.clear_draft();
    }

    /// Select the tool, or deselect it if it is already active.
    pub fn toggle_tool(&mut self, tool: ToolKind) {
        if self.tool == Some(tool) {
            self.select_tool(None);
        } else {
            self.select_tool(Some(tool));
        }
    }

    /// Discard the draft, keeping the tool selection.
    pub fn reset(&mut self) {
        self.clear_draft();
    }

    pub fn is_capturing(&self) -> bool {
        self.dragging || !self.points.is_empty()
    }

    /// Fixed points plus the preview point, for overlay rendering.
    /// `None` when no capture is in progress.
    pub fn preview(&self) -> Option<(ToolKind, Vec<Point>)> {
        let tool = self.tool?;
        if !self.is_capturing() {
            return None;
        }
        let mut chain = self.points.clone();
        if let Some(hover) = self.hover {
            chain.push(hover);
        }
        Some((tool, chain))
    }

    /// Advance the state machine with one pointer event.
    ///
    /// `timestamp` is the playback position at the moment the event was
    /// delivered; a commit stamps the annotation with it, so the shape
    /// binds to the moment of completion, not the start of the capture.
    pub fn handle(&mut self, event: PointerEvent, timestamp: f64, color: &str) -> ToolOutcome {
        match event {
            PointerEvent::Pressed(at) => match self.tool {
                Some(ToolKind::Line) | Some(ToolKind::Rect) => {
                    self.points = vec![at];
                    self.hover = None;
                    self.dragging = true;
                    ToolOutcome::None
                }
                // A press that turns into a drag still fixes an angle
                // point at its origin, like a plain click.
                Some(ToolKind::Angle) => self.fix_angle_point(at, timestamp, color),
                Some(ToolKind::Eraser) | None => ToolOutcome::None,
            },
            PointerEvent::Moved(at) => {
                if self.dragging {
                    self.hover = Some(at);
                } else if self.tool == Some(ToolKind::Angle) && !self.points.is_empty() {
                    self.hover = Some(at);
                }
                ToolOutcome::None
            }
            PointerEvent::Released(at) => {
                if !self.dragging {
                    return ToolOutcome::None;
                }
                let anchor = self.points[0];
                let kind = self.tool;
                self.clear_draft();
                match kind {
                    Some(ToolKind::Line) => {
                        ToolOutcome::Committed(Annotation::line(anchor, at, timestamp, color))
                    }
                    Some(ToolKind::Rect) => {
                        ToolOutcome::Committed(Annotation::rect(anchor, at, timestamp, color))
                    }
                    _ => ToolOutcome::None,
                }
            }
            PointerEvent::Clicked(at) => match self.tool {
                Some(ToolKind::Eraser) => ToolOutcome::Erase(at),
                Some(ToolKind::Angle) => self.fix_angle_point(at, timestamp, color),
                // Line/rect need motion for a second point; a stationary
                // click captures nothing.
                Some(ToolKind::Line) | Some(ToolKind::Rect) | None => ToolOutcome::None,
            },
        }
    }

    fn fix_angle_point(&mut self, at: Point, timestamp: f64, color: &str) -> ToolOutcome {
        self.points.push(at);
        self.hover = None;
        if self.points.len() == 3 {
            let ann = Annotation::angle(
                self.points[0],
                self.points[1],
                self.points[2],
                timestamp,
                color,
            );
            self.clear_draft();
            ToolOutcome::Committed(ann)
        } else {
            ToolOutcome::None
        }
    }

    fn clear_draft(&mut self) {
        self.points.clear();
        self.hover = None;
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::ShapeKind;
    use crate::util::geometry::angle_at_vertex;

    const COLOR: &str = "#3B82F6";

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_line_drag_commits_on_release() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Line));

        assert_eq!(machine.handle(PointerEvent::Pressed(p(0.0, 0.0)), 4.0, COLOR), ToolOutcome::None);
        assert_eq!(machine.handle(PointerEvent::Moved(p(5.0, 5.0)), 4.1, COLOR), ToolOutcome::None);

        let outcome = machine.handle(PointerEvent::Released(p(10.0, 10.0)), 4.2, COLOR);
        let ToolOutcome::Committed(ann) = outcome else {
            panic!("expected commit, got {:?}", outcome);
        };
        assert_eq!(ann.kind, ShapeKind::Line);
        assert_eq!(ann.points, vec![p(0.0, 0.0), p(10.0, 10.0)]);
        assert!(!machine.is_capturing());
    }

    #[test]
    fn test_commit_timestamp_is_taken_at_completion() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Rect));

        machine.handle(PointerEvent::Pressed(p(0.0, 0.0)), 1.0, COLOR);
        machine.handle(PointerEvent::Moved(p(2.0, 2.0)), 2.0, COLOR);
        let outcome = machine.handle(PointerEvent::Released(p(3.0, 3.0)), 7.5, COLOR);

        let ToolOutcome::Committed(ann) = outcome else {
            panic!("expected commit");
        };
        assert_eq!(ann.timestamp, 7.5);
    }

    #[test]
    fn test_rect_commits_diagonal_corners() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Rect));

        machine.handle(PointerEvent::Pressed(p(10.0, 20.0)), 0.0, COLOR);
        let outcome = machine.handle(PointerEvent::Released(p(110.0, 80.0)), 0.0, COLOR);

        let ToolOutcome::Committed(ann) = outcome else {
            panic!("expected commit");
        };
        assert_eq!(ann.kind, ShapeKind::Rect);
        assert_eq!(ann.points, vec![p(10.0, 20.0), p(110.0, 80.0)]);
    }

    #[test]
    fn test_stationary_click_commits_nothing_for_line_and_rect() {
        for tool in [ToolKind::Line, ToolKind::Rect] {
            let mut machine = DraftMachine::new();
            machine.select_tool(Some(tool));

            let outcome = machine.handle(PointerEvent::Clicked(p(4.0, 4.0)), 0.0, COLOR);
            assert_eq!(outcome, ToolOutcome::None);
            assert!(!machine.is_capturing());
        }
    }

    #[test]
    fn test_release_without_capture_is_ignored() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Line));
        let outcome = machine.handle(PointerEvent::Released(p(1.0, 1.0)), 0.0, COLOR);
        assert_eq!(outcome, ToolOutcome::None);
    }

    #[test]
    fn test_angle_commits_on_third_click() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Angle));

        assert_eq!(machine.handle(PointerEvent::Clicked(p(10.0, 10.0)), 3.0, COLOR), ToolOutcome::None);
        assert_eq!(machine.handle(PointerEvent::Clicked(p(10.0, 0.0)), 3.0, COLOR), ToolOutcome::None);
        let outcome = machine.handle(PointerEvent::Clicked(p(0.0, 0.0)), 3.0, COLOR);

        let ToolOutcome::Committed(ann) = outcome else {
            panic!("expected commit, got {:?}", outcome);
        };
        assert_eq!(ann.kind, ShapeKind::Angle);
        assert_eq!(ann.points, vec![p(10.0, 10.0), p(10.0, 0.0), p(0.0, 0.0)]);
        let deg = angle_at_vertex(ann.points[0], ann.points[1], ann.points[2]);
        assert!((deg - 90.0).abs() < 1e-9);

        // Draft is empty and ready for a fresh capture.
        assert!(!machine.is_capturing());
        assert!(machine.preview().is_none());
        assert_eq!(machine.handle(PointerEvent::Clicked(p(1.0, 1.0)), 4.0, COLOR), ToolOutcome::None);
        assert!(machine.is_capturing());
    }

    #[test]
    fn test_angle_preview_tracks_pointer_without_fixing_points() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Angle));

        machine.handle(PointerEvent::Clicked(p(0.0, 0.0)), 0.0, COLOR);
        machine.handle(PointerEvent::Moved(p(3.0, 3.0)), 0.0, COLOR);
        assert_eq!(
            machine.preview(),
            Some((ToolKind::Angle, vec![p(0.0, 0.0), p(3.0, 3.0)]))
        );

        // Preview point moves freely; only clicks fix points.
        machine.handle(PointerEvent::Moved(p(8.0, 1.0)), 0.0, COLOR);
        assert_eq!(
            machine.preview(),
            Some((ToolKind::Angle, vec![p(0.0, 0.0), p(8.0, 1.0)]))
        );

        machine.handle(PointerEvent::Clicked(p(10.0, 0.0)), 0.0, COLOR);
        machine.handle(PointerEvent::Moved(p(10.0, 10.0)), 0.0, COLOR);
        assert_eq!(
            machine.preview(),
            Some((ToolKind::Angle, vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]))
        );
    }

    #[test]
    fn test_angle_press_drag_fixes_point_at_origin() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Angle));

        machine.handle(PointerEvent::Pressed(p(0.0, 0.0)), 0.0, COLOR);
        machine.handle(PointerEvent::Pressed(p(10.0, 0.0)), 0.0, COLOR);
        let outcome = machine.handle(PointerEvent::Pressed(p(10.0, 10.0)), 0.0, COLOR);

        assert!(matches!(outcome, ToolOutcome::Committed(_)));
    }

    #[test]
    fn test_tool_switch_discards_draft() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Angle));
        machine.handle(PointerEvent::Clicked(p(0.0, 0.0)), 0.0, COLOR);
        machine.handle(PointerEvent::Clicked(p(5.0, 0.0)), 0.0, COLOR);
        assert!(machine.is_capturing());

        machine.select_tool(Some(ToolKind::Line));
        assert!(!machine.is_capturing());
        assert!(machine.preview().is_none());
    }

    #[test]
    fn test_toggle_reclick_deselects() {
        let mut machine = DraftMachine::new();
        machine.toggle_tool(ToolKind::Rect);
        assert_eq!(machine.tool(), Some(ToolKind::Rect));
        machine.toggle_tool(ToolKind::Rect);
        assert_eq!(machine.tool(), None);
    }

    #[test]
    fn test_reset_discards_draft_but_keeps_tool() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Angle));
        machine.handle(PointerEvent::Clicked(p(0.0, 0.0)), 0.0, COLOR);

        machine.reset();
        assert!(!machine.is_capturing());
        assert_eq!(machine.tool(), Some(ToolKind::Angle));
    }

    #[test]
    fn test_eraser_requests_erase_without_capturing() {
        let mut machine = DraftMachine::new();
        machine.select_tool(Some(ToolKind::Eraser));

        let outcome = machine.handle(PointerEvent::Clicked(p(42.0, 7.0)), 0.0, COLOR);
        assert_eq!(outcome, ToolOutcome::Erase(p(42.0, 7.0)));
        assert!(!machine.is_capturing());
    }

    #[test]
    fn test_motion_without_tool_or_capture_is_inert() {
        let mut machine = DraftMachine::new();
        machine.handle(PointerEvent::Moved(p(1.0, 1.0)), 0.0, COLOR);
        assert!(machine.preview().is_none());

        machine.select_tool(Some(ToolKind::Angle));
        machine.handle(PointerEvent::Moved(p(1.0, 1.0)), 0.0, COLOR);
        assert!(machine.preview().is_none());
    }
}
