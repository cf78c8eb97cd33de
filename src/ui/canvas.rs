// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback surface and annotation overlay.
//!
//! Draws the poster frame (or a blank surface), the stored annotations
//! whose timestamps fall inside the visibility window around the
//! current playback time, and the in-progress draft. Pointer
//! interaction inside the surface is reported back as a
//! [`CanvasAction`] for the app to feed the draft machine.

use crate::models::annotation::{Annotation, Point, ShapeKind};
use crate::models::draft::{DraftMachine, ToolKind};
use crate::models::playback::PlaybackClock;
use crate::models::store::AnnotationStore;
use crate::util::color;
use crate::util::geometry::angle_at_vertex;

/// Half-width of the time window, in seconds, inside which a stored
/// annotation is rendered. Outside it the shape is invisible, which is
/// what pins shapes to a moment instead of the whole timeline.
pub const VISIBILITY_WINDOW: f64 = 0.5;

/// Fixed highlight color for the in-progress draft, distinct from the
/// per-annotation stored colors.
const DRAFT_COLOR: egui::Color32 = egui::Color32::from_rgb(0x60, 0xA5, 0xFA);

const STROKE_WIDTH: f32 = 3.0;

/// Pointer interaction on the overlay surface, in overlay pixels.
pub enum CanvasAction {
    None,
    Pressed(Point),
    Moved(Point),
    Released(Point),
    Clicked(Point),
}

/// Whether the annotation is rendered at the given playback time.
/// The boundary is exclusive: exactly `VISIBILITY_WINDOW` away is out.
pub fn is_visible_at(annotation: &Annotation, playback_time: f64) -> bool {
    (annotation.timestamp - playback_time).abs() < VISIBILITY_WINDOW
}

/// Display the playback surface with its overlay and collect pointer
/// interaction.
pub fn show(
    ui: &mut egui::Ui,
    store: &AnnotationStore,
    draft: &DraftMachine,
    clock: &PlaybackClock,
    poster: &Option<egui::TextureHandle>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available);

        let surface = surface_rect(ui, poster);

        // The surface only captures the pointer while a tool is armed;
        // otherwise it is inert and playback controls get the events.
        if draft.tool().is_some() {
            let response = ui.allocate_rect(surface, egui::Sense::click_and_drag());
            action = pointer_action(ui, &response, surface);
        } else {
            let _ = ui.allocate_rect(surface, egui::Sense::hover());
        }

        let painter = ui.painter_at(ui.min_rect());

        // Frame under the overlay.
        painter.rect_filled(surface, 0.0, egui::Color32::BLACK);
        if let Some(texture) = poster {
            painter.image(
                texture.id(),
                surface,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        // Stored annotations pinned to the current moment.
        for annotation in store
            .snapshot()
            .iter()
            .filter(|ann| is_visible_at(ann, clock.position()))
        {
            draw_annotation(&painter, &surface, annotation);
        }

        // Draft on top, in the highlight color.
        if let Some((tool, points)) = draft.preview() {
            draw_draft(&painter, &surface, tool, &points);
        }
    });

    action
}

/// Aspect-fit the playback surface into the available space, centered.
/// Poster aspect when a poster is loaded, 16:9 otherwise.
fn surface_rect(ui: &egui::Ui, poster: &Option<egui::TextureHandle>) -> egui::Rect {
    let available = ui.available_size();
    let aspect = match poster {
        Some(texture) => {
            let size = texture.size_vec2();
            size.x / size.y
        }
        None => 16.0 / 9.0,
    };
    let available_aspect = available.x / available.y;

    let (width, height) = if aspect > available_aspect {
        (available.x, available.x / aspect)
    } else {
        (available.y * aspect, available.y)
    };

    let offset = egui::vec2((available.x - width) / 2.0, (available.y - height) / 2.0);
    egui::Rect::from_min_size(ui.min_rect().min + offset, egui::vec2(width, height))
}

fn pointer_action(ui: &egui::Ui, response: &egui::Response, surface: egui::Rect) -> CanvasAction {
    let to_overlay = |pos: egui::Pos2| {
        let clamped = pos.clamp(surface.min, surface.max);
        Point::new(
            (clamped.x - surface.min.x) as f64,
            (clamped.y - surface.min.y) as f64,
        )
    };

    if response.drag_started() {
        // The anchor is where the button went down, not where the drag
        // threshold was crossed.
        if let Some(origin) = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos())
        {
            return CanvasAction::Pressed(to_overlay(origin));
        }
    } else if response.drag_stopped() {
        if let Some(pos) = response.interact_pointer_pos() {
            return CanvasAction::Released(to_overlay(pos));
        }
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            return CanvasAction::Moved(to_overlay(pos));
        }
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            return CanvasAction::Clicked(to_overlay(pos));
        }
    } else if let Some(pos) = response.hover_pos() {
        return CanvasAction::Moved(to_overlay(pos));
    }
    CanvasAction::None
}

/// Draw one stored annotation in its own color.
fn draw_annotation(painter: &egui::Painter, surface: &egui::Rect, annotation: &Annotation) {
    let at = |p: Point| surface.min + egui::vec2(p.x as f32, p.y as f32);
    let color = color::parse_hex(&annotation.color);
    let stroke = egui::Stroke::new(STROKE_WIDTH, color);

    match annotation.kind {
        ShapeKind::Line => {
            if let [a, b] = annotation.points[..] {
                painter.line_segment([at(a), at(b)], stroke);
            }
        }
        ShapeKind::Angle => {
            if let [a, vertex, b] = annotation.points[..] {
                painter.line_segment([at(a), at(vertex)], stroke);
                painter.line_segment([at(vertex), at(b)], stroke);
                draw_angle_label(painter, at(vertex), angle_at_vertex(a, vertex, b), color);
            }
        }
        ShapeKind::Rect => {
            if let [a, b] = annotation.points[..] {
                let rect = egui::Rect::from_two_pos(at(a), at(b));
                painter.rect_stroke(rect, 0.0, stroke);
            }
        }
    }
}

/// Draw the in-progress capture in the highlight color, with vertex
/// markers on the captured points.
fn draw_draft(painter: &egui::Painter, surface: &egui::Rect, tool: ToolKind, points: &[Point]) {
    let at = |p: Point| surface.min + egui::vec2(p.x as f32, p.y as f32);
    let stroke = egui::Stroke::new(STROKE_WIDTH, DRAFT_COLOR);

    match tool {
        ToolKind::Line => {
            if let [a, .., b] = points[..] {
                painter.line_segment([at(a), at(b)], stroke);
            }
        }
        ToolKind::Rect => {
            if let [a, .., b] = points[..] {
                painter.rect_stroke(egui::Rect::from_two_pos(at(a), at(b)), 0.0, stroke);
            }
        }
        ToolKind::Angle => {
            for pair in points.windows(2) {
                painter.line_segment([at(pair[0]), at(pair[1])], stroke);
            }
            if let [a, vertex, b] = points[..] {
                draw_angle_label(painter, at(vertex), angle_at_vertex(a, vertex, b), DRAFT_COLOR);
            }
        }
        ToolKind::Eraser => {}
    }

    for point in points {
        painter.circle_filled(at(*point), 4.0, egui::Color32::WHITE);
        painter.circle_stroke(at(*point), 4.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
    }
}

fn draw_angle_label(
    painter: &egui::Painter,
    vertex: egui::Pos2,
    degrees: f64,
    color: egui::Color32,
) {
    painter.text(
        vertex + egui::vec2(10.0, -10.0),
        egui::Align2::LEFT_BOTTOM,
        format!("{:.1}°", degrees),
        egui::FontId::proportional(16.0),
        color,
    );
}
