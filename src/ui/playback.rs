// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback transport controls.
//!
//! Seek slider, play/pause, skip and frame-step buttons, and the
//! session duration field (no decode means the footage length is set
//! by hand).

use crate::models::playback::{PlaybackClock, FRAME_STEP, SKIP_STEP};

/// Display the transport strip for the playback clock.
pub fn show(ui: &mut egui::Ui, clock: &mut PlaybackClock) {
    ui.horizontal(|ui| {
        ui.spacing_mut().slider_width = (ui.available_width() - 120.0).max(80.0);
        let mut position = clock.position();
        if ui
            .add(egui::Slider::new(&mut position, 0.0..=clock.duration()).show_value(false))
            .changed()
        {
            clock.seek(position);
        }
        ui.label(format!(
            "{} / {}",
            format_time(clock.position()),
            format_time(clock.duration())
        ));
    });

    ui.horizontal(|ui| {
        if ui.button("|◀").on_hover_text("Previous frame").clicked() {
            clock.skip(-FRAME_STEP);
        }
        if ui.button("◀◀").on_hover_text("Back 5s").clicked() {
            clock.skip(-SKIP_STEP);
        }
        let play_label = if clock.is_playing() { "⏸" } else { "▶" };
        if ui.button(play_label).clicked() {
            clock.toggle();
        }
        if ui.button("▶▶").on_hover_text("Forward 5s").clicked() {
            clock.skip(SKIP_STEP);
        }
        if ui.button("▶|").on_hover_text("Next frame").clicked() {
            clock.skip(FRAME_STEP);
        }

        ui.separator();

        ui.label("Duration:");
        let mut duration = clock.duration();
        if ui
            .add(egui::DragValue::new(&mut duration).speed(1.0).suffix(" s"))
            .changed()
        {
            clock.set_duration(duration);
        }
    });
}

/// Format seconds as `m:ss`.
fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
