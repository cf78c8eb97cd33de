// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tool palette and session status strip.
//!
//! Tool selection buttons (re-clicking the active tool disarms it),
//! the stroke color swatches, the reset action, the save status
//! indicator and the annotation count readout.

use crate::io::sync::SaveStatus;
use crate::models::draft::{DraftMachine, ToolKind};
use crate::util::color;

/// Stroke colors offered for new annotations.
pub const PALETTE: [&str; 4] = ["#3B82F6", "#EF4444", "#22C55E", "#EAB308"];

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    /// Wipe the whole annotation set for this session.
    ResetAll,
}

/// Display the toolbar with tool selection and status.
pub fn show(
    ui: &mut egui::Ui,
    draft: &mut DraftMachine,
    active_color: &mut String,
    save_status: SaveStatus,
    annotation_count: usize,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");
        ui.separator();

        for (tool, label) in [
            (ToolKind::Line, "⟋ Line"),
            (ToolKind::Angle, "∠ Angle"),
            (ToolKind::Rect, "▭ Rect"),
            (ToolKind::Eraser, "⌫ Eraser"),
        ] {
            if ui
                .selectable_label(draft.tool() == Some(tool), label)
                .clicked()
            {
                draft.toggle_tool(tool);
                log::info!("Tool is now {:?}", draft.tool());
            }
        }

        ui.separator();

        for hex in PALETTE {
            let selected = *active_color == hex;
            let stroke = if selected {
                egui::Stroke::new(2.0, egui::Color32::WHITE)
            } else {
                egui::Stroke::NONE
            };
            let swatch = egui::Button::new("  ")
                .fill(color::parse_hex(hex))
                .stroke(stroke);
            if ui.add(swatch).clicked() {
                *active_color = hex.to_string();
            }
        }

        ui.separator();

        if ui.button("⟲ Reset").clicked() {
            action = ToolbarAction::ResetAll;
        }

        ui.separator();

        let hint = match draft.tool() {
            Some(ToolKind::Line) => "Drag to measure a line",
            Some(ToolKind::Angle) => "Three clicks: ray end, vertex, ray end",
            Some(ToolKind::Rect) => "Drag diagonal corners",
            Some(ToolKind::Eraser) => "Click near a shape's points to erase it",
            None => "Pick a tool to draw on the current moment",
        };
        ui.label(egui::RichText::new(hint).italics().weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!(
                "{} annotation{}",
                annotation_count,
                if annotation_count == 1 { "" } else { "s" }
            ));
            ui.separator();
            show_save_status(ui, save_status);
        });
    });

    action
}

fn show_save_status(ui: &mut egui::Ui, status: SaveStatus) {
    match status {
        SaveStatus::Idle => {}
        SaveStatus::Saving => {
            ui.label(egui::RichText::new("Saving…").color(egui::Color32::GRAY));
        }
        SaveStatus::Saved => {
            ui.label(egui::RichText::new("Saved").color(egui::Color32::from_rgb(0x16, 0xA3, 0x4A)));
        }
        SaveStatus::Error => {
            ui.label(
                egui::RichText::new("Save failed")
                    .color(egui::Color32::from_rgb(0xDC, 0x26, 0x26)),
            );
        }
    }
}
