// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! REMARK - Replay Markup and Measurement Kit
//!
//! A desktop telestrator for coaching video review: measurement shapes
//! (lines, angles, rectangles) drawn over a playback surface, pinned to
//! the moment they were drawn at, and persisted per video.

mod app;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::RemarkApp;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Optional video to open straight away
    let initial_video = std::env::args().nth(1).map(PathBuf::from);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("REMARK - Replay Markup and Measurement Kit"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "REMARK",
        options,
        Box::new(move |_cc| Ok(Box::new(RemarkApp::new(initial_video)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
