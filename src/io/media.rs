// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Poster frame loading.
//!
//! The app never decodes video. If a still image with the same stem
//! sits next to the opened video (`clip.mp4` -> `clip.png`), it is
//! loaded here and shown under the annotation overlay as the poster
//! frame.

use anyhow::Result;
use std::path::{Path, PathBuf};

const POSTER_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Decoded RGBA image ready for texture upload.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Load an image file into RGBA8 pixels.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Find a poster image next to the given video, if one exists.
pub fn find_poster(video_path: &Path) -> Option<PathBuf> {
    POSTER_EXTENSIONS
        .iter()
        .map(|ext| video_path.with_extension(ext))
        .find(|candidate| candidate.exists())
}
