// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hex color parsing for stored annotation colors.

/// Parse a `#RRGGBB` hex string into an egui color, falling back to
/// white for malformed input.
pub fn parse_hex(color: &str) -> egui::Color32 {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 {
        return egui::Color32::WHITE;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => egui::Color32::from_rgb(r, g, b),
        _ => egui::Color32::WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_colors() {
        assert_eq!(parse_hex("#3B82F6"), egui::Color32::from_rgb(0x3B, 0x82, 0xF6));
        assert_eq!(parse_hex("ff0000"), egui::Color32::from_rgb(0xFF, 0x00, 0x00));
    }

    #[test]
    fn test_malformed_falls_back_to_white() {
        assert_eq!(parse_hex("#12"), egui::Color32::WHITE);
        assert_eq!(parse_hex("#GGGGGG"), egui::Color32::WHITE);
    }
}
