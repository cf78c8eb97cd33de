// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback clock for the video surface.
//!
//! The app renders no decoded frames, so playback time is a simulated
//! clock advanced by the UI frame delta. The overlay treats it exactly
//! like a real player's current time: read-only from the core's point
//! of view, scrubbed and stepped by the transport controls.

/// Seconds one frame step moves, assuming 30 fps footage.
pub const FRAME_STEP: f64 = 1.0 / 30.0;

/// Seconds the skip buttons jump.
pub const SKIP_STEP: f64 = 5.0;

const DEFAULT_DURATION: f64 = 60.0;

/// Current playback position and play/pause state.
pub struct PlaybackClock {
    position: f64,
    duration: f64,
    playing: bool,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self {
            position: 0.0,
            duration: DEFAULT_DURATION,
            playing: false,
        }
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Without decode there is no intrinsic duration; the transport bar
    /// lets the user set it to match the footage.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(1.0);
        self.position = self.position.min(self.duration);
    }

    pub fn seek(&mut self, position: f64) {
        self.position = position.clamp(0.0, self.duration);
    }

    pub fn skip(&mut self, seconds: f64) {
        self.seek(self.position + seconds);
    }

    /// Advance the clock by the frame delta while playing; pauses at
    /// the end of the session.
    pub fn advance(&mut self, dt: f64) {
        if !self.playing {
            return;
        }
        self.position += dt;
        if self.position >= self.duration {
            self.position = self.duration;
            self.playing = false;
        }
    }
}
