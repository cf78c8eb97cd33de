// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: annotations, the session store, the drawing
//! interaction state machine, and the playback clock.

pub mod annotation;
pub mod document;
pub mod draft;
pub mod playback;
pub mod store;
