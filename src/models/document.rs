// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted annotation document.
//!
//! The wholesale form one video's annotation set is stored and
//! exported in: the video identity plus the full ordered shape list.

use super::annotation::Annotation;
use serde::{Deserialize, Serialize};

/// Complete annotation set for one video, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub video_id: String,
    pub annotations: Vec<Annotation>,
}

impl AnnotationDocument {
    pub fn new(video_id: String, annotations: Vec<Annotation>) -> Self {
        Self {
            video_id,
            annotations,
        }
    }
}
