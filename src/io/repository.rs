// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation persistence backends.
//!
//! The [`AnnotationRepository`] trait is the boundary between the
//! annotation view and whatever durably stores annotation sets. Saves
//! are wholesale: each call replaces the entire stored set for the
//! video, so a write is all-or-nothing from the caller's point of view.

use crate::models::annotation::Annotation;
use crate::models::document::AnnotationDocument;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors crossing the persistence boundary.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

/// Per-video annotation storage.
///
/// `fetch_annotations` returns the stored set ascending by timestamp,
/// and an empty set (not an error) when the video has none yet.
/// Implementations are called from worker threads, so they must be
/// shareable across threads.
pub trait AnnotationRepository: Send + Sync {
    fn fetch_annotations(&self, video_id: &str) -> Result<Vec<Annotation>, RepositoryError>;

    fn save_annotations(
        &self,
        video_id: &str,
        annotations: &[Annotation],
    ) -> Result<(), RepositoryError>;
}

fn sort_by_timestamp(mut annotations: Vec<Annotation>) -> Vec<Annotation> {
    annotations.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    annotations
}

/// Sidecar-file backend: one JSON document per video, written next to
/// the video file itself (`clip.mp4` -> `clip.annotations.json`).
pub struct JsonFileRepository;

impl JsonFileRepository {
    pub fn new() -> Self {
        Self
    }

    fn sidecar_path(video_id: &str) -> PathBuf {
        Path::new(video_id).with_extension("annotations.json")
    }
}

impl Default for JsonFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationRepository for JsonFileRepository {
    fn fetch_annotations(&self, video_id: &str) -> Result<Vec<Annotation>, RepositoryError> {
        let path = Self::sidecar_path(video_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&path)?;
        let document: AnnotationDocument = serde_json::from_str(&json)?;
        Ok(sort_by_timestamp(document.annotations))
    }

    fn save_annotations(
        &self,
        video_id: &str,
        annotations: &[Annotation],
    ) -> Result<(), RepositoryError> {
        let document = AnnotationDocument::new(video_id.to_string(), annotations.to_vec());
        let json = serde_json::to_string_pretty(&document)?;
        std::fs::write(Self::sidecar_path(video_id), json)?;
        Ok(())
    }
}

/// In-memory backend keyed by video id. Backs the demo session when the
/// app is launched without a video, and tests.
#[derive(Default)]
pub struct MemoryRepository {
    sets: Mutex<HashMap<String, Vec<Annotation>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnotationRepository for MemoryRepository {
    fn fetch_annotations(&self, video_id: &str) -> Result<Vec<Annotation>, RepositoryError> {
        let sets = self.sets.lock().unwrap_or_else(|e| e.into_inner());
        Ok(sort_by_timestamp(
            sets.get(video_id).cloned().unwrap_or_default(),
        ))
    }

    fn save_annotations(
        &self,
        video_id: &str,
        annotations: &[Annotation],
    ) -> Result<(), RepositoryError> {
        let mut sets = self.sets.lock().unwrap_or_else(|e| e.into_inner());
        sets.insert(video_id.to_string(), annotations.to_vec());
        Ok(())
    }
}
