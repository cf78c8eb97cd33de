// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation document export and import.
//!
//! This module handles writing a session's annotation document to
//! user-chosen files in YAML and JSON formats, and reading them back.

use crate::models::document::AnnotationDocument;
use anyhow::Result;
use std::path::Path;

/// Export an annotation document to YAML format.
pub fn export_yaml(document: &AnnotationDocument, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(document)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export an annotation document to JSON format.
pub fn export_json(document: &AnnotationDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import an annotation document from YAML format.
pub fn import_yaml(path: &Path) -> Result<AnnotationDocument> {
    let yaml = std::fs::read_to_string(path)?;
    let document = serde_yaml::from_str(&yaml)?;
    Ok(document)
}

/// Import an annotation document from JSON format.
pub fn import_json(path: &Path) -> Result<AnnotationDocument> {
    let json = std::fs::read_to_string(path)?;
    let document = serde_json::from_str(&json)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{Annotation, Point};

    fn sample() -> AnnotationDocument {
        AnnotationDocument::new(
            "clip.mp4".to_string(),
            vec![Annotation::angle(
                Point::new(0.0, 10.0),
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                3.5,
                "#22C55E",
            )],
        )
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotations.yaml");

        export_yaml(&sample(), &path).unwrap();
        let imported = import_yaml(&path).unwrap();

        assert_eq!(imported.video_id, "clip.mp4");
        assert_eq!(imported.annotations, sample().annotations);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotations.json");

        export_json(&sample(), &path).unwrap();
        let imported = import_json(&path).unwrap();

        assert_eq!(imported.annotations, sample().annotations);
    }
}
