//! The aggregated per-person report.
//!
//! Written once at end of run as a single JSON document. The report is a
//! pure function of the record collections it was built from; serializing
//! the same report twice yields byte-identical output (`person_statistics`
//! is a sorted map, `identified_persons` preserves first-seen order).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Accumulated statistics for one identified person (or the unknown
/// sentinel, which gets its own bucket like any other name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonStats {
    /// Number of face detections attributed to this name.
    pub face_detections: u64,

    /// Emotion label histogram.
    pub emotions: BTreeMap<String, u64>,

    /// Activity label histogram.
    pub activities: BTreeMap<String, u64>,
}

/// The final aggregate report for one processed video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoReport {
    /// Total frames decoded, including skipped ones.
    pub total_frames: u64,

    /// Frames in which at least one raised-arm anomaly fired.
    pub anomaly_count: u64,

    /// Total face detection events across the whole video.
    pub total_face_detections: u64,

    /// Number of distinct identity names seen.
    pub total_person_count: u64,

    /// Identity names in first-seen order.
    pub identified_persons: Vec<String>,

    /// Per-person statistics keyed by identity name.
    pub person_statistics: BTreeMap<String, PersonStats>,
}

impl VideoReport {
    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = self.to_json_pretty().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Load a previously saved report.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(std::io::Error::other)
    }
}
