//! The recorded observation stream.
//!
//! Perception backends persist their per-frame outputs in append-only JSONL:
//! a `# `-prefixed header line followed by one [`FrameObservation`] object
//! per decoded frame. The fusion pipeline replays such streams without the
//! backing models being present.

use serde::{Deserialize, Serialize};

use crate::region::Region;
use crate::skeleton::Skeleton;

/// A decoded video frame, as seen by the core.
///
/// Pixel payloads stay behind the perception adapters; the core only needs
/// the frame index and dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Zero-based decode index.
    pub index: u64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Stream metadata recorded once at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Identifier of the originating video source.
    pub source: String,

    /// Wall-clock time the stream was recorded (ISO 8601).
    pub recorded_at: String,

    /// Frame dimensions in pixels.
    pub frame_width: u32,
    pub frame_height: u32,

    /// Nominal frame rate of the source.
    pub fps: f64,
}

impl ObservationStreamHeader {
    /// Create a header for a stream recorded now.
    pub fn new(source: impl Into<String>, frame_width: u32, frame_height: u32, fps: f64) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            source: source.into(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
            frame_width,
            frame_height,
            fps,
        }
    }
}

/// One identity-tagged face region as reported by the identity backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    /// Resolved name, or the unknown sentinel.
    pub name: String,
    /// Bounding region in pixel coordinates.
    pub region: Region,
}

/// Everything the perception backends reported for one decoded frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameObservation {
    /// Zero-based decode index of the frame.
    pub frame: u64,

    /// Identity-tagged face regions, in detection order.
    #[serde(default)]
    pub faces: Vec<FaceObservation>,

    /// Dominant-emotion label per face, in the same order as `faces`.
    #[serde(default)]
    pub emotions: Vec<String>,

    /// Detected skeletons, in detection order. Not guaranteed to correspond
    /// to `faces` by index or count.
    #[serde(default)]
    pub skeletons: Vec<Skeleton>,
}

/// Parse observations from JSONL content (one JSON object per line).
///
/// Blank lines and `#`-prefixed header/comment lines are skipped.
pub fn parse_observations(jsonl: &str) -> Result<Vec<FrameObservation>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse the header comment of a stream, if present.
pub fn parse_header(jsonl: &str) -> Option<ObservationStreamHeader> {
    let first = jsonl.lines().map(str::trim).find(|line| !line.is_empty())?;
    let body = first.strip_prefix('#')?.trim();
    serde_json::from_str(body).ok()
}

/// Serialize a stream to JSONL, header first.
pub fn serialize_stream(
    header: &ObservationStreamHeader,
    observations: &[FrameObservation],
) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    output.push_str("# ");
    output.push_str(&serde_json::to_string(header)?);
    output.push('\n');
    for observation in observations {
        output.push_str(&serde_json::to_string(observation)?);
        output.push('\n');
    }
    Ok(output)
}
