//! Abstract interfaces for the perception backends.
//!
//! Adapters are initialized once, injected into the fusion pipeline at
//! construction time, and must be ready before the first call; no other
//! lifecycle is assumed. All three signals are independent per-frame
//! lookups: nothing here tracks identities across frames.

use crowdsight_common::error::CrowdsightResult;
use crowdsight_scene_model::{Frame, Region, Skeleton};

/// One identity-tagged face region reported by the identity backend.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedRegion {
    /// Resolved name, or the unknown sentinel when no match exceeded the
    /// backend's similarity threshold.
    pub name: String,

    /// Bounding region in pixel coordinates of the frame.
    pub region: Region,
}

/// Face detection and identity lookup.
pub trait IdentityAdapter {
    /// Detect and name zero or more face regions in the frame.
    fn identify_people(&self, frame: &Frame) -> CrowdsightResult<Vec<IdentifiedRegion>>;
}

/// Facial emotion classification.
pub trait EmotionAdapter {
    /// Return the dominant-emotion label for one face region.
    ///
    /// Backends should map empty crops and classification misses to the
    /// unknown label themselves where they can; errors that do escape are
    /// caught at the fusion call site and degrade to the same fallback.
    fn classify_emotion(&self, frame: &Frame, region: &Region) -> CrowdsightResult<String>;
}

/// Pose-landmark extraction.
pub trait PoseAdapter {
    /// Extract the detected skeletons in the frame, in detection order.
    ///
    /// The returned skeletons double as the raw pose artifact consumed by
    /// the drawing peripheral; the core only reads landmark positions.
    fn extract_skeletons(&self, frame: &Frame) -> CrowdsightResult<Vec<Skeleton>>;
}
