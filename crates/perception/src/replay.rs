//! Replay backend: serves recorded perception outputs by frame index.
//!
//! A [`ReplayPerception`] is built from an observation stream (JSONL) and
//! implements all three adapter traits, which lets the fusion pipeline run
//! without the backing models. Frames absent from the stream yield empty
//! detections.

use std::collections::HashMap;
use std::path::Path;

use crowdsight_common::error::{CrowdsightError, CrowdsightResult};
use crowdsight_scene_model::observation::{parse_observations, FrameObservation};
use crowdsight_scene_model::{Frame, Region, Skeleton, UNKNOWN_LABEL};

use crate::adapter::{EmotionAdapter, IdentifiedRegion, IdentityAdapter, PoseAdapter};

/// Recorded per-frame perception outputs, indexed by frame number.
#[derive(Debug, Clone, Default)]
pub struct ReplayPerception {
    frames: HashMap<u64, FrameObservation>,
}

impl ReplayPerception {
    /// Build a backend from parsed observations.
    ///
    /// If the stream carries duplicate entries for a frame, the last one
    /// wins.
    pub fn from_observations(observations: Vec<FrameObservation>) -> Self {
        let mut frames = HashMap::with_capacity(observations.len());
        for observation in observations {
            frames.insert(observation.frame, observation);
        }
        Self { frames }
    }

    /// Load a backend from a JSONL observation stream on disk.
    pub fn from_jsonl_file(path: &Path) -> CrowdsightResult<Self> {
        if !path.is_file() {
            return Err(CrowdsightError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let observations = parse_observations(&content).map_err(|e| {
            CrowdsightError::video(format!("malformed observation stream {:?}: {}", path, e))
        })?;
        tracing::debug!(
            frames = observations.len(),
            "loaded observation stream from {:?}",
            path
        );
        Ok(Self::from_observations(observations))
    }

    /// Number of frames with recorded observations.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn observation(&self, frame: &Frame) -> Option<&FrameObservation> {
        self.frames.get(&frame.index)
    }
}

impl IdentityAdapter for ReplayPerception {
    fn identify_people(&self, frame: &Frame) -> CrowdsightResult<Vec<IdentifiedRegion>> {
        let faces = match self.observation(frame) {
            Some(observation) => observation
                .faces
                .iter()
                .map(|face| IdentifiedRegion {
                    name: face.name.clone(),
                    region: face.region,
                })
                .collect(),
            None => Vec::new(),
        };
        Ok(faces)
    }
}

impl EmotionAdapter for ReplayPerception {
    fn classify_emotion(&self, frame: &Frame, region: &Region) -> CrowdsightResult<String> {
        // Recorded emotions parallel the face list; match the region back
        // to its position to find the label.
        let label = self.observation(frame).and_then(|observation| {
            let idx = observation
                .faces
                .iter()
                .position(|face| face.region == *region)?;
            observation.emotions.get(idx).cloned()
        });
        Ok(label.unwrap_or_else(|| UNKNOWN_LABEL.to_string()))
    }
}

impl PoseAdapter for ReplayPerception {
    fn extract_skeletons(&self, frame: &Frame) -> CrowdsightResult<Vec<Skeleton>> {
        let skeletons = match self.observation(frame) {
            Some(observation) => observation.skeletons.clone(),
            None => Vec::new(),
        };
        Ok(skeletons)
    }
}
