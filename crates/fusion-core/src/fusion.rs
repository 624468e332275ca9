//! Per-frame fusion of the three perception signals.
//!
//! For each decoded frame, [`FrameFusion`] queries the identity adapter for
//! named face regions, the emotion adapter for one label per region, and
//! the pose adapter for skeletons, then associates activity labels with
//! identities. Adapter failures never cross the frame boundary: each one
//! degrades to its documented fallback and processing continues.

use crowdsight_perception::{EmotionAdapter, IdentityAdapter, PoseAdapter};
use crowdsight_scene_model::{
    ActivityRecord, EmotionRecord, Frame, FusionId, FusionRecord, UNDEFINED_ACTIVITY,
    UNKNOWN_LABEL,
};

use crate::activity::{ActivityClassifier, PersonActivity};

/// Records produced for one processed frame.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// One record per detected face, in detection order.
    pub fusion: Vec<FusionRecord>,

    /// One emotion record per fusion record, same order.
    pub emotions: Vec<EmotionRecord>,

    /// One activity record per fusion record, same order.
    pub activities: Vec<ActivityRecord>,

    /// Whether any detected person raised an arm in this frame.
    pub anomaly: bool,
}

/// Per-frame orchestration of the perception adapters.
///
/// Owns the session's `fusion_id` counter: ids increase monotonically
/// across the whole video and are never reused or reset mid-session. Each
/// id is unique per detection event, not per physical person; the
/// aggregation layer re-keys by identity name.
pub struct FrameFusion {
    identity: Box<dyn IdentityAdapter>,
    emotion: Box<dyn EmotionAdapter>,
    pose: Box<dyn PoseAdapter>,
    classifier: ActivityClassifier,
    next_fusion_id: FusionId,
}

impl FrameFusion {
    /// Create a fusion pass over the given adapters. The adapters must be
    /// ready before the first call; no other lifecycle is assumed.
    pub fn new(
        identity: Box<dyn IdentityAdapter>,
        emotion: Box<dyn EmotionAdapter>,
        pose: Box<dyn PoseAdapter>,
        classifier: ActivityClassifier,
    ) -> Self {
        Self {
            identity,
            emotion,
            pose,
            classifier,
            next_fusion_id: 0,
        }
    }

    /// Fuse the perception signals for one frame.
    pub fn process_frame(&mut self, frame: &Frame) -> FrameOutput {
        let people = match self.identity.identify_people(frame) {
            Ok(people) => people,
            Err(e) => {
                tracing::warn!(frame = frame.index, "identity lookup failed: {}", e);
                Vec::new()
            }
        };

        let mut fusion = Vec::with_capacity(people.len());
        let mut emotions = Vec::with_capacity(people.len());
        for person in people {
            let fusion_id = self.next_fusion_id;
            self.next_fusion_id += 1;

            let label = match self.emotion.classify_emotion(frame, &person.region) {
                Ok(label) => label,
                Err(e) => {
                    tracing::warn!(
                        frame = frame.index,
                        fusion_id,
                        "emotion classification failed: {}",
                        e
                    );
                    UNKNOWN_LABEL.to_string()
                }
            };

            emotions.push(EmotionRecord { fusion_id, label });
            fusion.push(FusionRecord {
                fusion_id,
                identity_name: person.name,
                region: person.region,
            });
        }

        let skeletons = match self.pose.extract_skeletons(frame) {
            Ok(skeletons) => skeletons,
            Err(e) => {
                tracing::warn!(frame = frame.index, "pose extraction failed: {}", e);
                Vec::new()
            }
        };
        let per_person: Vec<PersonActivity> = skeletons
            .iter()
            .map(|skeleton| self.classifier.classify(skeleton))
            .collect();

        // The anomaly flag is independent of whether the association below
        // succeeds.
        let anomaly = per_person.iter().any(|activity| activity.raised_arm);

        let activities = self.associate_activities(&fusion, &per_person);

        FrameOutput {
            fusion,
            emotions,
            activities,
            anomaly,
        }
    }

    /// Associate skeleton-derived labels with identity regions.
    ///
    /// Known approximation: the face list and the skeleton list come from
    /// independent detectors and are not guaranteed to describe the same
    /// physical people. When the counts match exactly they are zipped by
    /// list order; any other combination (more faces, more skeletons, mere
    /// overlap) discards the skeleton labels for the frame and tags every
    /// region with the undefined sentinel. There is deliberately no
    /// partial or spatial matching here.
    fn associate_activities(
        &self,
        fusion: &[FusionRecord],
        per_person: &[PersonActivity],
    ) -> Vec<ActivityRecord> {
        if fusion.len() == per_person.len() {
            fusion
                .iter()
                .zip(per_person)
                .map(|(record, activity)| ActivityRecord {
                    fusion_id: record.fusion_id,
                    activities: activity
                        .labels
                        .iter()
                        .map(|label| label.as_str().to_string())
                        .collect::<Vec<_>>()
                        .into(),
                })
                .collect()
        } else {
            if !per_person.is_empty() {
                tracing::debug!(
                    faces = fusion.len(),
                    skeletons = per_person.len(),
                    "face/skeleton count mismatch, tagging activities as undefined"
                );
            }
            fusion
                .iter()
                .map(|record| ActivityRecord {
                    fusion_id: record.fusion_id,
                    activities: vec![UNDEFINED_ACTIVITY.to_string()].into(),
                })
                .collect()
        }
    }
}
