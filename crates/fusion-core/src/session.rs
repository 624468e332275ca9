//! The frame-loop session driver.
//!
//! A [`FusionSession`] feeds decoded frames through a [`FrameFusion`] pass
//! and accumulates the resulting records for the whole video. Every frame
//! counts toward `total_frames`, but perception only runs on one of every
//! `frame_skip` frames. The caller may stop feeding frames at any point;
//! [`FusionSession::finish`] produces a valid report for whatever was
//! accumulated.

use crowdsight_scene_model::{ActivityRecord, EmotionRecord, Frame, FusionRecord, VideoReport};

use crate::aggregate::build_report;
use crate::fusion::{FrameFusion, FrameOutput};

/// Accumulates fusion output across the frames of one video.
pub struct FusionSession {
    fusion: FrameFusion,
    frame_skip: u64,
    total_frames: u64,
    anomaly_count: u64,
    fusion_records: Vec<FusionRecord>,
    emotion_records: Vec<EmotionRecord>,
    activity_records: Vec<ActivityRecord>,
}

impl FusionSession {
    /// Create a session. `frame_skip` of 1 processes every frame; values
    /// below 1 are treated as 1.
    pub fn new(fusion: FrameFusion, frame_skip: u32) -> Self {
        Self {
            fusion,
            frame_skip: u64::from(frame_skip.max(1)),
            total_frames: 0,
            anomaly_count: 0,
            fusion_records: Vec::new(),
            emotion_records: Vec::new(),
            activity_records: Vec::new(),
        }
    }

    /// Feed one decoded frame.
    ///
    /// Returns the frame's fusion output when perception ran, `None` when
    /// the frame was only counted. The output is a copy; the records are
    /// already accumulated either way.
    pub fn ingest_frame(&mut self, frame: &Frame) -> Option<FrameOutput> {
        self.total_frames += 1;
        if self.total_frames % self.frame_skip != 0 {
            return None;
        }

        let output = self.fusion.process_frame(frame);
        if output.anomaly {
            self.anomaly_count += 1;
        }
        self.fusion_records.extend(output.fusion.iter().cloned());
        self.emotion_records.extend(output.emotions.iter().cloned());
        self.activity_records
            .extend(output.activities.iter().cloned());

        tracing::trace!(
            frame = frame.index,
            detections = output.fusion.len(),
            anomaly = output.anomaly,
            "processed frame"
        );
        Some(output)
    }

    /// Frames ingested so far, including skipped ones.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frames in which a raised-arm anomaly fired so far.
    pub fn anomaly_count(&self) -> u64 {
        self.anomaly_count
    }

    /// Build the final report from everything accumulated so far.
    pub fn finish(self) -> VideoReport {
        build_report(
            &self.fusion_records,
            &self.emotion_records,
            &self.activity_records,
            self.total_frames,
            self.anomaly_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityClassifier;
    use crowdsight_common::error::CrowdsightResult;
    use crowdsight_perception::{
        EmotionAdapter, IdentifiedRegion, IdentityAdapter, PoseAdapter,
    };
    use crowdsight_scene_model::skeleton::{Point2D, PoseLandmark};
    use crowdsight_scene_model::{Region, Skeleton};

    struct OnePersonScene;

    impl IdentityAdapter for OnePersonScene {
        fn identify_people(&self, _frame: &Frame) -> CrowdsightResult<Vec<IdentifiedRegion>> {
            Ok(vec![IdentifiedRegion {
                name: "Ana".to_string(),
                region: Region::new(0, 50, 50, 0),
            }])
        }
    }

    impl EmotionAdapter for OnePersonScene {
        fn classify_emotion(&self, _frame: &Frame, _region: &Region) -> CrowdsightResult<String> {
            Ok("happy".to_string())
        }
    }

    impl PoseAdapter for OnePersonScene {
        fn extract_skeletons(&self, _frame: &Frame) -> CrowdsightResult<Vec<Skeleton>> {
            Ok(vec![Skeleton::from_points(&[
                (PoseLandmark::LeftWrist, Point2D::new(0.3, 0.1)),
                (PoseLandmark::LeftShoulder, Point2D::new(0.3, 0.5)),
            ])])
        }
    }

    fn session(frame_skip: u32) -> FusionSession {
        let fusion = FrameFusion::new(
            Box::new(OnePersonScene),
            Box::new(OnePersonScene),
            Box::new(OnePersonScene),
            ActivityClassifier::default(),
        );
        FusionSession::new(fusion, frame_skip)
    }

    fn frame(index: u64) -> Frame {
        Frame {
            index,
            width: 640,
            height: 480,
        }
    }

    #[test]
    fn test_frame_skip_counts_all_processes_some() {
        let mut session = session(2);
        let mut processed = 0;
        for index in 0..10 {
            if session.ingest_frame(&frame(index)).is_some() {
                processed += 1;
            }
        }

        assert_eq!(session.total_frames(), 10);
        assert_eq!(processed, 5);
        assert_eq!(session.anomaly_count(), 5);

        let report = session.finish();
        assert_eq!(report.total_frames, 10);
        assert_eq!(report.anomaly_count, 5);
        assert_eq!(report.person_statistics["Ana"].face_detections, 5);
        assert_eq!(report.person_statistics["Ana"].activities["raised_arm"], 5);
    }

    #[test]
    fn test_frame_skip_one_processes_every_frame() {
        let mut session = session(1);
        for index in 0..4 {
            assert!(session.ingest_frame(&frame(index)).is_some());
        }
        assert_eq!(session.finish().total_face_detections, 4);
    }

    #[test]
    fn test_zero_frame_skip_treated_as_one() {
        let mut session = session(0);
        assert!(session.ingest_frame(&frame(0)).is_some());
    }

    #[test]
    fn test_early_stop_yields_valid_partial_report() {
        let mut session = session(1);
        session.ingest_frame(&frame(0));
        session.ingest_frame(&frame(1));
        // Caller stops here, mid-video

        let report = session.finish();
        assert_eq!(report.total_frames, 2);
        assert_eq!(report.total_face_detections, 2);
        assert_eq!(report.identified_persons, vec!["Ana".to_string()]);
    }

    #[test]
    fn test_empty_session_report() {
        let report = session(1).finish();
        assert_eq!(report.total_frames, 0);
        assert_eq!(report.total_person_count, 0);
    }
}
