//! Pose skeletons and landmark addressing.
//!
//! Landmark positions are normalized to `[0.0, 1.0]` relative to the frame,
//! image convention: smaller `y` is higher in the image. A skeleton carries
//! one optional position per landmark index; absent landmarks are a normal
//! condition (occlusion, low confidence), not an error.

use serde::{Deserialize, Serialize};

/// A 2D normalized landmark position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Body landmark indices, following the 33-point pose topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

/// Number of landmark slots in a skeleton.
pub const LANDMARK_COUNT: usize = 33;

/// One detected person's pose: a fixed set of optional landmark positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skeleton {
    landmarks: Vec<Option<Point2D>>,
}

impl Skeleton {
    /// An empty skeleton with every landmark absent.
    pub fn empty() -> Self {
        Self {
            landmarks: vec![None; LANDMARK_COUNT],
        }
    }

    /// Build a skeleton from `(landmark, position)` pairs; unlisted
    /// landmarks stay absent.
    pub fn from_points(points: &[(PoseLandmark, Point2D)]) -> Self {
        let mut skeleton = Self::empty();
        for (landmark, point) in points {
            skeleton.set(*landmark, *point);
        }
        skeleton
    }

    /// Position of a landmark, if detected.
    pub fn point(&self, landmark: PoseLandmark) -> Option<Point2D> {
        self.landmarks.get(landmark as usize).copied().flatten()
    }

    /// Set a landmark position.
    pub fn set(&mut self, landmark: PoseLandmark, point: Point2D) {
        let idx = landmark as usize;
        if self.landmarks.len() < LANDMARK_COUNT {
            self.landmarks.resize(LANDMARK_COUNT, None);
        }
        self.landmarks[idx] = Some(point);
    }

    /// Whether no landmark was detected at all.
    pub fn is_empty(&self) -> bool {
        self.landmarks.iter().all(Option::is_none)
    }

    /// Iterate over detected landmark positions.
    pub fn points(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.landmarks.iter().filter_map(|p| *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut skeleton = Skeleton::empty();
        assert!(skeleton.point(PoseLandmark::LeftWrist).is_none());

        skeleton.set(PoseLandmark::LeftWrist, Point2D::new(0.4, 0.2));
        let point = skeleton.point(PoseLandmark::LeftWrist).unwrap();
        assert!((point.x - 0.4).abs() < 1e-9);
        assert!((point.y - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_from_points() {
        let skeleton = Skeleton::from_points(&[
            (PoseLandmark::LeftShoulder, Point2D::new(0.3, 0.5)),
            (PoseLandmark::RightShoulder, Point2D::new(0.7, 0.5)),
        ]);
        assert!(skeleton.point(PoseLandmark::LeftShoulder).is_some());
        assert!(skeleton.point(PoseLandmark::LeftHip).is_none());
        assert!(!skeleton.is_empty());
    }

    #[test]
    fn test_short_vector_tolerated() {
        // Streams may truncate trailing absent landmarks
        let skeleton: Skeleton = serde_json::from_str("[null,null]").unwrap();
        assert!(skeleton.point(PoseLandmark::LeftWrist).is_none());
        assert!(skeleton.is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let skeleton = Skeleton::from_points(&[(
            PoseLandmark::Nose,
            Point2D::new(0.5, 0.1),
        )]);
        let json = serde_json::to_string(&skeleton).unwrap();
        let parsed: Skeleton = serde_json::from_str(&json).unwrap();
        assert_eq!(skeleton, parsed);
    }
}
