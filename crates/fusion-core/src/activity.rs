//! Activity classification from pose landmarks.
//!
//! Every label is an independent boolean detector over one skeleton, so
//! several labels may co-occur for one person (raised arm while sitting).
//! A missing landmark degrades only the detector that needs it; the other
//! detectors and the other people in the frame are unaffected.

use crowdsight_scene_model::skeleton::{Point2D, PoseLandmark, Skeleton};

/// Thresholds for the posture detector, in degrees.
#[derive(Debug, Clone, Copy)]
pub struct ActivityConfig {
    /// Both knee angles below this mean the person is sitting.
    pub sitting_threshold_deg: f64,

    /// Both knee angles above this mean the person is standing.
    /// Angle pairs between the two thresholds yield no posture label.
    pub standing_threshold_deg: f64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            sitting_threshold_deg: 130.0,
            standing_threshold_deg: 160.0,
        }
    }
}

/// Discrete activity labels the classifier can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLabel {
    RaisedArm,
    Sitting,
    Standing,
}

impl ActivityLabel {
    /// Stable string form used in records and report histograms.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLabel::RaisedArm => "raised_arm",
            ActivityLabel::Sitting => "sitting",
            ActivityLabel::Standing => "standing",
        }
    }
}

impl std::fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonActivity {
    /// Activity labels in emission order.
    pub labels: Vec<ActivityLabel>,

    /// Whether the raised-arm anomaly fired for this person.
    pub raised_arm: bool,
}

/// Angle at `point2` formed by the segments to `point1` and `point3`.
///
/// Computed from the difference of the `atan2` bearings of (p3 - p2) and
/// (p1 - p2), reflected into [0°, 180°]. Any absent input yields 0.0; a
/// defined fallback, not an error.
pub fn calculate_angle(
    point1: Option<Point2D>,
    point2: Option<Point2D>,
    point3: Option<Point2D>,
) -> f64 {
    let (Some(p1), Some(p2), Some(p3)) = (point1, point2, point3) else {
        return 0.0;
    };

    let radians = (p3.y - p2.y).atan2(p3.x - p2.x) - (p1.y - p2.y).atan2(p1.x - p2.x);
    let mut angle = radians.to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    angle
}

/// Derives activity labels from skeletal landmarks.
#[derive(Debug, Clone, Default)]
pub struct ActivityClassifier {
    config: ActivityConfig,
}

impl ActivityClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(config: ActivityConfig) -> Self {
        Self { config }
    }

    /// Classify one detected person's skeleton.
    pub fn classify(&self, skeleton: &Skeleton) -> PersonActivity {
        let mut activity = PersonActivity::default();

        if self.detect_raised_arm(skeleton) {
            activity.labels.push(ActivityLabel::RaisedArm);
            activity.raised_arm = true;
        }

        if let Some(posture) = self.detect_posture(skeleton) {
            activity.labels.push(posture);
        }

        activity
    }

    /// A wrist numerically above its same-side shoulder fires the detector;
    /// image convention, smaller y is higher. ORs across both sides.
    fn detect_raised_arm(&self, skeleton: &Skeleton) -> bool {
        let side = |wrist, shoulder| -> bool {
            match (skeleton.point(wrist), skeleton.point(shoulder)) {
                (Some(w), Some(s)) => w.y < s.y,
                _ => false,
            }
        };

        side(PoseLandmark::LeftWrist, PoseLandmark::LeftShoulder)
            || side(PoseLandmark::RightWrist, PoseLandmark::RightShoulder)
    }

    /// Posture from the knee angle of each leg, computed independently over
    /// (hip, knee, ankle). Requires both legs fully present; the band
    /// between the thresholds is an explicit dead zone with no label.
    fn detect_posture(&self, skeleton: &Skeleton) -> Option<ActivityLabel> {
        let leg = |hip, knee, ankle| -> Option<f64> {
            let points = (
                skeleton.point(hip)?,
                skeleton.point(knee)?,
                skeleton.point(ankle)?,
            );
            Some(calculate_angle(
                Some(points.0),
                Some(points.1),
                Some(points.2),
            ))
        };

        let left = leg(
            PoseLandmark::LeftHip,
            PoseLandmark::LeftKnee,
            PoseLandmark::LeftAnkle,
        )?;
        let right = leg(
            PoseLandmark::RightHip,
            PoseLandmark::RightKnee,
            PoseLandmark::RightAnkle,
        )?;

        if left < self.config.sitting_threshold_deg && right < self.config.sitting_threshold_deg {
            Some(ActivityLabel::Sitting)
        } else if left > self.config.standing_threshold_deg
            && right > self.config.standing_threshold_deg
        {
            Some(ActivityLabel::Standing)
        } else {
            None
        }
    }
}
