//! Per-detection records emitted by the fusion pass.
//!
//! Each detected face in each processed frame yields one [`FusionRecord`]
//! and exactly one [`EmotionRecord`] and [`ActivityRecord`] sharing its
//! `fusion_id`. The id is unique per detection event, NOT per physical
//! person: two detections of the same person in different frames carry
//! different ids, and the aggregation layer re-keys by `identity_name`.

use serde::{Deserialize, Serialize};

use crate::region::Region;

/// Monotonically increasing detection-event identifier.
pub type FusionId = u64;

/// Sentinel identity for faces that matched no known person, and fallback
/// label for emotion classification gaps. A valid aggregation key like any
/// other name.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Sentinel activity emitted when face and skeleton counts disagree.
pub const UNDEFINED_ACTIVITY: &str = "undefined";

/// One identity-tagged face detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionRecord {
    pub fusion_id: FusionId,
    pub identity_name: String,
    pub region: Region,
}

/// The dominant-emotion label for one detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub fusion_id: FusionId,
    pub label: String,
}

/// The activity labels associated with one detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub fusion_id: FusionId,
    pub activities: Activities,
}

/// Activity labels for a record: either a bare scalar or a list.
///
/// Older streams stored a single label as a bare JSON string; both forms
/// read back uniformly through [`Activities::as_slice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Activities {
    One(String),
    Many(Vec<String>),
}

impl Activities {
    /// View the labels as a slice regardless of the stored form.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Activities::One(label) => std::slice::from_ref(label),
            Activities::Many(labels) => labels.as_slice(),
        }
    }
}

impl From<Vec<String>> for Activities {
    fn from(labels: Vec<String>) -> Self {
        Activities::Many(labels)
    }
}

impl From<String> for Activities {
    fn from(label: String) -> Self {
        Activities::One(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fusion_record_roundtrip() {
        let record = FusionRecord {
            fusion_id: 7,
            identity_name: "Ana".to_string(),
            region: Region::new(10, 110, 90, 30),
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: FusionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }

    #[test]
    fn test_activities_scalar_form_parses() {
        let record: ActivityRecord =
            serde_json::from_str(r#"{"fusion_id":2,"activities":"standing"}"#).unwrap();
        assert_eq!(record.activities.as_slice(), ["standing".to_string()]);
    }

    #[test]
    fn test_activities_list_form_parses() {
        let record: ActivityRecord =
            serde_json::from_str(r#"{"fusion_id":2,"activities":["sitting","raised_arm"]}"#)
                .unwrap();
        assert_eq!(
            record.activities.as_slice(),
            ["sitting".to_string(), "raised_arm".to_string()]
        );
    }

    #[test]
    fn test_activities_empty_list() {
        let activities = Activities::from(Vec::new());
        assert!(activities.as_slice().is_empty());
    }
}
