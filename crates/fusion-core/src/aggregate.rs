//! Cross-frame aggregation into the final report.
//!
//! Runs once per video over the full record collections. Aggregation is
//! keyed by identity name, not by fusion id: the same person detected in
//! many frames collapses into one statistics bucket, and the unknown
//! sentinel gets a bucket like any other name.

use std::collections::BTreeMap;

use crowdsight_scene_model::{
    ActivityRecord, EmotionRecord, FusionRecord, PersonStats, VideoReport,
};

/// Build the aggregate report from the accumulated records.
///
/// A pure function of its inputs: no hidden state, identical inputs yield
/// identical reports. Emotion and activity records whose `fusion_id`
/// resolves to no fusion record are skipped rather than failing the run.
/// The collections may reflect a partially processed video (early stop);
/// nothing here assumes completeness.
pub fn build_report(
    fusion: &[FusionRecord],
    emotions: &[EmotionRecord],
    activities: &[ActivityRecord],
    total_frames: u64,
    anomaly_count: u64,
) -> VideoReport {
    let mut identified_persons: Vec<String> = Vec::new();
    let mut person_statistics: BTreeMap<String, PersonStats> = BTreeMap::new();

    for record in fusion {
        let stats = person_statistics
            .entry(record.identity_name.clone())
            .or_insert_with(|| {
                identified_persons.push(record.identity_name.clone());
                PersonStats::default()
            });
        stats.face_detections += 1;
    }

    // First-match resolution is O(n) per record; acceptable at
    // report-build time since this runs once per video, not per frame.
    for record in emotions {
        let Some(owner) = fusion.iter().find(|f| f.fusion_id == record.fusion_id) else {
            continue;
        };
        if let Some(stats) = person_statistics.get_mut(&owner.identity_name) {
            *stats.emotions.entry(record.label.clone()).or_insert(0) += 1;
        }
    }

    for record in activities {
        let Some(owner) = fusion.iter().find(|f| f.fusion_id == record.fusion_id) else {
            continue;
        };
        if let Some(stats) = person_statistics.get_mut(&owner.identity_name) {
            for label in record.activities.as_slice() {
                *stats.activities.entry(label.clone()).or_insert(0) += 1;
            }
        }
    }

    VideoReport {
        total_frames,
        anomaly_count,
        total_face_detections: fusion.len() as u64,
        total_person_count: person_statistics.len() as u64,
        identified_persons,
        person_statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdsight_scene_model::{Activities, Region, UNKNOWN_LABEL};

    fn fusion_record(fusion_id: u64, name: &str) -> FusionRecord {
        FusionRecord {
            fusion_id,
            identity_name: name.to_string(),
            region: Region::new(0, 50, 50, 0),
        }
    }

    fn emotion_record(fusion_id: u64, label: &str) -> EmotionRecord {
        EmotionRecord {
            fusion_id,
            label: label.to_string(),
        }
    }

    fn activity_record(fusion_id: u64, labels: &[&str]) -> ActivityRecord {
        ActivityRecord {
            fusion_id,
            activities: labels
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .into(),
        }
    }

    #[test]
    fn test_aggregates_per_person() {
        let fusion = vec![fusion_record(0, "Ana"), fusion_record(1, "Ana")];
        let emotions = vec![emotion_record(0, "happy"), emotion_record(1, "happy")];
        let activities = vec![
            activity_record(0, &["sitting"]),
            activity_record(1, &["standing"]),
        ];

        let report = build_report(&fusion, &emotions, &activities, 10, 1);

        assert_eq!(report.total_frames, 10);
        assert_eq!(report.anomaly_count, 1);
        assert_eq!(report.total_face_detections, 2);
        assert_eq!(report.total_person_count, 1);
        assert_eq!(report.identified_persons, vec!["Ana".to_string()]);

        let ana = &report.person_statistics["Ana"];
        assert_eq!(ana.face_detections, 2);
        assert_eq!(ana.emotions["happy"], 2);
        assert_eq!(ana.activities["sitting"], 1);
        assert_eq!(ana.activities["standing"], 1);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let fusion = vec![
            fusion_record(0, "Nick"),
            fusion_record(1, "Ana"),
            fusion_record(2, "Nick"),
        ];
        let report = build_report(&fusion, &[], &[], 3, 0);
        assert_eq!(
            report.identified_persons,
            vec!["Nick".to_string(), "Ana".to_string()]
        );
        assert_eq!(report.total_person_count, 2);
    }

    #[test]
    fn test_unknown_sentinel_gets_its_own_bucket() {
        let fusion = vec![fusion_record(0, UNKNOWN_LABEL), fusion_record(1, "Ana")];
        let emotions = vec![emotion_record(0, "neutral")];

        let report = build_report(&fusion, &emotions, &[], 1, 0);
        let unknown = &report.person_statistics[UNKNOWN_LABEL];
        assert_eq!(unknown.face_detections, 1);
        assert_eq!(unknown.emotions["neutral"], 1);
    }

    #[test]
    fn test_orphan_records_are_skipped() {
        let fusion = vec![fusion_record(0, "Ana")];
        let emotions = vec![emotion_record(99, "happy")];
        let activities = vec![activity_record(42, &["sitting"])];

        let report = build_report(&fusion, &emotions, &activities, 1, 0);
        let ana = &report.person_statistics["Ana"];
        assert!(ana.emotions.is_empty());
        assert!(ana.activities.is_empty());
    }

    #[test]
    fn test_scalar_activities_aggregate_like_a_sequence() {
        let fusion = vec![fusion_record(2, "Ana"), fusion_record(3, "Ana")];
        let scalar = ActivityRecord {
            fusion_id: 2,
            activities: Activities::from("standing".to_string()),
        };
        let sequence = activity_record(3, &["standing"]);

        let report = build_report(&fusion, &[], &[scalar, sequence], 1, 0);
        assert_eq!(report.person_statistics["Ana"].activities["standing"], 2);
    }

    #[test]
    fn test_empty_inputs_yield_empty_report() {
        let report = build_report(&[], &[], &[], 0, 0);
        assert_eq!(report.total_face_detections, 0);
        assert_eq!(report.total_person_count, 0);
        assert!(report.identified_persons.is_empty());
        assert!(report.person_statistics.is_empty());
    }

    #[test]
    fn test_report_is_pure_and_deterministic() {
        let fusion = vec![fusion_record(0, "Ana"), fusion_record(1, "Nick")];
        let emotions = vec![emotion_record(0, "happy"), emotion_record(1, "sad")];
        let activities = vec![activity_record(0, &["sitting", "raised_arm"])];

        let first = build_report(&fusion, &emotions, &activities, 5, 2);
        let second = build_report(&fusion, &emotions, &activities, 5, 2);
        assert_eq!(first, second);
        assert_eq!(
            first.to_json_pretty().unwrap(),
            second.to_json_pretty().unwrap()
        );
    }
}
