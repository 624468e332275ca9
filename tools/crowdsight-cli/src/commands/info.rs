//! Show per-person statistics from a saved report.

use std::path::PathBuf;

use anyhow::Context;

use crowdsight_scene_model::VideoReport;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let report = VideoReport::load(&path)
        .with_context(|| format!("Failed to load report: {}", path.display()))?;

    println!("Report: {}", path.display());
    println!("  Total frames: {}", report.total_frames);
    println!("  Anomalous frames: {}", report.anomaly_count);
    println!("  Face detections: {}", report.total_face_detections);
    println!("  Persons: {}", report.total_person_count);
    println!();

    for name in &report.identified_persons {
        let Some(stats) = report.person_statistics.get(name) else {
            continue;
        };
        println!("{} ({} detections)", name, stats.face_detections);

        if !stats.emotions.is_empty() {
            let emotions: Vec<String> = stats
                .emotions
                .iter()
                .map(|(label, count)| format!("{label}: {count}"))
                .collect();
            println!("  Emotions: {}", emotions.join(", "));
        }
        if !stats.activities.is_empty() {
            let activities: Vec<String> = stats
                .activities
                .iter()
                .map(|(label, count)| format!("{label}: {count}"))
                .collect();
            println!("  Activities: {}", activities.join(", "));
        }
    }

    Ok(())
}
