//! Fuse a recorded observation stream into an aggregate report.

use std::path::PathBuf;

use anyhow::Context;

use crowdsight_common::config::AppConfig;
use crowdsight_fusion_core::{ActivityClassifier, ActivityConfig, FrameFusion, FusionSession};
use crowdsight_perception::ReplayPerception;
use crowdsight_scene_model::observation::{parse_header, parse_observations};
use crowdsight_scene_model::Frame;

pub fn run(
    stream: PathBuf,
    report_path: Option<PathBuf>,
    frame_skip: Option<u32>,
    sitting_threshold: f64,
    standing_threshold: f64,
) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let frame_skip = frame_skip.unwrap_or(config.processing.frame_skip);
    let report_path = report_path.unwrap_or_else(|| config.reports_dir.join("report.json"));

    println!("Analyzing stream: {}", stream.display());

    // The one fatal condition: the source must open and parse.
    let content = std::fs::read_to_string(&stream)
        .with_context(|| format!("Failed to open observation stream: {}", stream.display()))?;
    let observations = parse_observations(&content)
        .with_context(|| format!("Malformed observation stream: {}", stream.display()))?;

    let (width, height) = match parse_header(&content) {
        Some(header) => {
            println!(
                "  Source: {} ({}x{} @ {}fps)",
                header.source, header.frame_width, header.frame_height, header.fps
            );
            (header.frame_width, header.frame_height)
        }
        None => {
            tracing::warn!("stream carries no header line, frame dimensions unknown");
            (0, 0)
        }
    };
    println!("  Loaded {} frame observations", observations.len());

    let frames: Vec<Frame> = observations
        .iter()
        .map(|observation| Frame {
            index: observation.frame,
            width,
            height,
        })
        .collect();

    let backend = ReplayPerception::from_observations(observations);
    let classifier = ActivityClassifier::new(ActivityConfig {
        sitting_threshold_deg: sitting_threshold,
        standing_threshold_deg: standing_threshold,
    });
    let fusion = FrameFusion::new(
        Box::new(backend.clone()),
        Box::new(backend.clone()),
        Box::new(backend),
        classifier,
    );

    let mut session = FusionSession::new(fusion, frame_skip);
    for frame in &frames {
        session.ingest_frame(frame);
    }

    let report = session.finish();
    tracing::info!(
        frames = report.total_frames,
        detections = report.total_face_detections,
        persons = report.total_person_count,
        anomalies = report.anomaly_count,
        "analysis finished"
    );

    report
        .save(&report_path)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;

    println!(
        "  {} detections across {} persons, {} anomalous frames",
        report.total_face_detections, report.total_person_count, report.anomaly_count
    );
    println!("\nReport saved to: {}", report_path.display());

    Ok(())
}
