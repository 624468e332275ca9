//! Crowdsight Fusion Core
//!
//! The per-frame fusion and cross-frame aggregation pipeline:
//! - **ActivityClassifier:** derive discrete activity labels from a skeleton
//! - **FrameFusion:** fuse identity, emotion, and activity signals per frame
//! - **PersonAggregator:** fold the record stream into the final report
//! - **FusionSession:** the frame-loop driver tying the pieces together
//!
//! Aside from the injected perception adapters this crate is pure
//! computation: all inputs are data, all outputs are data, and the report
//! is a deterministic function of the records it was built from.

pub mod activity;
pub mod aggregate;
pub mod fusion;
pub mod session;

pub use activity::{ActivityClassifier, ActivityConfig, ActivityLabel, PersonActivity};
pub use aggregate::build_report;
pub use fusion::{FrameFusion, FrameOutput};
pub use session::FusionSession;
