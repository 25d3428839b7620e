//! Fixed pipeline definitions: the eight-step sales workflow and the
//! production-phase lifecycle vocabulary.

pub mod phases;
pub mod steps;

pub use phases::{PhaseStatus, ProcessType};
pub use steps::{StepInfo, StepKey, StepStatus, PIPELINE_STEPS, TOTAL_STEPS};
