//! Animation driver and run summary

pub mod report;
pub mod runner;

pub use report::AnimationSummary;
pub use runner::Animation;
