//! Scoring core for the ESLI learning-profile survey.
//!
//! Raw survey answers are mapped to assessment categories, standardized against
//! level-specific reference statistics, and classified into the labels that
//! drive the narrative report.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
