//! Deterministic scoring and gap analysis for school transformation
//! assessments.
//!
//! The [`scoring`] module hosts the engine itself: category-aware
//! normalization of raw indicator responses, weighted roll-up through
//! modules and areas, gap analysis against expected maturity levels, and
//! cohort aggregation across many scored instances. The remaining modules
//! are the thin application shell around it.

pub mod config;
pub mod demo;
pub mod error;
pub mod scoring;
pub mod telemetry;
