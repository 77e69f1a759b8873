//! Scoring and evaluation engine for hierarchical objectives and key results.
//!
//! Leaf metrics ("key results") roll up into objectives, objectives roll up
//! into departments, and the automatic department score can be blended with
//! human evaluations submitted through a draft/submit workflow.

pub mod config;
pub mod error;
pub mod okr;
pub mod telemetry;
