//! Skill topology library
//!
//! Maps technologies found in job descriptions and resumes onto eight
//! capability axes and compares keyword overlap with capability coverage.

pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod store;
pub mod visualization;

pub use config::Config;
pub use error::{Result, SkillTopologyError};
pub use processing::analyzer::{analyze, AnalysisEngine, AnalysisReport};
