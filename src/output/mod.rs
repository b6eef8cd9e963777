//! Report output: structures, chart rendering and formatters

pub mod charts;
pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, OutputFormatter, ReportGenerator};
pub use report::{SkillReport, Verdict};
