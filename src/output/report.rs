//! Report structures wrapping one analysis with its summary and provenance

use crate::processing::analyzer::AnalysisReport;
use crate::processing::dictionary::Capability;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// How the capability score compares to the keyword score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    StrongCapabilityMatch,
    InLineWithKeywords,
    KeywordsOverstateFit,
}

impl Verdict {
    /// Delta threshold (in percentage points) separating the verdicts
    pub const THRESHOLD: i32 = 20;

    pub fn from_delta(delta: i32) -> Self {
        if delta > Self::THRESHOLD {
            Verdict::StrongCapabilityMatch
        } else if delta < -Self::THRESHOLD {
            Verdict::KeywordsOverstateFit
        } else {
            Verdict::InLineWithKeywords
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::StrongCapabilityMatch => "Strong capability match",
            Verdict::InLineWithKeywords => "Capability match in line with keywords",
            Verdict::KeywordsOverstateFit => "Keyword match overstates fit",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            Verdict::StrongCapabilityMatch => {
                "The resume covers the job's underlying capabilities far better than its keyword overlap suggests."
            }
            Verdict::InLineWithKeywords => "Keyword overlap is a fair picture of capability coverage.",
            Verdict::KeywordsOverstateFit => {
                "Shared keywords hide missing depth: the job needs more capability units than the resume shows."
            }
        }
    }
}

/// Headline numbers and per-axis reading of an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub keyword_match: u32,
    pub capability_match: u32,
    pub delta: i32,
    pub verdict: Verdict,

    /// Axes the job needs that the resume fully covers
    pub covered_axes: Vec<Capability>,

    /// Axes the job needs where the resume falls short
    pub short_axes: Vec<Capability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: SystemTime,

    pub version: String,

    /// Where the job text came from (file, URL, or pasted text)
    pub job_source: String,

    pub resume_source: String,

    pub processing_time_ms: u64,

    /// Id under which the analysis was held in the result store
    pub result_id: Option<String>,
}

/// Analysis plus everything a formatter needs to present it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillReport {
    pub summary: MatchSummary,
    pub analysis: AnalysisReport,
    pub metadata: ReportMetadata,
}

impl MatchSummary {
    pub fn from_analysis(analysis: &AnalysisReport) -> Self {
        let score = &analysis.score;
        let mut covered_axes = Vec::new();
        let mut short_axes = Vec::new();

        for (cap, required) in &score.job_caps {
            let held = score.resume_caps.get(cap).copied().unwrap_or(0);
            if held >= *required {
                covered_axes.push(*cap);
            } else {
                short_axes.push(*cap);
            }
        }

        Self {
            keyword_match: score.keyword_match,
            capability_match: score.capability_match,
            delta: score.delta,
            verdict: Verdict::from_delta(score.delta),
            covered_axes,
            short_axes,
        }
    }
}

impl SkillReport {
    pub fn new(analysis: AnalysisReport, job_source: impl Into<String>, resume_source: impl Into<String>) -> Self {
        Self {
            summary: MatchSummary::from_analysis(&analysis),
            analysis,
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                job_source: job_source.into(),
                resume_source: resume_source.into(),
                processing_time_ms: 0,
                result_id: None,
            },
        }
    }

    pub fn with_processing_time(mut self, millis: u64) -> Self {
        self.metadata.processing_time_ms = millis;
        self
    }

    pub fn with_result_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.result_id = Some(id.into());
        self
    }

    pub fn verdict(&self) -> Verdict {
        self.summary.verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::analyze;

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(Verdict::from_delta(21), Verdict::StrongCapabilityMatch);
        assert_eq!(Verdict::from_delta(20), Verdict::InLineWithKeywords);
        assert_eq!(Verdict::from_delta(-20), Verdict::InLineWithKeywords);
        assert_eq!(Verdict::from_delta(-21), Verdict::KeywordsOverstateFit);
    }

    #[test]
    fn test_summary_splits_axes() {
        let analysis = analyze("Python, AWS, Kubernetes, Grafana", "Python, Azure, Docker").unwrap();
        let report = SkillReport::new(analysis, "job.txt", "resume.txt").with_result_id("abc");

        assert_eq!(report.verdict(), Verdict::StrongCapabilityMatch);
        assert!(report.summary.covered_axes.contains(&Capability::CloudStorage));
        assert!(report.summary.short_axes.contains(&Capability::Monitoring));
        assert!(report.summary.covered_axes.contains(&Capability::Orchestration));
        assert_eq!(report.summary.short_axes, vec![Capability::DistributedExec, Capability::Monitoring]);
        assert_eq!(report.metadata.result_id.as_deref(), Some("abc"));
    }
}
