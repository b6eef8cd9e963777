//! Analysis engine: one call from two texts to the complete match report

use crate::error::Result;
use crate::processing::insights::{ats_priority, transfer_map, AtsPriority, TransferSuggestion};
use crate::processing::risk::detect_risk_flags;
use crate::processing::scorer::{MatchScore, MatchScorer};
use crate::visualization::radar::{build_radar, RadarData};
use crate::visualization::sankey::{build_sankey, SankeyData};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Everything derived from one job/resume pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub score: MatchScore,

    /// Gaps ranked by occurrence × capability breadth
    pub ats_priority: Vec<AtsPriority>,

    /// Gap → resume technologies sharing its capabilities
    pub transfer_map: IndexMap<String, TransferSuggestion>,

    /// Hard-requirement phrasing found in the job text
    pub risk_flags: Vec<String>,

    pub sankey: SankeyData,
    pub radar: RadarData,
}

impl AnalysisReport {
    pub fn has_job_technologies(&self) -> bool {
        !self.score.job_techs.is_empty()
    }

    pub fn has_resume_technologies(&self) -> bool {
        !self.score.resume_techs.is_empty()
    }
}

/// Stateless analysis engine; safe to share between requests.
pub struct AnalysisEngine {
    scorer: MatchScorer,
}

impl AnalysisEngine {
    pub fn new() -> Result<Self> {
        Ok(Self {
            scorer: MatchScorer::new()?,
        })
    }

    /// Analyse a job description against a resume.
    ///
    /// Never fails on content: texts without any known technology produce a
    /// zero-valued report.
    pub fn analyze(&self, job_text: &str, resume_text: &str) -> AnalysisReport {
        let dictionary = self.scorer.dictionary();
        let score = self.scorer.score(job_text, resume_text);

        let job_occurrences = self.scorer.occurrences(job_text);
        let ats_priority = ats_priority(dictionary, &score.gaps, &job_occurrences);
        let transfer_map = transfer_map(dictionary, &score.gaps, &score.resume_techs);
        let risk_flags = detect_risk_flags(job_text);

        let sankey = build_sankey(dictionary, &score.resume_techs, &score.job_techs);
        let radar = build_radar(&score.resume_caps, &score.job_caps);

        debug!(
            "Analysis complete: {} gaps, {} risk flags, {} flow links",
            score.gaps.len(),
            risk_flags.len(),
            sankey.links.len()
        );

        AnalysisReport {
            score,
            ats_priority,
            transfer_map,
            risk_flags,
            sankey,
            radar,
        }
    }
}

/// Convenience wrapper building a throwaway engine.
pub fn analyze(job_text: &str, resume_text: &str) -> Result<AnalysisReport> {
    Ok(AnalysisEngine::new()?.analyze(job_text, resume_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Senior Data Engineer needs Python, AWS, Kubernetes, Grafana";
    const RESUME: &str = "5 years Python, Azure, Docker";

    #[test]
    fn test_report_combines_all_parts() {
        let report = analyze(JOB, RESUME).unwrap();
        assert_eq!(report.score.keyword_match, 25);
        assert_eq!(report.score.capability_match, 75);
        assert_eq!(report.ats_priority.len(), report.score.gaps.len());
        assert_eq!(report.ats_priority[0].tech, "AWS");
        assert_eq!(report.transfer_map["AWS"].resume_techs[0], "AZURE");
        assert!(report.transfer_map["GRAFANA"].resume_techs.is_empty());
        assert!(report.risk_flags.is_empty());
        assert_eq!(report.radar.categories.len(), 8);
        assert!(!report.sankey.links.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let report = analyze(JOB, RESUME).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "keyword_match",
            "capability_match",
            "delta",
            "gaps",
            "job_techs",
            "resume_techs",
            "job_caps",
            "resume_caps",
            "ats_priority",
            "transfer_map",
            "risk_flags",
            "sankey",
            "radar",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["job_caps"]["Orchestration"], 2);
        assert_eq!(json["sankey"]["nodes"][0]["group"], "resume");
        assert_eq!(json["transfer_map"]["AWS"]["shared_caps"][0], "Cloud Storage");
    }

    #[test]
    fn test_empty_resume_degrades() {
        let report = analyze(JOB, "").unwrap();
        assert!(!report.has_resume_technologies());
        assert_eq!(report.score.keyword_match, 0);
        assert_eq!(report.score.capability_match, 0);
        assert_eq!(report.score.gaps, report.score.job_techs);
    }
}
