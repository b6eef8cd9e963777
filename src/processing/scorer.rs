//! Match scoring: keyword overlap vs capability overlap

use crate::error::Result;
use crate::processing::aggregator::{aggregate, axis_count, CapabilityCounts};
use crate::processing::dictionary::{Capability, CapabilityDictionary};
use crate::processing::extractor::TechnologyExtractor;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Both overlap metrics plus the data they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Share of job technologies literally present in the resume (0-100)
    pub keyword_match: u32,

    /// Share of required capability weight covered by the resume (0-100)
    pub capability_match: u32,

    /// `capability_match - keyword_match`
    pub delta: i32,

    /// Job technologies missing from the resume, in extraction order
    pub gaps: Vec<String>,

    pub job_techs: Vec<String>,
    pub resume_techs: Vec<String>,
    pub job_caps: CapabilityCounts,
    pub resume_caps: CapabilityCounts,
}

/// Rounded percentage of two non-negative integers; zero when `denominator` is zero.
///
/// Halves round up.
pub fn percentage(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let numerator = numerator.min(denominator) as u64;
    let denominator = denominator as u64;
    ((200 * numerator + denominator) / (2 * denominator)) as u32
}

/// Keyword-match percentage: job technologies also present in the resume.
pub fn keyword_match(job_techs: &[String], resume_techs: &[String]) -> u32 {
    let resume: HashSet<&str> = resume_techs.iter().map(String::as_str).collect();
    let matched = job_techs.iter().filter(|tech| resume.contains(tech.as_str())).count();
    percentage(matched, job_techs.len())
}

/// Capability-match percentage.
///
/// Each axis contributes `min(job, resume)` matched units out of `job`
/// required units, so depth on an axis counts, not just presence.
pub fn capability_match(job_caps: &CapabilityCounts, resume_caps: &CapabilityCounts) -> u32 {
    let (matched, required) = Capability::ALL.iter().fold((0, 0), |(matched, required), cap| {
        let job = axis_count(job_caps, *cap);
        let resume = axis_count(resume_caps, *cap);
        (matched + job.min(resume), required + job)
    });
    percentage(matched, required)
}

/// Job technologies with no resume match, keeping job order.
pub fn find_gaps(job_techs: &[String], resume_techs: &[String]) -> Vec<String> {
    let resume: HashSet<&str> = resume_techs.iter().map(String::as_str).collect();
    job_techs
        .iter()
        .filter(|tech| !resume.contains(tech.as_str()))
        .cloned()
        .collect()
}

/// Extracts both documents and scores them against each other.
pub struct MatchScorer {
    extractor: TechnologyExtractor,
}

impl MatchScorer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: TechnologyExtractor::new()?,
        })
    }

    pub fn dictionary(&self) -> &'static CapabilityDictionary {
        self.extractor.dictionary()
    }

    /// Score raw job and resume texts.
    pub fn score(&self, job_text: &str, resume_text: &str) -> MatchScore {
        let job_techs = self.extractor.extract(job_text);
        let resume_techs = self.extractor.extract(resume_text);
        self.score_technologies(job_techs, resume_techs)
    }

    /// Score already-extracted technology lists.
    pub fn score_technologies(&self, job_techs: Vec<String>, resume_techs: Vec<String>) -> MatchScore {
        let dictionary = self.dictionary();

        let keyword_match = keyword_match(&job_techs, &resume_techs);

        let job_caps = aggregate(dictionary, &job_techs);
        let resume_caps = aggregate(dictionary, &resume_techs);
        let capability_match = capability_match(&job_caps, &resume_caps);

        let delta = capability_match as i32 - keyword_match as i32;
        let gaps = find_gaps(&job_techs, &resume_techs);

        debug!(
            "Scored {} job / {} resume technologies: keyword {}%, capability {}%, delta {:+}",
            job_techs.len(),
            resume_techs.len(),
            keyword_match,
            capability_match,
            delta
        );

        MatchScore {
            keyword_match,
            capability_match,
            delta,
            gaps,
            job_techs,
            resume_techs,
            job_caps,
            resume_caps,
        }
    }

    /// Occurrence counts of every technology in `text`.
    pub fn occurrences(&self, text: &str) -> IndexMap<String, usize> {
        self.extractor.extract_with_counts(text)
    }
}
