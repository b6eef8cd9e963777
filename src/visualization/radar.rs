//! Radar comparison: resume strength vs job requirement per capability axis

use crate::processing::aggregator::{axis_count, CapabilityCounts};
use crate::processing::dictionary::Capability;
use crate::processing::scorer::percentage;
use serde::{Deserialize, Serialize};

/// Parallel arrays indexed by axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadarData {
    pub categories: Vec<String>,
    pub resume: Vec<u32>,
    pub job: Vec<u32>,
}

impl RadarData {
    pub fn axis_count(&self) -> usize {
        self.categories.len()
    }
}

/// Build radar values for every axis in canonical order.
///
/// Each axis is normalised on its own: the larger of the two raw counts maps
/// to 100. Values on different axes are therefore not comparable in absolute
/// terms; only the resume/job ratio within one axis is meaningful.
pub fn build_radar(resume_caps: &CapabilityCounts, job_caps: &CapabilityCounts) -> RadarData {
    let mut radar = RadarData::default();

    for cap in Capability::ALL {
        let resume = axis_count(resume_caps, cap);
        let job = axis_count(job_caps, cap);
        let denominator = resume.max(job).max(1);

        radar.categories.push(cap.label().to_string());
        radar.resume.push(percentage(resume, denominator));
        radar.job.push(percentage(job, denominator));
    }

    radar
}
