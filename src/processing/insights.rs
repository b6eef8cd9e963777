//! Gap insights: ATS priority ranking and transferable-skill mapping

use crate::processing::dictionary::{Capability, CapabilityDictionary};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum resume technologies suggested per gap.
pub const MAX_TRANSFER_SUGGESTIONS: usize = 4;

/// One gap ranked by expected resume-optimisation impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsPriority {
    pub tech: String,
    pub occurrences: usize,
    pub capability_weight: usize,
    pub score: usize,
}

/// Resume experience that covers some of a gap's capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransferSuggestion {
    pub resume_techs: Vec<String>,
    pub shared_caps: Vec<Capability>,
}

/// Rank gaps by `occurrences × capability breadth`, highest first.
///
/// `job_occurrences` holds whole-word counts from the job text; a gap
/// missing from it counts once. Ties keep gap order.
pub fn ats_priority(
    dictionary: &CapabilityDictionary,
    gaps: &[String],
    job_occurrences: &IndexMap<String, usize>,
) -> Vec<AtsPriority> {
    let mut ranked: Vec<AtsPriority> = gaps
        .iter()
        .map(|tech| {
            let occurrences = job_occurrences.get(tech).copied().unwrap_or(1).max(1);
            let capability_weight = dictionary.capabilities(tech).len().max(1);
            AtsPriority {
                tech: tech.clone(),
                occurrences,
                capability_weight,
                score: occurrences * capability_weight,
            }
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// For each gap, the resume technologies sharing the most capability axes.
///
/// Candidates are ordered by shared-axis count (stable on resume order) and
/// capped at [`MAX_TRANSFER_SUGGESTIONS`]. `shared_caps` is the union of the
/// axes those suggestions cover, in axis order.
pub fn transfer_map(
    dictionary: &CapabilityDictionary,
    gaps: &[String],
    resume_techs: &[String],
) -> IndexMap<String, TransferSuggestion> {
    gaps.iter()
        .map(|gap| (gap.clone(), transfer_for(dictionary, gap, resume_techs)))
        .collect()
}

fn transfer_for(dictionary: &CapabilityDictionary, gap: &str, resume_techs: &[String]) -> TransferSuggestion {
    let missing = dictionary.capabilities(gap);

    let mut candidates: Vec<(&String, Vec<Capability>)> = resume_techs
        .iter()
        .map(|tech| {
            let shared: Vec<Capability> = dictionary
                .capabilities(tech)
                .iter()
                .filter(|cap| missing.contains(*cap))
                .copied()
                .collect();
            (tech, shared)
        })
        .filter(|(_, shared)| !shared.is_empty())
        .collect();

    candidates.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    candidates.truncate(MAX_TRANSFER_SUGGESTIONS);

    let mut shared_caps: Vec<Capability> = candidates.iter().flat_map(|(_, caps)| caps.iter().copied()).collect();
    shared_caps.sort();
    shared_caps.dedup();

    TransferSuggestion {
        resume_techs: candidates.into_iter().map(|(tech, _)| tech.clone()).collect(),
        shared_caps,
    }
}
