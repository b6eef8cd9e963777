//! Capability aggregation: technology multiset → per-axis counts

use crate::processing::dictionary::{Capability, CapabilityDictionary};
use std::collections::BTreeMap;

/// Per-axis occurrence counts, iterated in axis order.
pub type CapabilityCounts = BTreeMap<Capability, usize>;

/// Sum the capability tags of every technology.
///
/// Repeated technologies count once per repeat. Unknown tokens are skipped.
pub fn aggregate<I, S>(dictionary: &CapabilityDictionary, technologies: I) -> CapabilityCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = CapabilityCounts::new();
    for tech in technologies {
        for cap in dictionary.capabilities(tech.as_ref()) {
            *counts.entry(*cap).or_insert(0) += 1;
        }
    }
    counts
}

/// Count for one axis, zero when absent.
pub fn axis_count(counts: &CapabilityCounts, capability: Capability) -> usize {
    counts.get(&capability).copied().unwrap_or(0)
}
