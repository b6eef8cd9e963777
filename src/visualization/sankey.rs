//! Flow graph: resume technology → capability → job technology

use crate::processing::dictionary::CapabilityDictionary;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SankeyNodeGroup {
    Resume,
    Capability,
    Job,
}

impl SankeyNodeGroup {
    /// Column order, left to right.
    pub const COLUMNS: [SankeyNodeGroup; 3] = [
        SankeyNodeGroup::Resume,
        SankeyNodeGroup::Capability,
        SankeyNodeGroup::Job,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            SankeyNodeGroup::Resume => "resume",
            SankeyNodeGroup::Capability => "capability",
            SankeyNodeGroup::Job => "job",
        }
    }

    /// Group encoded in a node id's `<group>:` prefix.
    pub fn from_id(id: &str) -> Option<Self> {
        let (prefix, _) = id.split_once(':')?;
        Self::COLUMNS.iter().copied().find(|group| group.prefix() == prefix)
    }

    pub fn node_id(&self, label: &str) -> String {
        format!("{}:{}", self.prefix(), label)
    }
}

impl fmt::Display for SankeyNodeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyNode {
    pub id: String,
    pub label: String,
    pub group: SankeyNodeGroup,
    /// Total weight of links touching this node
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: String,
    pub target: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SankeyData {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

impl SankeyData {
    pub fn node(&self, id: &str) -> Option<&SankeyNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn nodes_in(&self, group: SankeyNodeGroup) -> impl Iterator<Item = &SankeyNode> {
        self.nodes.iter().filter(move |node| node.group == group)
    }
}

/// Accumulates nodes in first-seen order while links are added.
#[derive(Default)]
struct SankeyBuilder {
    nodes: IndexMap<String, SankeyNode>,
    links: Vec<SankeyLink>,
}

impl SankeyBuilder {
    fn touch(&mut self, id: &str, label: &str, value: usize) {
        let node = self.nodes.entry(id.to_string()).or_insert_with(|| SankeyNode {
            id: id.to_string(),
            label: label.to_string(),
            group: SankeyNodeGroup::from_id(id).unwrap_or(SankeyNodeGroup::Capability),
            value: 0,
        });
        node.value += value;
    }

    fn link(&mut self, (source, source_label): (String, &str), (target, target_label): (String, &str)) {
        const WEIGHT: usize = 1;
        self.touch(&source, source_label, WEIGHT);
        self.touch(&target, target_label, WEIGHT);
        self.links.push(SankeyLink {
            source,
            target,
            value: WEIGHT,
        });
    }

    fn finish(self) -> SankeyData {
        SankeyData {
            nodes: self.nodes.into_values().collect(),
            links: self.links,
        }
    }
}

/// Build the flow graph.
///
/// Every resume technology links to each of its capabilities, and each job
/// technology is linked from each of its capabilities, one unit per edge.
/// Technologies unknown to the dictionary produce no edges.
pub fn build_sankey(dictionary: &CapabilityDictionary, resume_techs: &[String], job_techs: &[String]) -> SankeyData {
    let mut builder = SankeyBuilder::default();

    for tech in resume_techs {
        for cap in dictionary.capabilities(tech) {
            builder.link(
                (SankeyNodeGroup::Resume.node_id(tech), tech.as_str()),
                (SankeyNodeGroup::Capability.node_id(cap.label()), cap.label()),
            );
        }
    }

    for tech in job_techs {
        for cap in dictionary.capabilities(tech) {
            builder.link(
                (SankeyNodeGroup::Capability.node_id(cap.label()), cap.label()),
                (SankeyNodeGroup::Job.node_id(tech), tech.as_str()),
            );
        }
    }

    builder.finish()
}
