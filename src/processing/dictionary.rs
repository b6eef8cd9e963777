//! Capability dictionary: the fixed technology → capability table
//!
//! Every technology token the extractor can recognise lives here, paired
//! with the abstract capability axes it satisfies. The table and the axis
//! order are compiled in and loaded once per process.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One of the eight abstract skill dimensions.
///
/// Variant order is the radar axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "Scripting Logic")]
    ScriptingLogic,
    #[serde(rename = "Transform Logic")]
    TransformLogic,
    #[serde(rename = "Tabular Reasoning")]
    TabularReasoning,
    #[serde(rename = "Cloud Storage")]
    CloudStorage,
    #[serde(rename = "Distributed Exec")]
    DistributedExec,
    #[serde(rename = "Orchestration")]
    Orchestration,
    #[serde(rename = "Monitoring")]
    Monitoring,
    #[serde(rename = "Governance")]
    Governance,
}

impl Capability {
    /// All axes in canonical order.
    pub const ALL: [Capability; 8] = [
        Capability::ScriptingLogic,
        Capability::TransformLogic,
        Capability::TabularReasoning,
        Capability::CloudStorage,
        Capability::DistributedExec,
        Capability::Orchestration,
        Capability::Monitoring,
        Capability::Governance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Capability::ScriptingLogic => "Scripting Logic",
            Capability::TransformLogic => "Transform Logic",
            Capability::TabularReasoning => "Tabular Reasoning",
            Capability::CloudStorage => "Cloud Storage",
            Capability::DistributedExec => "Distributed Exec",
            Capability::Orchestration => "Orchestration",
            Capability::Monitoring => "Monitoring",
            Capability::Governance => "Governance",
        }
    }

    /// Index of this axis in [`Capability::ALL`].
    pub fn axis_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

use Capability::*;

/// Technology → capability table, in extraction order.
const ENTRIES: &[(&str, &[Capability])] = &[
    // Cloud & Infrastructure
    ("AWS", &[CloudStorage, Orchestration, DistributedExec]),
    ("AZURE", &[CloudStorage, Orchestration, DistributedExec]),
    ("GCP", &[CloudStorage, Orchestration, DistributedExec]),
    ("DOCKER", &[Orchestration, TransformLogic]),
    ("KUBERNETES", &[Orchestration, DistributedExec]),
    ("TERRAFORM", &[Orchestration, TransformLogic]),
    // Programming Languages
    ("PYTHON", &[ScriptingLogic, TransformLogic]),
    ("JAVA", &[ScriptingLogic, TransformLogic]),
    ("JAVASCRIPT", &[ScriptingLogic, TransformLogic]),
    ("TYPESCRIPT", &[ScriptingLogic, TransformLogic]),
    ("GO", &[ScriptingLogic, CloudStorage]),
    ("C#", &[ScriptingLogic, TransformLogic]),
    ("RUBY", &[ScriptingLogic, TransformLogic]),
    ("PHP", &[ScriptingLogic, TransformLogic]),
    // Databases
    ("SQL", &[TabularReasoning, CloudStorage]),
    ("POSTGRESQL", &[TabularReasoning, CloudStorage]),
    ("MYSQL", &[TabularReasoning, CloudStorage]),
    ("MONGODB", &[CloudStorage, TransformLogic]),
    ("REDIS", &[CloudStorage]),
    ("SNOWFLAKE", &[TabularReasoning, CloudStorage]),
    ("DATABRICKS", &[TabularReasoning, CloudStorage, DistributedExec]),
    // Data Engineering
    ("SPARK", &[DistributedExec, TransformLogic]),
    ("AIRFLOW", &[Orchestration, TransformLogic]),
    ("KAFKA", &[DistributedExec, CloudStorage]),
    ("ETL", &[TransformLogic, TabularReasoning]),
    // Monitoring & Observability
    ("GRAFANA", &[Monitoring]),
    ("PROMETHEUS", &[Monitoring]),
    ("DATADOG", &[Monitoring]),
    ("CLOUDWATCH", &[Monitoring, CloudStorage]),
    // Version Control & CI/CD
    ("GIT", &[Governance]),
    ("GITHUB", &[Governance]),
    ("GITLAB", &[Governance, Orchestration]),
    ("JENKINS", &[Orchestration]),
    ("CIRCLECI", &[Orchestration]),
    // Web Frameworks
    ("REACT", &[ScriptingLogic, TransformLogic]),
    ("ANGULAR", &[ScriptingLogic, TransformLogic]),
    ("VUE", &[ScriptingLogic, TransformLogic]),
    ("DJANGO", &[ScriptingLogic, TransformLogic]),
    ("FLASK", &[ScriptingLogic, TransformLogic]),
    ("NODE", &[ScriptingLogic, TransformLogic]),
    ("NODEJS", &[ScriptingLogic, TransformLogic]),
    // BI Tools
    ("POWERBI", &[TabularReasoning, Monitoring]),
    ("POWER BI", &[TabularReasoning, Monitoring]),
    ("TABLEAU", &[TabularReasoning, Monitoring]),
    ("LOOKER", &[TabularReasoning, Monitoring]),
    // Additional common technologies
    ("SSIS", &[TransformLogic, Orchestration]),
    ("PANDAS", &[TabularReasoning, TransformLogic]),
    ("NUMPY", &[TransformLogic]),
    ("SALESFORCE", &[CloudStorage, Governance]),
];

static DICTIONARY: Lazy<CapabilityDictionary> = Lazy::new(CapabilityDictionary::build);

/// Immutable technology → capability lookup.
pub struct CapabilityDictionary {
    entries: Vec<(&'static str, &'static [Capability])>,
    index: HashMap<&'static str, usize>,
}

impl CapabilityDictionary {
    /// The process-wide dictionary.
    pub fn global() -> &'static CapabilityDictionary {
        &DICTIONARY
    }

    fn build() -> Self {
        let entries: Vec<_> = ENTRIES.to_vec();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (tech, _))| (*tech, i))
            .collect();
        Self { entries, index }
    }

    /// Capability axes for a technology; empty for unknown tokens.
    pub fn capabilities(&self, tech: &str) -> &'static [Capability] {
        let key = tech.trim().to_uppercase();
        self.index
            .get(key.as_str())
            .map(|&i| self.entries[i].1)
            .unwrap_or(&[])
    }

    pub fn contains(&self, tech: &str) -> bool {
        !self.capabilities(tech).is_empty()
    }

    /// Technology tokens in table order.
    pub fn technologies(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(tech, _)| *tech)
    }

    /// Technologies that map to the given axis, in table order.
    pub fn technologies_for(&self, capability: Capability) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, caps)| caps.contains(&capability))
            .map(|(tech, _)| *tech)
            .collect()
    }

    /// Closest known token by Jaro-Winkler similarity, if any scores at least `threshold`.
    pub fn suggest(&self, tech: &str, threshold: f64) -> Option<&'static str> {
        let key = tech.trim().to_uppercase();
        self.technologies()
            .map(|known| (known, strsim::jaro_winkler(&key, known)))
            .filter(|(_, similarity)| *similarity >= threshold)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(known, _)| known)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_suggest_nearest_token() {
        let dict = CapabilityDictionary::global();
        assert_eq!(dict.suggest("kuberntes", 0.8), Some("KUBERNETES"));
        assert_eq!(dict.suggest("postgres", 0.8), Some("POSTGRESQL"));
        assert_eq!(dict.suggest("cobol", 0.8), None);
    }

    #[test]
    fn test_every_entry_has_one_to_three_axes() {
        for (tech, caps) in ENTRIES {
            assert!(!caps.is_empty() && caps.len() <= 3, "{} has {} axes", tech, caps.len());
            let unique: HashSet<_> = caps.iter().collect();
            assert_eq!(unique.len(), caps.len(), "{} repeats an axis", tech);
        }
    }

    #[test]
    fn test_tokens_are_canonical_and_unique() {
        let mut seen = HashSet::new();
        for tech in CapabilityDictionary::global().technologies() {
            assert_eq!(tech, tech.to_uppercase());
            assert!(seen.insert(tech), "duplicate token {}", tech);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dict = CapabilityDictionary::global();
        assert_eq!(dict.capabilities("python"), dict.capabilities("PYTHON"));
        assert_eq!(dict.capabilities("Power BI"), &[TabularReasoning, Monitoring]);
        assert!(dict.capabilities("COBOL").is_empty());
        assert!(!dict.contains("COBOL"));
    }

    #[test]
    fn test_axis_order_and_labels() {
        for (i, cap) in Capability::ALL.iter().enumerate() {
            assert_eq!(cap.axis_index(), i);
        }
        assert_eq!(Monitoring.label(), "Monitoring");
        assert_eq!(DistributedExec.to_string(), "Distributed Exec");
    }

    #[test]
    fn test_capability_serializes_as_label() {
        let json = serde_json::to_string(&CloudStorage).unwrap();
        assert_eq!(json, "\"Cloud Storage\"");
    }

    #[test]
    fn test_technologies_for_axis() {
        let dict = CapabilityDictionary::global();
        let monitoring = dict.technologies_for(Monitoring);
        assert!(monitoring.contains(&"GRAFANA"));
        assert!(monitoring.contains(&"CLOUDWATCH"));
        assert!(!monitoring.contains(&"PYTHON"));
    }
}
