//! Technology extraction: whole-word dictionary lookup over free text

use crate::error::{Result, SkillTopologyError};
use crate::processing::dictionary::CapabilityDictionary;
use aho_corasick::AhoCorasick;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use std::collections::HashSet;

/// Finds dictionary technologies in text.
///
/// An Aho-Corasick automaton over all tokens picks candidates in one pass;
/// each candidate is then confirmed with a whole-word regex. A token only
/// matches when it is not glued to neighbouring word characters, so `GO`
/// never matches inside `DJANGO`.
pub struct TechnologyExtractor {
    dictionary: &'static CapabilityDictionary,
    candidates: AhoCorasick,
    patterns: Vec<(&'static str, Regex)>,
}

impl TechnologyExtractor {
    pub fn new() -> Result<Self> {
        Self::with_dictionary(CapabilityDictionary::global())
    }

    pub fn with_dictionary(dictionary: &'static CapabilityDictionary) -> Result<Self> {
        let tokens: Vec<&str> = dictionary.technologies().collect();

        let candidates = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&tokens)
            .map_err(|e| SkillTopologyError::Processing(format!("Failed to build technology matcher: {}", e)))?;

        let patterns = tokens
            .iter()
            .map(|tech| Ok((*tech, Self::whole_word_regex(tech)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            dictionary,
            candidates,
            patterns,
        })
    }

    /// Build the boundary-anchored pattern for one token.
    ///
    /// A `\b` is only placed on a side whose edge character is a word
    /// character; a token like `C#` already ends on a separator.
    fn whole_word_regex(tech: &str) -> Result<Regex> {
        let is_word = |c: char| c.is_alphanumeric() || c == '_';
        let leading = if tech.chars().next().map_or(false, is_word) { r"\b" } else { "" };
        let trailing = if tech.chars().last().map_or(false, is_word) { r"\b" } else { "" };
        let pattern = format!("{}{}{}", leading, regex::escape(tech), trailing);

        Regex::new(&pattern)
            .map_err(|e| SkillTopologyError::Processing(format!("Invalid pattern for '{}': {}", tech, e)))
    }

    /// Pattern ids whose literal text occurs anywhere in `upper`.
    fn candidate_ids(&self, upper: &str) -> HashSet<usize> {
        self.candidates
            .find_overlapping_iter(upper)
            .map(|mat| mat.pattern().as_usize())
            .collect()
    }

    /// Distinct technologies present in `text`, in dictionary order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.extract_with_counts(text).into_keys().collect()
    }

    /// Technologies present in `text` with their whole-word occurrence counts.
    pub fn extract_with_counts(&self, text: &str) -> IndexMap<String, usize> {
        let mut found = IndexMap::new();
        if text.trim().is_empty() {
            return found;
        }

        let upper = text.to_uppercase();
        let candidates = self.candidate_ids(&upper);

        for (id, (tech, pattern)) in self.patterns.iter().enumerate() {
            if !candidates.contains(&id) {
                continue;
            }
            let count = pattern.find_iter(&upper).count();
            if count > 0 {
                found.insert(tech.to_string(), count);
            }
        }

        debug!("Extracted {} technologies from {} characters", found.len(), text.len());
        found
    }

    pub fn dictionary(&self) -> &'static CapabilityDictionary {
        self.dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TechnologyExtractor {
        TechnologyExtractor::new().unwrap()
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("   \n\t").is_empty());
    }

    #[test]
    fn test_text_without_tokens_yields_nothing() {
        let techs = extractor().extract("Great communicator who enjoys long walks.");
        assert!(techs.is_empty());
    }

    #[test]
    fn test_case_insensitive_extraction() {
        let techs = extractor().extract("Experienced with python, Docker and kubernetes.");
        assert_eq!(techs, vec!["DOCKER", "KUBERNETES", "PYTHON"]);
    }

    #[test]
    fn test_substring_tokens_do_not_match() {
        let techs = extractor().extract("DJANGO");
        assert_eq!(techs, vec!["DJANGO"]);
        assert!(!techs.contains(&"GO".to_string()));

        assert_eq!(extractor().extract("GO"), vec!["GO"]);
        assert!(extractor().extract("GOOGLE ALGORITHMS").is_empty());
    }

    #[test]
    fn test_tokens_with_metacharacters() {
        let techs = extractor().extract("Backend in C# and Node. Dashboards in Power BI.");
        assert!(techs.contains(&"C#".to_string()));
        assert!(techs.contains(&"NODE".to_string()));
        assert!(techs.contains(&"POWER BI".to_string()));
        assert!(!techs.contains(&"POWERBI".to_string()));
    }

    #[test]
    fn test_overlapping_tokens_both_found() {
        let techs = extractor().extract("Git workflows on GitHub");
        assert!(techs.contains(&"GIT".to_string()));
        assert!(techs.contains(&"GITHUB".to_string()));
    }

    #[test]
    fn test_counts_are_whole_word_occurrences() {
        let counts = extractor().extract_with_counts("AWS, aws and more AWS. Not AWSOME. Python once.");
        assert_eq!(counts.get("AWS"), Some(&3));
        assert_eq!(counts.get("PYTHON"), Some(&1));
        assert_eq!(counts.get("GO"), None);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Spark, Kafka, Airflow, SQL, Snowflake and Tableau";
        assert_eq!(extractor().extract(text), extractor().extract(text));
    }
}
