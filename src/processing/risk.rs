//! Risk flags: job-text phrasing that signals a hard requirement

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// A labelled set of alternative patterns; fires when any one matches.
pub struct RiskProbe {
    pub label: &'static str,
    patterns: Vec<Regex>,
}

impl RiskProbe {
    fn new(label: &'static str, patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).expect("Invalid risk probe regex"))
            .collect();
        Self { label, patterns }
    }

    /// `text` is expected to be lowercased already.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

static PROBES: Lazy<Vec<RiskProbe>> = Lazy::new(|| {
    vec![
        RiskProbe::new(
            "Security clearance required",
            &[r"security clearance", r"\b(?:ts/sci|top secret|secret) clearance\b", r"\bclearable\b"],
        ),
        RiskProbe::new(
            "Citizenship or work authorization restriction",
            &[
                r"\bu\.?s\.? citizen(?:ship)?\b",
                r"\bcitizenship (?:is )?required\b",
                r"\b(?:no|without|unable to provide) (?:visa )?sponsorship\b",
            ],
        ),
        RiskProbe::new(
            "Degree requirement",
            &[
                r"\b(?:bachelor'?s|master'?s|ph\.?d\.?|doctorate)(?: degree)?(?: [a-z ]{0,40})? (?:is )?required\b",
                r"\bdegree (?:is )?required\b",
                r"\brequires? an? (?:bachelor'?s|master'?s) degree\b",
            ],
        ),
        RiskProbe::new(
            "Minimum years of experience",
            &[
                r"\b\d+\+?\s*(?:-\s*\d+\s*)?years? of (?:professional |relevant |hands-on )?experience\b",
                r"\bminimum (?:of )?\d+\+? years?\b",
                r"\bat least \d+\+? years?\b",
            ],
        ),
        RiskProbe::new(
            "Certification required",
            &[r"\bcertification (?:is )?required\b", r"\bmust (?:be|hold an?) (?:[a-z]+ )?certifi(?:ed|cation)\b"],
        ),
        RiskProbe::new(
            "On-site only",
            &[r"\bon-?site\b", r"\bin[- ]office\b", r"\bno remote\b", r"\bnot remote\b"],
        ),
        RiskProbe::new(
            "Travel requirement",
            &[r"\btravel (?:up to )?\d+\s*%", r"\bwilling(?:ness)? to travel\b", r"\bextensive travel\b"],
        ),
        RiskProbe::new(
            "Non-negotiable language",
            &[r"\bmust (?:have|possess)\b", r"\bnon-?negotiable\b", r"\bmandatory\b", r"\bstrictly required\b"],
        ),
    ]
});

/// The probe table, in emission order.
pub fn probes() -> &'static [RiskProbe] {
    &PROBES
}

/// Labels of every probe that fires on `job_text`, in probe order.
pub fn detect_risk_flags(job_text: &str) -> Vec<String> {
    let lowered = job_text.to_lowercase();
    let flags: Vec<String> = probes()
        .iter()
        .filter(|probe| probe.matches(&lowered))
        .map(|probe| probe.label.to_string())
        .collect();

    debug!("Risk probes fired: {:?}", flags);
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_probes_compile() {
        assert_eq!(probes().len(), 8);
    }

    #[test]
    fn test_no_flags_on_plain_text() {
        assert!(detect_risk_flags("We build data pipelines with Python and Spark.").is_empty());
        assert!(detect_risk_flags("").is_empty());
    }

    #[test]
    fn test_flags_follow_probe_order_not_text_order() {
        let text = "This role is on-site in Austin. Active Security Clearance required.";
        assert_eq!(
            detect_risk_flags(text),
            vec!["Security clearance required".to_string(), "On-site only".to_string()]
        );
    }

    #[test]
    fn test_multiple_independent_probes() {
        let text = "Must have 5+ years of experience with AWS. Bachelor's degree in Computer Science required. \
                    Willing to travel. US citizen only; no sponsorship.";
        let flags = detect_risk_flags(text);
        assert_eq!(
            flags,
            vec![
                "Citizenship or work authorization restriction",
                "Degree requirement",
                "Minimum years of experience",
                "Travel requirement",
                "Non-negotiable language",
            ]
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(detect_risk_flags("MANDATORY overtime"), vec!["Non-negotiable language"]);
    }
}
