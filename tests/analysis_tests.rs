//! End-to-end analysis tests over fixtures and hand-written inputs

use skill_topology::processing::dictionary::{Capability, CapabilityDictionary};
use skill_topology::visualization::sankey::SankeyNodeGroup;
use skill_topology::{analyze, AnalysisEngine};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_reference_scenario() {
    let report = analyze(
        "We need AWS, Kubernetes, Python and Grafana.",
        "Experienced with Azure, Docker and Python.",
    )
    .unwrap();

    assert_eq!(report.score.job_techs, strings(&["AWS", "KUBERNETES", "PYTHON", "GRAFANA"]));
    assert_eq!(report.score.resume_techs, strings(&["AZURE", "DOCKER", "PYTHON"]));
    assert_eq!(report.score.keyword_match, 25);
    assert_eq!(report.score.capability_match, 75);
    assert_eq!(report.score.delta, 50);
    assert_eq!(report.score.gaps, strings(&["AWS", "KUBERNETES", "GRAFANA"]));
}

#[test]
fn test_fixture_pair() {
    let report = analyze(&fixture("sample_job.txt"), &fixture("sample_resume.txt")).unwrap();
    let score = &report.score;

    assert_eq!(score.job_techs.len(), 10);
    assert_eq!(score.resume_techs.len(), 13);
    assert_eq!(score.gaps, strings(&["KUBERNETES", "TERRAFORM", "REDIS", "AIRFLOW", "DATADOG"]));
    assert_eq!(score.keyword_match, 50);
    assert_eq!(score.capability_match, 76);
    assert_eq!(score.delta, 26);

    let ranked: Vec<&str> = report.ats_priority.iter().map(|p| p.tech.as_str()).collect();
    assert_eq!(ranked, vec!["KUBERNETES", "TERRAFORM", "AIRFLOW", "REDIS", "DATADOG"]);
    assert_eq!(report.ats_priority[0].occurrences, 2);

    assert_eq!(
        report.risk_flags,
        strings(&["Minimum years of experience", "On-site only", "Non-negotiable language"])
    );
}

#[test]
fn test_analysis_is_deterministic() {
    let job = fixture("sample_job.txt");
    let resume = fixture("sample_resume.md");
    let engine = AnalysisEngine::new().unwrap();

    let first = serde_json::to_string(&engine.analyze(&job, &resume)).unwrap();
    let second = serde_json::to_string(&engine.analyze(&job, &resume)).unwrap();
    let third = serde_json::to_string(&analyze(&job, &resume).unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn test_score_properties_hold_across_inputs() {
    let texts = [
        "",
        "Python",
        "AWS AWS AWS and Kubernetes",
        "Snowflake, dbt, Airflow, Looker and Git",
        "C# and .NET with SQL Server, Power BI and Azure",
        "nothing technical here at all",
    ];
    let dictionary = CapabilityDictionary::global();

    for job in texts {
        for resume in texts {
            let report = analyze(job, resume).unwrap();
            let score = &report.score;

            assert!(score.keyword_match <= 100);
            assert!(score.capability_match <= 100);
            assert_eq!(score.delta, score.capability_match as i32 - score.keyword_match as i32);

            for gap in &score.gaps {
                assert!(score.job_techs.contains(gap));
                assert!(!score.resume_techs.contains(gap));
            }
            for tech in &score.job_techs {
                assert!(score.gaps.contains(tech) || score.resume_techs.contains(tech));
            }

            assert_eq!(report.ats_priority.len(), score.gaps.len());
            assert_eq!(report.transfer_map.len(), score.gaps.len());
            for window in report.ats_priority.windows(2) {
                assert!(window[0].score >= window[1].score);
            }
            for suggestion in report.transfer_map.values() {
                assert!(suggestion.resume_techs.len() <= 4);
            }

            assert_eq!(report.radar.categories.len(), Capability::ALL.len());
            for i in 0..report.radar.axis_count() {
                let (r, j) = (report.radar.resume[i], report.radar.job[i]);
                assert!(r <= 100 && j <= 100);
                assert!(r == 100 || j == 100 || (r == 0 && j == 0));
            }

            for link in &report.sankey.links {
                assert!(report.sankey.node(&link.source).is_some());
                assert!(report.sankey.node(&link.target).is_some());
            }
            let expected_links: usize = score
                .resume_techs
                .iter()
                .chain(score.job_techs.iter())
                .map(|t| dictionary.capabilities(t).len())
                .sum();
            assert_eq!(report.sankey.links.len(), expected_links);
        }
    }
}

#[test]
fn test_empty_inputs_degrade_to_zero() {
    let report = analyze("", "").unwrap();
    assert_eq!(report.score.keyword_match, 0);
    assert_eq!(report.score.capability_match, 0);
    assert_eq!(report.score.delta, 0);
    assert!(report.score.gaps.is_empty());
    assert!(report.ats_priority.is_empty());
    assert!(report.transfer_map.is_empty());
    assert!(report.risk_flags.is_empty());
    assert!(report.sankey.nodes.is_empty());
    assert!(report.radar.resume.iter().all(|v| *v == 0));
}

#[test]
fn test_sankey_columns_match_technologies() {
    let report = analyze(&fixture("sample_job.txt"), &fixture("sample_resume.txt")).unwrap();
    assert_eq!(
        report.sankey.nodes_in(SankeyNodeGroup::Resume).count(),
        report.score.resume_techs.len()
    );
    assert_eq!(
        report.sankey.nodes_in(SankeyNodeGroup::Job).count(),
        report.score.job_techs.len()
    );
    assert!(report.sankey.nodes_in(SankeyNodeGroup::Capability).count() <= Capability::ALL.len());
}
