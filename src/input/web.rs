//! Job posting and profile retrieval and condensation

use crate::config::FetchConfig;
use crate::error::{Result, SkillTopologyError};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use std::time::Duration;

static SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid script pattern"));
static STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid style pattern"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Posting headings worth keeping, in output order, with how many characters follow each.
static JOB_SECTIONS: Lazy<Vec<(Regex, usize)>> = Lazy::new(|| {
    headings(&[
        ("responsibilities", 5000),
        ("requirements", 5000),
        ("qualifications", 5000),
        ("skills", 3000),
    ])
});

static PROFILE_SECTIONS: Lazy<Vec<(Regex, usize)>> =
    Lazy::new(|| headings(&[("experience", 5000), ("skills", 2000), ("education", 2000)]));

/// Characters of page text kept when a profile has no known heading.
const PROFILE_FALLBACK_CHARS: usize = 5000;

const PROFILE_HOST: &str = "linkedin.com";

fn headings(list: &[(&str, usize)]) -> Vec<(Regex, usize)> {
    list.iter()
        .map(|(heading, follow)| {
            let pattern = Regex::new(&format!("(?i){}", regex::escape(heading))).expect("valid heading pattern");
            (pattern, *follow)
        })
        .collect()
}

/// Download a job posting and condense it to its requirement sections.
pub async fn fetch_job_posting(url: &str, config: &FetchConfig) -> Result<String> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(SkillTopologyError::InvalidInput(format!("Not an http(s) URL: {}", url)));
    }

    info!("Fetching job posting: {}", url);
    let html = fetch_page(url, config, "job posting").await?;
    Ok(extract_job_content(&html, config.max_chars))
}

/// Download a public LinkedIn profile and condense it to its resume sections.
pub async fn fetch_profile(url: &str, config: &FetchConfig) -> Result<String> {
    if !is_profile_url(url) {
        return Err(SkillTopologyError::InvalidInput(format!("Valid LinkedIn URL required: {}", url)));
    }

    info!("Fetching profile: {}", url);
    let html = fetch_page(url, config, "LinkedIn profile").await?;
    Ok(extract_profile_content(&html))
}

/// An http(s) URL whose host is linkedin.com or one of its subdomains.
pub fn is_profile_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    parsed
        .host_str()
        .map(|host| {
            let host = host.to_ascii_lowercase();
            host == PROFILE_HOST || host.ends_with(&format!(".{}", PROFILE_HOST))
        })
        .unwrap_or(false)
}

async fn fetch_page(url: &str, config: &FetchConfig, what: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SkillTopologyError::Network(format!(
            "Failed to fetch {} ({}). The site may be blocking requests; paste the text instead.",
            what, status
        )));
    }

    let html = response.text().await?;
    debug!("Fetched {} bytes of HTML", html.len());
    Ok(html)
}

/// Strip markup and keep the requirement-bearing sections of a posting.
///
/// Falls back to the whole page text when no known heading appears. The
/// result never exceeds `max_chars` characters.
pub fn extract_job_content(html: &str, max_chars: usize) -> String {
    let text = page_text(html);
    let condensed = sections(&text, &JOB_SECTIONS).unwrap_or(text);
    condensed.chars().take(max_chars).collect()
}

/// Strip markup and keep the Experience, Skills and Education sections of a
/// profile, or the first 5000 characters when none is present.
pub fn extract_profile_content(html: &str) -> String {
    let text = page_text(html);
    sections(&text, &PROFILE_SECTIONS).unwrap_or_else(|| text.chars().take(PROFILE_FALLBACK_CHARS).collect())
}

fn page_text(html: &str) -> String {
    let text = SCRIPT.replace_all(html, "");
    let text = STYLE.replace_all(&text, "");
    let text = TAG.replace_all(&text, " ");
    let text = text.replace("&nbsp;", " ").replace("&amp;", "&");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Found sections joined by blank lines, or `None` when no heading matches.
fn sections(text: &str, table: &[(Regex, usize)]) -> Option<String> {
    let found: Vec<String> = table
        .iter()
        .filter_map(|(pattern, follow)| section(text, pattern, *follow))
        .collect();
    if found.is_empty() {
        None
    } else {
        Some(found.join("\n\n"))
    }
}

/// Text from the first match of `heading`, plus up to `follow` further characters.
fn section(text: &str, heading: &Regex, follow: usize) -> Option<String> {
    let found = heading.find(text)?;
    let rest: String = text[found.end()..].chars().take(follow).collect();
    Some(format!("{}{}", found.as_str(), rest))
}
