//! Input manager: turns files, URLs, and pasted text into analysis text

use crate::config::FetchConfig;
use crate::error::{Result, SkillTopologyError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::input::web;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Where a piece of analysis text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    File(std::path::PathBuf),
    /// Job posting page
    Url(String),
    /// Public LinkedIn profile page
    ProfileUrl(String),
    Text(String),
}

impl InputSource {
    pub fn describe(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Url(url) | InputSource::ProfileUrl(url) => url.clone(),
            InputSource::Text(_) => "pasted text".to_string(),
        }
    }
}

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    fetch: FetchConfig,
}

impl InputManager {
    pub fn new(fetch: FetchConfig) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            fetch,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Resolve a source to non-empty text.
    pub async fn read(&mut self, source: &InputSource) -> Result<String> {
        let text = match source {
            InputSource::File(path) => self.extract_text(path).await?,
            InputSource::Url(url) => self.fetch_url(url).await?,
            InputSource::ProfileUrl(url) => self.fetch_profile_url(url).await?,
            InputSource::Text(text) => text.clone(),
        };

        if text.trim().is_empty() {
            return Err(SkillTopologyError::InvalidInput(format!(
                "No text found in {}",
                source.describe()
            )));
        }
        Ok(text)
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(SkillTopologyError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path).ok_or_else(|| {
            SkillTopologyError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(SkillTopologyError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    pub async fn fetch_url(&mut self, url: &str) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(url) {
                info!("Using cached posting for: {}", url);
                return Ok(cached_text.clone());
            }
        }

        let text = web::fetch_job_posting(url, &self.fetch).await?;

        if self.enable_cache {
            self.cache.insert(url.to_string(), text.clone());
        }
        Ok(text)
    }

    pub async fn fetch_profile_url(&mut self, url: &str) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(url) {
                info!("Using cached profile for: {}", url);
                return Ok(cached_text.clone());
            }
        }

        let text = web::fetch_profile(url, &self.fetch).await?;

        if self.enable_cache {
            self.cache.insert(url.to_string(), text.clone());
        }
        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
