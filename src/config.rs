//! Run configuration
//!
//! Every field has a default, so a TOML file only needs the keys it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extractors::LocationPolicy;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub syllabus: SyllabusConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.scrape.validate()?;
        Ok(config)
    }

    /// Load `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Listing URL with a `{page}` placeholder
    pub listing_url: String,
    pub first_page: u32,
    /// Upper bound on listing pages visited
    pub max_pages: Option<u32>,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub respect_robots: bool,
    pub location_policy: LocationPolicy,
    pub output: PathBuf,
    pub delimiter: char,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://it.pracuj.pl/praca?pn={page}".to_string(),
            first_page: 1,
            max_pages: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            respect_robots: true,
            location_policy: LocationPolicy::default(),
            output: PathBuf::from("job_descriptions.csv"),
            delimiter: ',',
        }
    }
}

impl ScrapeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.listing_url.contains("{page}") {
            return Err(Error::Config(format!(
                "listing_url must contain a {{page}} placeholder: {}",
                self.listing_url
            )));
        }
        if self.max_pages == Some(0) {
            return Err(Error::Config("max_pages must be at least 1".to_string()));
        }
        if !self.delimiter.is_ascii() {
            return Err(Error::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }

    pub fn listing_page_url(&self, page: u32) -> String {
        self.listing_url.replace("{page}", &page.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyllabusConfig {
    /// Directory holding the syllabus PDFs
    pub input_dir: PathBuf,
    /// Directory receiving the filtered markdown, and the input of skill extraction
    pub markdown_dir: PathBuf,
    pub skills_output: PathBuf,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for SyllabusConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            markdown_dir: PathBuf::from("output"),
            skills_output: PathBuf::from("extracted_skills.json"),
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4.1-nano".to_string(),
            temperature: 0.1,
            timeout_secs: 120,
        }
    }
}
