//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL the generated pages are served from (used for permalinks and
    // the feed; trailing slash optional)
    pub url: String,

    // Directory
    pub posts_dir: String,
    pub output_dir: String,
    pub layouts_dir: String,

    // Date format for the human-readable display date (chrono strftime)
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            language: "en-US".to_string(),

            url: "http://example.com/blog".to_string(),

            posts_dir: "posts".to_string(),
            output_dir: "blog".to_string(),
            layouts_dir: "_layouts".to_string(),

            date_format: "%B %-d, %Y".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute permalink for a post slug
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/{}.html", self.base_url(), slug)
    }
}
