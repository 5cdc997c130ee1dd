//! bloggen: a small Markdown blog generator
//!
//! Converts a directory of Markdown posts with YAML front-matter into
//! per-post HTML pages, an index page and an RSS feed.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod template;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main blog application: configuration plus resolved directories
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown input directory
    pub posts_dir: PathBuf,
    /// Generated output directory
    pub output_dir: PathBuf,
    /// Template override directory
    pub layouts_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a base directory, loading
    /// `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let output_dir = base_dir.join(&config.output_dir);
        let layouts_dir = base_dir.join(&config.layouts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            output_dir,
            layouts_dir,
        })
    }

    /// Build the blog
    pub async fn build(&self) -> Result<()> {
        commands::build::run(self).await
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
