//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Remove the output directory and everything in it
pub fn run(blog: &Blog) -> Result<()> {
    if blog.output_dir.exists() {
        fs::remove_dir_all(&blog.output_dir)?;
        tracing::info!("Removed {:?}", blog.output_dir);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_output_dir() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().to_path_buf();
        let config = SiteConfig::default();
        let blog = Blog {
            posts_dir: base.join(&config.posts_dir),
            output_dir: base.join(&config.output_dir),
            layouts_dir: base.join(&config.layouts_dir),
            base_dir: base,
            config,
        };

        fs::create_dir_all(&blog.output_dir).unwrap();
        fs::write(blog.output_dir.join("index.html"), "<html></html>").unwrap();

        run(&blog).unwrap();
        assert!(!blog.output_dir.exists());

        // Idempotent on a missing directory
        run(&blog).unwrap();
    }
}
