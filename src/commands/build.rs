//! Build the blog: posts, index page and RSS feed

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::generator::Generator;
use crate::Blog;

/// Run a full build. Posts are processed concurrently; the index and feed
/// are generated only after every post has settled.
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    fs::create_dir_all(&blog.output_dir)?;
    fs::create_dir_all(&blog.layouts_dir)?;

    let generator = Arc::new(Generator::new(blog)?);

    // A missing posts directory means zero posts, not a failed build
    if !blog.posts_dir.exists() {
        tracing::info!(
            "Posts directory {:?} not found, creating empty blog structure",
            blog.posts_dir
        );
        fs::create_dir_all(&blog.posts_dir)?;
        generator.generate_index(&[])?;
        generator.generate_feed(&[])?;
        println!("Build complete! Generated 0 posts");
        return Ok(());
    }

    let files = discover_posts(&blog.posts_dir)?;
    if files.is_empty() {
        tracing::info!("No markdown files found in {:?}", blog.posts_dir);
        generator.generate_index(&[])?;
        println!("Build complete! Generated 0 posts");
        return Ok(());
    }

    let total = files.len();
    let mut tasks = JoinSet::new();
    for path in files {
        let generator = generator.clone();
        tasks.spawn(async move {
            match generator.process_post(&path).await {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("Failed to process {:?}: {}", path, e);
                    None
                }
            }
        });
    }

    let mut posts = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        if let Some(post) = joined? {
            posts.push(post);
        }
    }

    generator.generate_index(&posts)?;
    generator.generate_feed(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} of {} posts in {:.2}s",
        posts.len(),
        total,
        duration.as_secs_f64()
    );
    println!("Build complete! Generated {} posts", posts.len());

    Ok(())
}

/// Collect markdown files under the posts directory. Sorted so task spawn
/// order is deterministic. Discovery errors here are fatal.
fn discover_posts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_markdown_file(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
