//! Generator module - renders posts, the index page and the RSS feed

use anyhow::Result;
use chrono::{Datelike, Local, Utc};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::content::{
    estimate_read_time, excerpt_fallback, FrontMatter, MarkdownRenderer, Post, PostError,
};
use crate::template::{self, builtin};
use crate::Blog;

/// Static site generator. Cheap to share across post tasks: holds the
/// resolved configuration, the markdown renderer and the post template
/// loaded once per run.
pub struct Generator {
    blog: Blog,
    renderer: MarkdownRenderer,
    post_template: String,
    claimed_slugs: Mutex<HashSet<String>>,
}

impl Generator {
    /// Create a new generator. Loads the post template override from
    /// `{layouts_dir}/post.html` if present, else the built-in default.
    pub fn new(blog: &Blog) -> Result<Self> {
        let override_path = blog.layouts_dir.join("post.html");
        let post_template = if override_path.exists() {
            tracing::debug!("Using post template from {:?}", override_path);
            fs::read_to_string(&override_path)?
        } else {
            tracing::debug!("Post template not found, using default layout");
            builtin::POST.to_string()
        };

        Ok(Self {
            blog: blog.clone(),
            renderer: MarkdownRenderer::new(),
            post_template,
            claimed_slugs: Mutex::new(HashSet::new()),
        })
    }

    /// Process a single post: parse, render, and write `{slug}.html`.
    /// Every failure is per-post; the caller decides what to log and the
    /// batch carries on without the post.
    pub async fn process_post(&self, path: &Path) -> Result<Post, PostError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PostError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let (fm, body) = FrontMatter::parse(&raw)?;

        // Explicit date must parse; a missing one falls back to build time
        let date = match &fm.date {
            Some(s) => fm.parse_date().ok_or_else(|| PostError::Date(s.clone()))?,
            None => Local::now(),
        };

        let file_stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        let slug = self.claim_slug(&derive_slug(&fm, file_stem));

        let title = fm.title.clone().unwrap_or_else(|| "Untitled".to_string());
        let content = self.renderer.render(body);
        let excerpt = fm.excerpt.clone().unwrap_or_else(|| excerpt_fallback(body));

        let post = Post {
            title,
            slug: slug.clone(),
            date,
            formatted_date: date.format(&self.blog.config.date_format).to_string(),
            author: fm.author.clone(),
            excerpt,
            raw: body.to_string(),
            content,
            read_time: estimate_read_time(body),
            featured_image: fm.featured_image.clone(),
            source: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            url: self.blog.config.post_url(&slug),
        };

        let mut data = post.template_data();
        self.insert_site_data(&mut data);
        let html = template::render(&self.post_template, &data);

        let output_path = self.blog.output_dir.join(format!("{slug}.html"));
        tokio::fs::write(&output_path, html)
            .await
            .map_err(|source| PostError::Write {
                path: output_path.clone(),
                source,
            })?;

        tracing::info!("Generated {:?}", output_path);
        Ok(post)
    }

    /// Generate the blog index page. An empty post list still produces a
    /// valid page with an empty grid.
    pub fn generate_index(&self, posts: &[Post]) -> Result<()> {
        let sorted = sort_by_date_desc(posts);

        let cards: Vec<String> = sorted
            .iter()
            .map(|post| template::render(builtin::POST_CARD, &post.template_data()))
            .collect();

        let mut data = HashMap::new();
        data.insert("posts".to_string(), cards.join("\n"));
        self.insert_site_data(&mut data);
        let html = template::render(builtin::INDEX, &data);

        let output_path = self.blog.output_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::info!("Generated {:?}", output_path);

        Ok(())
    }

    /// Generate the RSS 2.0 feed. An empty post list yields a valid feed
    /// with zero items.
    pub fn generate_feed(&self, posts: &[Post]) -> Result<()> {
        let sorted = sort_by_date_desc(posts);
        let config = &self.blog.config;
        let base_url = config.base_url();

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        feed.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str("  <channel>\n");
        feed.push_str(&format!("    <title><![CDATA[{}]]></title>\n", cdata(&config.title)));
        feed.push_str(&format!(
            "    <description><![CDATA[{}]]></description>\n",
            cdata(&config.description)
        ));
        feed.push_str(&format!("    <link>{}/</link>\n", base_url));
        feed.push_str(&format!(
            "    <atom:link href=\"{}/rss.xml\" rel=\"self\" type=\"application/rss+xml\"/>\n",
            base_url
        ));
        feed.push_str(&format!("    <language>{}</language>\n", config.language));
        feed.push_str(&format!(
            "    <lastBuildDate>{}</lastBuildDate>\n",
            Utc::now().to_rfc2822()
        ));
        feed.push_str(&format!(
            "    <generator>bloggen {}</generator>\n",
            env!("CARGO_PKG_VERSION")
        ));

        for post in &sorted {
            feed.push_str("    <item>\n");
            feed.push_str(&format!(
                "      <title><![CDATA[{}]]></title>\n",
                cdata(&post.title)
            ));
            feed.push_str(&format!(
                "      <description><![CDATA[{}]]></description>\n",
                cdata(&post.excerpt)
            ));
            feed.push_str(&format!("      <link>{}</link>\n", post.url));
            feed.push_str(&format!("      <guid>{}</guid>\n", post.url));
            feed.push_str(&format!(
                "      <pubDate>{}</pubDate>\n",
                post.date.with_timezone(&Utc).to_rfc2822()
            ));
            feed.push_str("    </item>\n");
        }

        feed.push_str("  </channel>\n");
        feed.push_str("</rss>\n");

        let output_path = self.blog.output_dir.join("rss.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated {:?}", output_path);

        Ok(())
    }

    /// Site-wide template values shared by every page
    fn insert_site_data(&self, data: &mut HashMap<String, String>) {
        data.insert("site_title".to_string(), self.blog.config.title.clone());
        data.insert(
            "site_description".to_string(),
            self.blog.config.description.clone(),
        );
        data.insert("year".to_string(), Local::now().year().to_string());
    }

    /// Claim a slug for this run. Collisions get a numeric suffix instead
    /// of silently overwriting an earlier post's output file.
    fn claim_slug(&self, candidate: &str) -> String {
        let mut claimed = self
            .claimed_slugs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if claimed.insert(candidate.to_string()) {
            return candidate.to_string();
        }
        let mut n = 2;
        loop {
            let suffixed = format!("{candidate}-{n}");
            if claimed.insert(suffixed.clone()) {
                tracing::warn!("Slug {:?} already taken, using {:?}", candidate, suffixed);
                return suffixed;
            }
            n += 1;
        }
    }
}

/// Derive a slug: explicit front-matter field, else title, else file stem.
/// Every candidate is slugified so the result is lowercase word characters
/// and hyphens only, and never empty.
fn derive_slug(fm: &FrontMatter, file_stem: &str) -> String {
    let candidates = [fm.slug.as_deref(), fm.title.as_deref(), Some(file_stem)];
    for candidate in candidates.into_iter().flatten() {
        let slug = slug::slugify(candidate);
        if !slug.is_empty() {
            return slug;
        }
    }
    "untitled".to_string()
}

/// Stable date-descending sort; equal dates keep their relative order
fn sort_by_date_desc(posts: &[Post]) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Guard CDATA payloads against a literal `]]>` terminator
fn cdata(s: &str) -> String {
    s.replace("]]>", "]]]]><![CDATA[>")
}
