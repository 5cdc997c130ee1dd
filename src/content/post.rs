//! Post model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A processed blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Slug (URL- and filesystem-friendly name, unique per run)
    pub slug: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Human-readable display date
    pub formatted_date: String,

    /// Optional author byline
    pub author: Option<String>,

    /// Summary shown in listings and the feed
    pub excerpt: String,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Estimated reading time in minutes
    pub read_time: u32,

    /// Optional featured image URL or path
    pub featured_image: Option<String>,

    /// Source file name
    pub source: String,

    /// Full permalink URL
    pub url: String,
}

impl Post {
    /// Template data for this post. Optional fields are simply absent from
    /// the map, which makes their conditional blocks falsy.
    pub fn template_data(&self) -> HashMap<String, String> {
        let mut data = HashMap::new();
        data.insert("title".to_string(), self.title.clone());
        data.insert("slug".to_string(), self.slug.clone());
        data.insert("date".to_string(), self.date.to_rfc3339());
        data.insert("formattedDate".to_string(), self.formatted_date.clone());
        data.insert("excerpt".to_string(), self.excerpt.clone());
        data.insert("content".to_string(), self.content.clone());
        data.insert("readTime".to_string(), self.read_time.to_string());
        data.insert("url".to_string(), self.url.clone());
        if let Some(author) = &self.author {
            data.insert("author".to_string(), author.clone());
        }
        if let Some(image) = &self.featured_image {
            data.insert("featured_image".to_string(), image.clone());
        }
        data
    }
}

/// Reading time estimate: ceil(words / 200), where words are runs of
/// non-whitespace. An empty body reads in zero minutes.
pub fn estimate_read_time(body: &str) -> u32 {
    const WORDS_PER_MINUTE: usize = 200;
    body.split_whitespace().count().div_ceil(WORDS_PER_MINUTE) as u32
}

/// Excerpt fallback: the first 160 characters of the raw markdown body
/// plus an ellipsis. Truncation intentionally ignores word boundaries and
/// operates on the raw text, not the rendered HTML.
pub fn excerpt_fallback(body: &str) -> String {
    let mut excerpt: String = body.chars().take(160).collect();
    excerpt.push_str("...");
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_read_time_boundaries() {
        assert_eq!(estimate_read_time(""), 0);
        assert_eq!(estimate_read_time("word"), 1);
        assert_eq!(estimate_read_time(&words(200)), 1);
        assert_eq!(estimate_read_time(&words(201)), 2);
        assert_eq!(estimate_read_time(&words(400)), 2);
        assert_eq!(estimate_read_time(&words(401)), 3);
    }

    #[test]
    fn test_read_time_whitespace_runs() {
        assert_eq!(estimate_read_time("one\t\ttwo\n\n  three"), 1);
        assert_eq!(estimate_read_time("   \n\t  "), 0);
    }

    #[test]
    fn test_excerpt_fallback_truncates() {
        let body = "a".repeat(300);
        let excerpt = excerpt_fallback(&body);
        assert_eq!(excerpt.len(), 163);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_excerpt_fallback_short_body() {
        assert_eq!(excerpt_fallback("short"), "short...");
    }

    #[test]
    fn test_template_data_optional_fields() {
        let post = Post {
            title: "T".to_string(),
            slug: "t".to_string(),
            date: Local::now(),
            formatted_date: "January 1, 2024".to_string(),
            author: None,
            excerpt: "e".to_string(),
            raw: String::new(),
            content: "<p>e</p>".to_string(),
            read_time: 1,
            featured_image: None,
            source: "t.md".to_string(),
            url: "http://example.com/blog/t.html".to_string(),
        };
        let data = post.template_data();
        assert!(!data.contains_key("author"));
        assert!(!data.contains_key("featured_image"));
        assert_eq!(data.get("readTime").map(String::as_str), Some("1"));
    }
}
