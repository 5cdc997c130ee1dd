//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::PostError;

/// Front-matter data from a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub featured_image: Option<String>,

    /// Additional custom fields, passed through untouched
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content).
    ///
    /// A document that opens with a bare `---` line and closes the block
    /// with another bare `---` line gets the enclosed YAML parsed strictly:
    /// malformed YAML fails the post. An empty block yields defaults.
    /// Anything else is treated as a document without front-matter.
    pub fn parse(content: &str) -> Result<(Self, &str), PostError> {
        let trimmed = content.trim_start();

        let Some(after_open) = trimmed.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        // The opening delimiter must end its line
        let Some(rest) = after_open
            .strip_prefix("\r\n")
            .or_else(|| after_open.strip_prefix('\n'))
        else {
            return Ok((FrontMatter::default(), content));
        };

        let Some((yaml_content, remaining)) = split_at_close(rest) else {
            // No closing delimiter, treat the whole document as body
            return Ok((FrontMatter::default(), content));
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
        Ok((fm, remaining))
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }
}

/// Split a front-matter block at its closing delimiter: a line that is
/// exactly `---`. Lines that merely start with dashes (`----`, `--- note`)
/// do not close the block.
fn split_at_close(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
        // Try parsing date only
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}
