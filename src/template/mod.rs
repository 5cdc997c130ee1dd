//! Flat placeholder templating
//!
//! Templates contain `{{key}}` placeholders and `{{#key}}...{{/key}}`
//! conditional blocks. Blocks do not nest; a section marker inside a
//! block body is emitted as literal text. Rendering is a single pass:
//! substituted values are never re-scanned for placeholders, and
//! placeholders whose key is absent from the data are left verbatim.

pub mod builtin;

use std::collections::HashMap;

/// A parsed template fragment
#[derive(Debug, PartialEq)]
enum Token<'a> {
    /// Verbatim text
    Literal(&'a str),
    /// `{{key}}`
    Placeholder(&'a str),
    /// `{{#key}}body{{/key}}`; the body holds literals and placeholders only
    Section { key: &'a str, body: Vec<Token<'a>> },
}

/// Render a template against a key/value mapping.
///
/// Conditional blocks resolve before plain substitution: a block whose key
/// maps to a truthy value (non-empty and not "0") is replaced by its body
/// (with the body's own placeholders substituted from the full mapping),
/// otherwise by nothing.
pub fn render(template: &str, data: &HashMap<String, String>) -> String {
    let tokens = parse(template, true);
    let mut out = String::with_capacity(template.len());
    render_tokens(&tokens, data, &mut out);
    out
}

fn render_tokens(tokens: &[Token], data: &HashMap<String, String>, out: &mut String) {
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Placeholder(key) => match data.get(*key) {
                Some(value) => out.push_str(value),
                // Unknown placeholders pass through untouched
                None => {
                    out.push_str("{{");
                    out.push_str(key);
                    out.push_str("}}");
                }
            },
            Token::Section { key, body } => {
                // Absent, empty and "0" are all falsy
                let truthy = data.get(*key).is_some_and(|v| !v.is_empty() && v != "0");
                if truthy {
                    render_tokens(body, data, out);
                }
            }
        }
    }
}

/// Tokenize a template. `sections` is false inside a block body, where
/// section markers have no meaning and fall through as literals.
fn parse(template: &str, sections: bool) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            tokens.push(Token::Literal(&rest[..start]));
        }
        let tail = &rest[start..];

        if sections && tail.starts_with("{{#") {
            if let Some((key, after_open)) = read_tag(&tail[3..]) {
                let close = format!("{{{{/{key}}}}}");
                if let Some(end) = after_open.find(&close) {
                    // Same key closes the block it opened; the first close
                    // wins, so matching is non-greedy
                    tokens.push(Token::Section {
                        key,
                        body: parse(&after_open[..end], false),
                    });
                    rest = &after_open[end + close.len()..];
                    continue;
                }
            }
            // Unclosed or malformed block: the marker is plain text
            tokens.push(Token::Literal(&tail[..2]));
            rest = &tail[2..];
            continue;
        }

        match read_tag(&tail[2..]) {
            Some((key, after)) => {
                tokens.push(Token::Placeholder(key));
                rest = after;
            }
            None => {
                // `{{` not followed by a well-formed tag (e.g. a stray
                // `{{/key}}`) stays literal
                tokens.push(Token::Literal(&tail[..2]));
                rest = &tail[2..];
            }
        }
    }

    if !rest.is_empty() {
        tokens.push(Token::Literal(rest));
    }
    tokens
}

/// Read a `key}}` prefix. Keys are word characters only.
fn read_tag(input: &str) -> Option<(&str, &str)> {
    let end = input.find("}}")?;
    let key = &input[..end];
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((key, &input[end + 2..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_substitution() {
        let out = render("<h1>{{title}}</h1>", &data(&[("title", "Hello")]));
        assert_eq!(out, "<h1>Hello</h1>");
    }

    #[test]
    fn test_repeated_placeholder() {
        let out = render("{{x}} and {{x}}", &data(&[("x", "y")]));
        assert_eq!(out, "y and y");
    }

    #[test]
    fn test_no_tokens_is_identity() {
        let template = "<p>plain text, no tokens</p>";
        assert_eq!(render(template, &HashMap::new()), template);
    }

    #[test]
    fn test_absent_key_left_untouched() {
        let template = "{{known}} {{unknown}}";
        let out = render(template, &data(&[("known", "v")]));
        assert_eq!(out, "v {{unknown}}");
    }

    #[test]
    fn test_conditional_truthy() {
        let template = "<p>{{#author}}by {{author}}{{/author}}</p>";
        let out = render(template, &data(&[("author", "Jane")]));
        assert_eq!(out, "<p>by Jane</p>");
    }

    #[test]
    fn test_conditional_absent_or_empty_is_falsy() {
        let template = "<p>{{#author}}by {{author}}{{/author}}</p>";
        assert_eq!(render(template, &HashMap::new()), "<p></p>");
        assert_eq!(render(template, &data(&[("author", "")])), "<p></p>");
    }

    #[test]
    fn test_conditional_zero_is_falsy_but_substitutes() {
        let template = "{{#readTime}}{{readTime}} min{{/readTime}}|{{readTime}}";
        assert_eq!(render(template, &data(&[("readTime", "0")])), "|0");
        assert_eq!(render(template, &data(&[("readTime", "3")])), "3 min|3");
    }

    #[test]
    fn test_conditional_body_uses_full_mapping() {
        let template = "{{#img}}<img src=\"{{img}}\" alt=\"{{title}}\">{{/img}}";
        let out = render(template, &data(&[("img", "/a.png"), ("title", "T")]));
        assert_eq!(out, "<img src=\"/a.png\" alt=\"T\">");
    }

    #[test]
    fn test_conditional_spans_lines() {
        let template = "{{#a}}\nline one\nline two {{a}}\n{{/a}}";
        let out = render(template, &data(&[("a", "!")]));
        assert_eq!(out, "\nline one\nline two !\n");
    }

    #[test]
    fn test_unclosed_section_is_literal() {
        let template = "{{#a}} never closed {{a}}";
        let out = render(template, &data(&[("a", "x")]));
        assert_eq!(out, "{{#a}} never closed x");
    }

    #[test]
    fn test_stray_close_is_literal() {
        let out = render("text {{/a}} more", &data(&[("a", "x")]));
        assert_eq!(out, "text {{/a}} more");
    }

    #[test]
    fn test_nested_section_marker_stays_literal() {
        let template = "{{#a}}outer {{#b}}inner{{/b}}{{/a}}";
        let out = render(template, &data(&[("a", "x"), ("b", "y")]));
        assert_eq!(out, "outer {{#b}}inner{{/b}}");
    }

    #[test]
    fn test_single_pass_no_recursive_substitution() {
        let out = render("{{a}}", &data(&[("a", "{{b}}"), ("b", "oops")]));
        assert_eq!(out, "{{b}}");
    }

    #[test]
    fn test_non_word_tag_is_literal() {
        let template = "{{not a key}} {{}}";
        assert_eq!(render(template, &HashMap::new()), template);
    }
}
