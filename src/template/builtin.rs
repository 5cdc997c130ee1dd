//! Built-in default templates, embedded in the binary.
//!
//! The post template can be overridden by `{layouts_dir}/post.html`; the
//! index and post-card templates are always these built-ins.

/// Default layout for a single post page
pub const POST: &str = include_str!("builtin/post.html");

/// Layout for the blog index page
pub const INDEX: &str = include_str!("builtin/index.html");

/// One summary card on the index page
pub const POST_CARD: &str = include_str!("builtin/post_card.html");
