//! Markdown page preparation and HTML rendering.
//!
//! Turns a source file's text into either a skip decision or a rendered
//! HTML body, and wraps rendered bodies in the minimal docset page skeleton.

mod front_matter;

use pulldown_cmark::{Options, Parser, html};
use tracing::{debug, instrument};

pub use front_matter::{FrontMatter, strip_front_matter};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Why a source file produced no page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `hidden: true` appears in the text.
    Hidden,
    /// Nothing left after stripping front matter.
    Empty,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Hidden => write!(f, "hidden"),
            SkipReason::Empty => write!(f, "empty"),
        }
    }
}

/// A page that survived filtering, rendered to an HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPage {
    pub title: Option<String>,
    pub body_html: String,
}

/// Outcome of [`prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    Page(PreparedPage),
    Skipped(SkipReason),
}

// ---------------------------------------------------------------------------
// Preparation
// ---------------------------------------------------------------------------

/// Apply the front-matter rules to one file and render what is left.
///
/// 1. Scan for `title:` / `hidden:` lines
/// 2. Skip hidden pages
/// 3. Strip the front-matter block and trim
/// 4. Skip empty bodies
/// 5. Render the body to HTML
#[instrument(skip(text), fields(len = text.len()))]
pub fn prepare(text: &str) -> Prepared {
    let front_matter = FrontMatter::scan(text);
    debug!(title = ?front_matter.title, "front matter scanned");

    if front_matter.is_hidden() {
        return Prepared::Skipped(SkipReason::Hidden);
    }

    let body = strip_front_matter(text);
    if body.is_empty() {
        debug!("empty doc");
        return Prepared::Skipped(SkipReason::Empty);
    }

    Prepared::Page(PreparedPage {
        title: front_matter.title,
        body_html: render_markdown(&body),
    })
}

/// Render Markdown to an HTML fragment.
///
/// CommonMark plus the GitHub extensions documentation trees lean on.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Wrap a rendered body in the docset page skeleton.
///
/// A missing title renders as an empty `<title>`.
pub fn wrap_document(online_url: &str, title: Option<&str>, body_html: &str) -> String {
    let title = html_escape::encode_text(title.unwrap_or_default());
    format!(
        "<html><!-- Online page at {online_url} --><head><title>{title}</title></head><body>{body_html}</body></html>"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
