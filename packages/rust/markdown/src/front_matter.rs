//! Ad hoc front-matter handling.
//!
//! Fields are found by line-anchored `key:` matches anywhere in the text,
//! not only inside a delimited block. The block itself is removed by a
//! separate single-replacement pass.

use std::sync::LazyLock;

use regex::Regex;

/// Front-matter fields dashify cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub hidden: Option<String>,
}

impl FrontMatter {
    /// Scan `text` for the `title:` and `hidden:` lines.
    pub fn scan(text: &str) -> Self {
        static TITLE_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"(?m)^title:\s+(.*)$").expect("valid regex"));
        static HIDDEN_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"(?m)^hidden:\s+(.*)$").expect("valid regex"));

        Self {
            title: capture_field(&TITLE_RE, text).map(str::to_string),
            hidden: capture_field(&HIDDEN_RE, text).map(str::to_string),
        }
    }

    /// Only the exact value `true` hides a page.
    pub fn is_hidden(&self) -> bool {
        self.hidden.as_deref() == Some("true")
    }
}

/// First capture of a field regex, without the `\r` of a CRLF line.
fn capture_field<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('\r'))
}

/// Remove the first `---` delimited block and trim the remainder.
pub fn strip_front_matter(text: &str) -> String {
    static BLOCK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"---(\s[^-].*)*\s---\s*").expect("valid regex"));

    BLOCK_RE.replace(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_finds_title_and_hidden() {
        let fm = FrontMatter::scan("---\ntitle: Getting Started\nhidden: false\n---\n# Hi\n");
        assert_eq!(fm.title.as_deref(), Some("Getting Started"));
        assert_eq!(fm.hidden.as_deref(), Some("false"));
        assert!(!fm.is_hidden());
    }

    #[test]
    fn scan_matches_anywhere_in_text() {
        let fm = FrontMatter::scan("# Heading\n\nSome text\nhidden: true\n");
        assert!(fm.is_hidden());
    }

    #[test]
    fn scan_is_line_anchored_and_case_sensitive() {
        let fm = FrontMatter::scan("subtitle: nope\nTitle: Nope\n  title: indented\n");
        assert_eq!(fm.title, None);
    }

    #[test]
    fn scan_without_fields() {
        assert_eq!(FrontMatter::scan("just text"), FrontMatter::default());
    }

    #[test]
    fn hidden_requires_exact_true() {
        for value in ["True", "yes", "true ", "1"] {
            let fm = FrontMatter::scan(&format!("hidden: {value}\n"));
            assert!(!fm.is_hidden(), "{value:?} should not hide");
        }
    }

    #[test]
    fn crlf_lines_drop_carriage_return() {
        let fm = FrontMatter::scan("---\r\ntitle: Foo\r\nhidden: true\r\n---\r\nbody");
        assert_eq!(fm.title.as_deref(), Some("Foo"));
        assert!(fm.is_hidden());
    }

    #[test]
    fn first_title_wins() {
        let fm = FrontMatter::scan("title: One\ntitle: Two\n");
        assert_eq!(fm.title.as_deref(), Some("One"));
    }

    #[test]
    fn strip_removes_leading_block() {
        let md = "---\ntitle: Foo\norder: 2\n---\n\n# Foo\n\nBody.\n";
        assert_eq!(strip_front_matter(md), "# Foo\n\nBody.");
    }

    #[test]
    fn strip_only_first_block() {
        let md = "---\ntitle: A\n---\nfirst\n\n---\nnot: fm\n---\nsecond";
        let out = strip_front_matter(md);
        assert!(out.starts_with("first"));
        assert!(out.contains("not: fm"));
    }

    #[test]
    fn strip_leaves_text_without_block() {
        assert_eq!(strip_front_matter("  plain body  \n"), "plain body");
    }

    #[test]
    fn strip_block_only_leaves_nothing() {
        assert_eq!(strip_front_matter("---\nhidden: true\n---\n"), "");
    }

    #[test]
    fn unopened_block_is_kept() {
        let md = "title: Foo\n---\nbody text";
        assert_eq!(strip_front_matter(md), md);
    }
}
