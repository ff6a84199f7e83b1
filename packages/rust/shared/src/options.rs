//! Build options for dashify.
//!
//! A build is driven by one JSON options file named on the command line.
//! Relative paths inside it resolve against the working directory.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{DashifyError, Result};

/// Type label given to pages no `types` pattern matches.
pub const DEFAULT_TYPE: &str = "Guide";

// ---------------------------------------------------------------------------
// Options file schema
// ---------------------------------------------------------------------------

/// The options file as written on disk (camelCase JSON).
///
/// `serde_json` is built with `preserve_order`, so both maps iterate in file
/// order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    docset_name: String,
    markdown_path: PathBuf,
    base_url: String,
    #[serde(default)]
    types: Map<String, Value>,
    #[serde(default)]
    plist: Map<String, Value>,
    icon_path: PathBuf,
}

/// Validated, immutable build options.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawOptions")]
pub struct BuildOptions {
    /// Bundle directory is `{docset_name}.docset`.
    pub docset_name: String,
    /// Root of the Markdown source tree.
    pub markdown_path: PathBuf,
    /// Prefix joined verbatim with each page's relative path.
    pub base_url: String,
    /// Classification rules in declared order; first match wins.
    pub types: Vec<TypeRule>,
    /// `Info.plist` entries in declared order.
    pub plist: Vec<(String, PlistValue)>,
    /// PNG copied to `icon.png` at the bundle root.
    pub icon_path: PathBuf,
}

impl TryFrom<RawOptions> for BuildOptions {
    type Error = String;

    fn try_from(raw: RawOptions) -> std::result::Result<Self, Self::Error> {
        let types = raw
            .types
            .into_iter()
            .map(|(pattern, label)| {
                let Value::String(label) = label else {
                    return Err(format!("type label for pattern {pattern:?} must be a string"));
                };
                TypeRule::new(&pattern, label)
                    .map_err(|e| format!("invalid type pattern {pattern:?}: {e}"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let plist = raw
            .plist
            .into_iter()
            .map(|(key, value)| (key, PlistValue::from(value)))
            .collect();

        Ok(Self {
            docset_name: raw.docset_name,
            markdown_path: raw.markdown_path,
            base_url: raw.base_url,
            types,
            plist,
            icon_path: raw.icon_path,
        })
    }
}

impl BuildOptions {
    /// Parse options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DashifyError::options(e.to_string()))
    }

    /// Resolve the type label for a page's relative path.
    pub fn classify(&self, relative_path: &str) -> &str {
        self.types
            .iter()
            .find(|rule| rule.matches(relative_path))
            .map(|rule| rule.label.as_str())
            .unwrap_or(DEFAULT_TYPE)
    }
}

/// Load build options from a JSON file.
pub fn load_options(path: &Path) -> Result<BuildOptions> {
    let content = std::fs::read_to_string(path).map_err(|e| DashifyError::io(path, e))?;

    let options = serde_json::from_str::<BuildOptions>(&content).map_err(|e| {
        DashifyError::options(format!("failed to parse {}: {e}", path.display()))
    })?;

    tracing::debug!(
        ?path,
        docset = %options.docset_name,
        types = options.types.len(),
        plist = options.plist.len(),
        "loaded build options"
    );
    Ok(options)
}

// ---------------------------------------------------------------------------
// Type rules
// ---------------------------------------------------------------------------

/// A `(pattern, label)` classification rule.
#[derive(Debug, Clone)]
pub struct TypeRule {
    pub pattern: Regex,
    pub label: String,
}

impl TypeRule {
    pub fn new(pattern: &str, label: impl Into<String>) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            label: label.into(),
        })
    }

    /// Unanchored search, like a JavaScript `RegExp.test`.
    pub fn matches(&self, relative_path: &str) -> bool {
        self.pattern.is_match(relative_path)
    }
}

// ---------------------------------------------------------------------------
// Plist values
// ---------------------------------------------------------------------------

/// A manifest value: booleans stay booleans, everything else is text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlistValue {
    Bool(bool),
    String(String),
}

impl From<Value> for PlistValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(b),
            Value::String(s) => Self::String(s),
            other => Self::String(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "docsetName": "X",
        "markdownPath": "docs",
        "baseUrl": "https://x/",
        "types": { "^guides/": "Guide", "^api/": "API" },
        "plist": { "CFBundleName": "X", "DashDocSetFamily": true },
        "iconPath": "icon.png"
    }"#;

    #[test]
    fn parses_camel_case_fields() {
        let opts = BuildOptions::from_json(SCENARIO).expect("parse");
        assert_eq!(opts.docset_name, "X");
        assert_eq!(opts.markdown_path, PathBuf::from("docs"));
        assert_eq!(opts.base_url, "https://x/");
        assert_eq!(opts.icon_path, PathBuf::from("icon.png"));
    }

    #[test]
    fn types_keep_declared_order() {
        let opts = BuildOptions::from_json(SCENARIO).unwrap();
        let labels: Vec<&str> = opts.types.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Guide", "API"]);
    }

    #[test]
    fn classify_first_match_wins() {
        let json = r#"{
            "docsetName": "X", "markdownPath": "docs", "baseUrl": "", "iconPath": "i.png",
            "types": { "ref": "Reference", "^api/": "API" }
        }"#;
        let opts = BuildOptions::from_json(json).unwrap();
        assert_eq!(opts.classify("api/ref/foo"), "Reference");
        assert_eq!(opts.classify("api/foo"), "API");
        assert_eq!(opts.classify("intro"), DEFAULT_TYPE);
    }

    #[test]
    fn classify_is_case_sensitive() {
        let opts = BuildOptions::from_json(SCENARIO).unwrap();
        assert_eq!(opts.classify("API/foo"), "Guide");
        assert_eq!(opts.classify("api/foo"), "API");
    }

    #[test]
    fn plist_values_keep_order_and_kind() {
        let opts = BuildOptions::from_json(SCENARIO).unwrap();
        assert_eq!(
            opts.plist,
            vec![
                ("CFBundleName".to_string(), PlistValue::String("X".into())),
                ("DashDocSetFamily".to_string(), PlistValue::Bool(true)),
            ]
        );
    }

    #[test]
    fn plist_numbers_become_strings() {
        assert_eq!(
            PlistValue::from(serde_json::json!(42)),
            PlistValue::String("42".into())
        );
    }

    #[test]
    fn invalid_pattern_is_options_error() {
        let json = r#"{
            "docsetName": "X", "markdownPath": "docs", "baseUrl": "", "iconPath": "i.png",
            "types": { "(": "Broken" }
        }"#;
        let err = BuildOptions::from_json(json).unwrap_err();
        assert!(matches!(err, DashifyError::Options { .. }));
        assert!(err.to_string().contains("invalid type pattern"));
    }

    #[test]
    fn non_string_label_is_rejected() {
        let json = r#"{
            "docsetName": "X", "markdownPath": "docs", "baseUrl": "", "iconPath": "i.png",
            "types": { "^api/": 3 }
        }"#;
        assert!(BuildOptions::from_json(json).is_err());
    }

    #[test]
    fn missing_field_is_options_error() {
        let err = BuildOptions::from_json(r#"{ "docsetName": "X" }"#).unwrap_err();
        assert!(matches!(err, DashifyError::Options { .. }));
    }

    #[test]
    fn load_options_reads_file() {
        let path = std::env::temp_dir().join(format!("dashify-opts-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, SCENARIO).unwrap();

        let opts = load_options(&path).expect("load");
        assert_eq!(opts.docset_name, "X");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_options_malformed_json() {
        let path = std::env::temp_dir().join(format!("dashify-opts-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_options(&path).unwrap_err();
        assert!(matches!(err, DashifyError::Options { .. }));
        assert!(err.to_string().contains("failed to parse"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_options_missing_file_is_io_error() {
        let err = load_options(Path::new("/nonexistent/dashify.json")).unwrap_err();
        assert!(matches!(err, DashifyError::Io { .. }));
    }
}
