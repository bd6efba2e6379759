//! Turning author-supplied image references into URLs the webview can load.
//!
//! References come straight from the portfolio markdown, so they may carry
//! spaces, accents or parentheses. Each one goes through three steps:
//! `normalize_path` (override table or filename sanitizing), `encode_for_url`
//! (percent-encode the final segment) and `to_absolute` (prefix the page
//! origin).

use std::collections::BTreeMap;

use log::{debug, warn};
use unicode_normalization::UnicodeNormalization;

/// Scheme and host every relative reference is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOrigin {
    pub scheme: String,
    pub host: String,
}

impl PageOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Origin of the page served through the `folio` custom protocol.
    pub fn app() -> Self {
        if cfg!(windows) {
            Self::new("http", "folio.localhost")
        } else {
            Self::new("folio", "localhost")
        }
    }

    pub fn url(&self) -> String {
        format!("{}://{}/", self.scheme, self.host)
    }
}

impl Default for PageOrigin {
    fn default() -> Self {
        Self::app()
    }
}

/// Known original paths and the form they should be requested under.
///
/// Lookups are exact. Entries may map a path to itself, which pins it and
/// keeps it from being sanitized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameOverrides {
    entries: BTreeMap<String, String>,
}

impl NameOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, original: impl Into<String>, normalized: impl Into<String>) {
        self.entries.insert(original.into(), normalized.into());
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (original, normalized) in iter {
            overrides.insert(original, normalized);
        }
        overrides
    }
}

/// Reduce a file name to `[a-z0-9._-]`.
///
/// Accents are stripped, whitespace runs become one hyphen, parentheses are
/// dropped, runs of periods and hyphens collapse, and hyphens never lead or
/// trail.
pub fn sanitize_name(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect::<String>()
        .to_lowercase();

    let mut out = String::with_capacity(folded.len());
    let mut in_whitespace = false;
    for c in folded.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                push_hyphen(&mut out);
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        match c {
            '(' | ')' => {}
            '.' => {
                if !out.ends_with('.') {
                    out.push('.');
                }
            }
            '-' => push_hyphen(&mut out),
            'a'..='z' | '0'..='9' | '_' => out.push(c),
            _ => push_hyphen(&mut out),
        }
    }

    out.trim_matches('-').to_string()
}

fn push_hyphen(out: &mut String) {
    if !out.ends_with('-') {
        out.push('-');
    }
}

/// Split `path` at its last `/` into (directory, file name).
fn split_last_segment(path: &str) -> (Option<&str>, &str) {
    match path.rfind('/') {
        Some(pos) => (Some(&path[..pos]), &path[pos + 1..]),
        None => (None, path),
    }
}

fn join_segment(directory: Option<&str>, file: &str) -> String {
    match directory {
        Some(dir) => format!("{dir}/{file}"),
        None => file.to_string(),
    }
}

/// Map a reference to its canonical form: the override table first, then
/// sanitizing the file name. The directory prefix is never touched.
pub fn normalize_path(path: &str, overrides: &NameOverrides) -> String {
    if path.is_empty() {
        return String::new();
    }

    if let Some(mapped) = overrides.get(path) {
        return mapped.to_string();
    }

    let (directory, file) = split_last_segment(path);
    let sanitized = sanitize_name(file);
    if sanitized.is_empty() {
        return path.to_string();
    }

    join_segment(directory, &sanitized)
}

/// Percent-encode only the final path segment.
pub fn encode_for_url(path: &str) -> String {
    let (directory, file) = split_last_segment(path);
    join_segment(directory, &urlencoding::encode(file))
}

/// Resolve `path` against `origin` unless it is already an http(s) URL.
pub fn to_absolute(path: &str, origin: &PageOrigin) -> String {
    if path.is_empty() {
        return String::new();
    }

    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let path = path.trim_start_matches('/');
    format!("{}://{}/{}", origin.scheme, origin.host, path)
}

/// The full chain used for every carousel image.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    pub overrides: NameOverrides,
    pub origin: PageOrigin,
}

impl PathResolver {
    pub fn new(overrides: NameOverrides, origin: PageOrigin) -> Self {
        Self { overrides, origin }
    }

    pub fn resolve(&self, reference: &str) -> String {
        let normalized = normalize_path(reference, &self.overrides);
        to_absolute(&encode_for_url(&normalized), &self.origin)
    }

    /// Resolve every reference in order. Empty references resolve to an
    /// empty string and are left for the caller to filter.
    pub fn resolve_all<S: AsRef<str>>(&self, references: &[S]) -> Vec<String> {
        if references.is_empty() {
            warn!("resolve_all: no image references given");
            return Vec::new();
        }

        let total = references.len();
        references
            .iter()
            .enumerate()
            .map(|(i, reference)| {
                let reference = reference.as_ref();
                if reference.trim().is_empty() {
                    warn!("[{}/{}] empty image reference", i + 1, total);
                    return String::new();
                }
                let resolved = self.resolve(reference);
                debug!("[{}/{}] {} -> {}", i + 1, total, reference, resolved);
                resolved
            })
            .collect()
    }
}
