use regex::Regex;
use std::sync::LazyLock;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+:").expect("valid scheme regex"));

/// Schemes that never point at a page of the site
const NON_NAVIGATIONAL: [&str; 3] = ["mailto:", "tel:", "javascript:"];

/// Prefixes of absolute URLs, including protocol-relative ones
const ABSOLUTE: [&str; 3] = ["http://", "https://", "//"];

/// Prefixes of fragments and site-relative references
const RELATIVE: [&str; 4] = ["#", "/", "./", "../"];

/// Where a link points relative to the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    Internal,
    External,
}

impl LinkClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkClass::Internal => "internal",
            LinkClass::External => "external",
        }
    }
}

/// Sorts links into internal and external for one site domain.
///
/// Absolute URLs count as internal when the domain occurs anywhere in the
/// lower-cased href. This is plain substring containment, not host equality:
/// `https://notexample.com` and `https://other.org/?ref=example.com` are both
/// internal for `example.com`. Manifest consumers rely on this behavior, so it
/// is kept as a known limitation.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    domain: String,
}

impl LinkClassifier {
    /// Create a classifier for the given site domain
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into().to_lowercase(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Classify one href, first matching rule wins
    pub fn classify(&self, href: &str) -> LinkClass {
        let href = href.trim();
        let lower = href.to_lowercase();

        if href.is_empty() || NON_NAVIGATIONAL.iter().any(|s| lower.starts_with(s)) {
            return LinkClass::External;
        }

        if ABSOLUTE.iter().any(|p| lower.starts_with(p)) {
            return if lower.contains(self.domain.as_str()) {
                LinkClass::Internal
            } else {
                LinkClass::External
            };
        }

        if RELATIVE.iter().any(|p| href.starts_with(p)) || !SCHEME_RE.is_match(href) {
            return LinkClass::Internal;
        }

        LinkClass::External
    }
}

/// Decides which files under the site root are pages
#[derive(Debug)]
pub struct PathFilter {
    extensions: Vec<String>,
    exclude_regexes: Vec<Regex>,
}

impl PathFilter {
    /// Create a new filter; extensions are matched case-insensitively without the dot
    pub fn new(extensions: &[String], exclude_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            extensions: extensions
                .iter()
                .map(|ext| format!(".{}", ext.trim_start_matches('.').to_lowercase()))
                .collect(),
            exclude_regexes,
        })
    }

    /// Check a site path such as `/catalog/index.htm`
    pub fn is_page(&self, site_path: &str) -> bool {
        let lower = site_path.to_lowercase();
        if !self.extensions.iter().any(|ext| lower.ends_with(ext)) {
            return false;
        }

        if let Some(regex) = self.exclude_regexes.iter().find(|re| re.is_match(site_path)) {
            ::log::debug!("Skipping {} (matches {})", site_path, regex.as_str());
            return false;
        }

        true
    }
}
