use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Site-wide constants written into the manifest's `site` record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Bare host name of the site, e.g. `example.com`
    pub domain: String,

    /// Canonical host policy (`no-www`, `www`)
    #[serde(default = "default_www_policy")]
    pub www_policy: String,

    /// Trailing slash policy for page URLs
    #[serde(default = "default_trailing_slash")]
    pub trailing_slash: String,

    /// Default content language
    #[serde(default = "default_lang")]
    pub default_lang: String,

    /// Declared site encoding
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Analytics identifiers installed on the site
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Analytics identifiers, grouped by provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Google Tag Manager container ids
    #[serde(default)]
    pub gtm: Vec<String>,

    /// Universal Analytics property ids
    #[serde(default)]
    pub ga_ua: Vec<String>,

    /// Yandex Metrika counter ids
    #[serde(default)]
    pub yandex_metrika: Vec<String>,
}

/// Configuration for building a manifest from a site directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Root directory of the static site
    pub root_dir: PathBuf,

    /// Site constants
    pub site: SiteConfig,

    /// File extensions treated as HTML pages (case-insensitive, without dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Regex patterns for site paths to skip
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Maximum number of pages extracted at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Whether page records carry the raw markup in `contentHtml`
    #[serde(default = "default_include_content_html")]
    pub include_content_html: bool,
}

fn default_www_policy() -> String {
    "no-www".to_string()
}

fn default_trailing_slash() -> String {
    "preserve".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["htm".to_string()]
}

fn default_max_concurrency() -> usize {
    4
}

fn default_include_content_html() -> bool {
    true
}

impl SiteConfig {
    /// Create a site configuration with default policies for the given domain
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            www_policy: default_www_policy(),
            trailing_slash: default_trailing_slash(),
            default_lang: default_lang(),
            encoding: default_encoding(),
            analytics: AnalyticsConfig::default(),
        }
    }

    /// Return a copy with the domain normalized to a bare lower-case host
    pub fn normalized(mut self) -> Result<Self> {
        self.domain = normalize_domain(&self.domain)?;
        Ok(self)
    }
}

impl BuildConfig {
    /// Create a new configuration with default values
    pub fn new(root_dir: impl Into<PathBuf>, domain: &str) -> Self {
        Self {
            root_dir: root_dir.into(),
            site: SiteConfig::new(domain),
            extensions: default_extensions(),
            exclude_patterns: Vec::new(),
            max_concurrency: default_max_concurrency(),
            include_content_html: default_include_content_html(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

/// Reduce a user-supplied domain to the bare host used for link classification.
///
/// Accepts `example.com`, `Example.com/` or a full URL such as
/// `https://example.com/path`.
pub fn normalize_domain(raw: &str) -> Result<String> {
    let lowered = raw.trim().to_lowercase();
    if lowered.contains("://") {
        let url = Url::parse(&lowered).map_err(|_| Error::InvalidDomain(raw.to_string()))?;
        return url
            .host_str()
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidDomain(raw.to_string()));
    }

    let host = lowered.trim_end_matches('/');
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(Error::InvalidDomain(raw.to_string()));
    }
    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("example.com").unwrap(), "example.com");
        assert_eq!(normalize_domain("  Example.COM/ ").unwrap(), "example.com");
        assert_eq!(
            normalize_domain("https://www.Example.com/about").unwrap(),
            "www.example.com"
        );
        assert!(normalize_domain("").is_err());
        assert!(normalize_domain("   ").is_err());
        assert!(normalize_domain("two words").is_err());
    }

    #[test]
    fn test_defaults_from_json() {
        let json = r#"{"root_dir": "/srv/site", "site": {"domain": "example.com"}}"#;
        let config = BuildConfig::from_json(json).unwrap();

        assert_eq!(config.root_dir, PathBuf::from("/srv/site"));
        assert_eq!(config.extensions, vec!["htm"]);
        assert_eq!(config.max_concurrency, 4);
        assert!(config.include_content_html);
        assert!(config.exclude_patterns.is_empty());
        assert_eq!(config.site.www_policy, "no-www");
        assert_eq!(config.site.trailing_slash, "preserve");
        assert_eq!(config.site.encoding, "utf-8");
        assert!(config.site.analytics.gtm.is_empty());
    }

    #[test]
    fn test_full_site_from_json() {
        let json = r#"{
            "root_dir": "site",
            "extensions": ["htm", "html"],
            "max_concurrency": 1,
            "site": {
                "domain": "stroyglobal.com",
                "default_lang": "ru",
                "analytics": {"gtm": ["GTM-NDB4QN5"], "yandex_metrika": ["21670957"]}
            }
        }"#;
        let config = BuildConfig::from_json(json).unwrap();

        assert_eq!(config.extensions, vec!["htm", "html"]);
        assert_eq!(config.max_concurrency, 1);
        assert_eq!(config.site.default_lang, "ru");
        assert_eq!(config.site.analytics.gtm, vec!["GTM-NDB4QN5"]);
        assert!(config.site.analytics.ga_ua.is_empty());
        assert_eq!(config.site.analytics.yandex_metrika, vec!["21670957"]);
    }

    #[test]
    fn test_missing_domain_is_rejected() {
        let json = r#"{"root_dir": "site", "site": {}}"#;
        assert!(matches!(
            BuildConfig::from_json(json),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let result = BuildConfig::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
