use crate::config::{AnalyticsConfig, SiteConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Heading texts keyed by tag name (`h1`..`h6`)
pub type Headings = BTreeMap<String, Vec<String>>;

/// One line of the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Record {
    #[serde(rename = "site")]
    Site(SiteRecord),

    #[serde(rename = "robotsTxt")]
    Robots(FileRecord),

    #[serde(rename = "sitemapXml")]
    Sitemap(FileRecord),

    #[serde(rename = "page")]
    Page(Box<PageRecord>),
}

impl Record {
    /// Serialize as a single manifest line (no trailing newline)
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Site-wide constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub domain: String,
    pub www_policy: String,
    pub trailing_slash: String,
    pub default_lang: String,
    pub encoding: String,
    pub analytics: AnalyticsConfig,
}

impl From<&SiteConfig> for SiteRecord {
    fn from(site: &SiteConfig) -> Self {
        Self {
            domain: site.domain.clone(),
            www_policy: site.www_policy.clone(),
            trailing_slash: site.trailing_slash.clone(),
            default_lang: site.default_lang.clone(),
            encoding: site.encoding.clone(),
            analytics: site.analytics.clone(),
        }
    }
}

/// Raw contents of a root-level file such as `robots.txt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub content: String,
}

/// Extracted metadata for one HTML page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Site path, always starting with `/`
    pub path: String,
    pub status: u16,
    pub title: String,
    pub meta: PageMeta,
    pub open_graph: BTreeMap<String, String>,
    pub twitter: BTreeMap<String, String>,
    pub headings: Headings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    pub internal_links: Vec<LinkRecord>,
    pub external_links: Vec<LinkRecord>,
    pub images: Vec<ImageRecord>,
    pub breadcrumbs: Vec<String>,
}

/// Meta values of a page with defaults filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub description: String,
    pub keywords: String,
    pub robots: String,
    pub canonical: String,
    pub charset: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub href: String,
    pub anchor: String,
    pub rel: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub width: String,
    pub height: String,
}
