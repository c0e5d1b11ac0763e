pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use crate::filter::{LinkClass, LinkClassifier};
use crate::results::{PageMeta, PageRecord};
use html::MetaTags;
use std::collections::BTreeMap;

/// Status reported for every page; nothing is fetched over HTTP
pub const STATIC_STATUS: u16 = 200;

const DEFAULT_ROBOTS: &str = "index,follow";
const DEFAULT_CHARSET: &str = "utf-8";

impl From<MetaTags> for PageMeta {
    fn from(meta: MetaTags) -> Self {
        Self {
            description: meta.description.unwrap_or_default(),
            keywords: meta.keywords.unwrap_or_default(),
            robots: meta.robots.unwrap_or_else(|| DEFAULT_ROBOTS.to_string()),
            canonical: meta.canonical.unwrap_or_default(),
            charset: meta.charset.unwrap_or_else(|| DEFAULT_CHARSET.to_string()),
        }
    }
}

/// Builds page records from HTML text.
///
/// Holds only immutable settings, so one extractor can be shared across
/// threads and applied to pages in any order.
#[derive(Debug, Clone)]
pub struct Extractor {
    classifier: LinkClassifier,
    include_content_html: bool,
}

impl Extractor {
    /// Create an extractor for a site domain
    pub fn new(domain: &str) -> Self {
        Self {
            classifier: LinkClassifier::new(domain),
            include_content_html: true,
        }
    }

    /// Set whether page records keep the raw markup
    pub fn with_content_html(mut self, include: bool) -> Self {
        self.include_content_html = include;
        self
    }

    pub fn classifier(&self) -> &LinkClassifier {
        &self.classifier
    }

    /// Extract one page record from its site path and markup
    pub fn extract(&self, path: impl Into<String>, html: &str) -> PageRecord {
        let path = path.into();

        let mut internal_links = Vec::new();
        let mut external_links = Vec::new();
        for link in html::extract_links(html) {
            match self.classifier.classify(&link.href) {
                LinkClass::Internal => internal_links.push(link),
                LinkClass::External => external_links.push(link),
            }
        }

        let images = html::extract_images(html);

        ::log::debug!(
            "Extracted {}: {} internal links, {} external links, {} images",
            path,
            internal_links.len(),
            external_links.len(),
            images.len()
        );

        PageRecord {
            path,
            status: STATIC_STATUS,
            title: html::extract_title(html),
            meta: html::extract_meta(html).into(),
            open_graph: BTreeMap::new(),
            twitter: BTreeMap::new(),
            headings: html::extract_headings(html),
            content_html: self.include_content_html.then(|| html.to_string()),
            internal_links,
            external_links,
            images,
            breadcrumbs: Vec::new(),
        }
    }
}
