//! Pattern-based extraction of SEO fields from HTML markup.
//!
//! Nothing here builds a DOM. Every extractor scans the raw text with regular
//! expressions tuned for well-formed static pages, so nesting errors and
//! unusual attribute quoting are handled on a best-effort basis only.

use crate::parsers::text::strip_tags;
use crate::results::{Headings, ImageRecord, LinkRecord};
use regex::Regex;
use std::sync::LazyLock;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<title\b[^>]*>([\s\S]*?)</title>").expect("valid title regex")
});

static CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*"?([^\s"/>]+)"?"#).expect("valid charset regex")
});

static CANONICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link[^>]*rel\s*=\s*"?canonical"?[^>]*href\s*=\s*"([^"]+)""#)
        .expect("valid canonical regex")
});

static NAMED_META_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    ["description", "keywords", "robots"].map(|name| {
        Regex::new(&format!(
            r#"(?i)<meta[^>]*name\s*=\s*"?{name}"?[^>]*content\s*=\s*"([^"]*)""#
        ))
        .expect("valid meta regex")
    })
});

static HEADING_RES: LazyLock<Vec<(String, Regex)>> = LazyLock::new(|| {
    (1..=6)
        .map(|level| {
            let tag = format!("h{level}");
            let re = Regex::new(&format!(r"(?i)<{tag}[^>]*>([\s\S]*?)</{tag}>"))
                .expect("valid heading regex");
            (tag, re)
        })
        .collect()
});

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<a[^>]*href\s*=\s*"([^"]+)"[^>]*>)([\s\S]*?)</a>"#)
        .expect("valid anchor regex")
});

static REL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)rel\s*=\s*"([^"]+)""#).expect("valid rel regex"));

static TARGET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)target\s*=\s*"([^"]+)""#).expect("valid target regex"));

static IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img[^>]*>").expect("valid img regex"));

static IMG_ATTR_RES: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    ["src", "alt", "title", "width", "height"].map(|attr| {
        Regex::new(&format!(r#"(?i){attr}\s*=\s*"([^"]*)""#)).expect("valid img attribute regex")
    })
});

/// Meta values found in a document. `None` means no matching tag was present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTags {
    pub charset: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub robots: Option<String>,
    pub canonical: Option<String>,
}

/// Returns the stripped text of the first `<title>` element, or an empty string
pub fn extract_title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .map(|caps| strip_tags(&caps[1]))
        .unwrap_or_default()
}

/// Extracts charset, description, keywords, robots and canonical.
///
/// When several tags declare the same key the first one in the document wins.
pub fn extract_meta(html: &str) -> MetaTags {
    let [description, keywords, robots] = &*NAMED_META_RES;
    let content = |re: &Regex| re.captures(html).map(|caps| caps[1].trim().to_string());

    MetaTags {
        charset: CHARSET_RE
            .captures(html)
            .map(|caps| caps[1].to_lowercase()),
        description: content(description),
        keywords: content(keywords),
        robots: content(robots),
        canonical: content(&CANONICAL_RE),
    }
}

/// Collects non-empty heading texts per level, omitting levels with none
pub fn extract_headings(html: &str) -> Headings {
    let mut headings = Headings::new();

    for (tag, re) in HEADING_RES.iter() {
        let items: Vec<String> = re
            .captures_iter(html)
            .map(|caps| strip_tags(&caps[1]))
            .filter(|text| !text.is_empty())
            .collect();

        if !items.is_empty() {
            headings.insert(tag.clone(), items);
        }
    }

    headings
}

/// Extracts every anchor with a quoted, non-empty `href`, in document order
pub fn extract_links(html: &str) -> Vec<LinkRecord> {
    let links: Vec<LinkRecord> = ANCHOR_RE
        .captures_iter(html)
        .map(|caps| {
            let open_tag = &caps[1];
            LinkRecord {
                href: caps[2].trim().to_string(),
                anchor: strip_tags(&caps[3]),
                rel: first_capture(&REL_RE, open_tag),
                target: first_capture(&TARGET_RE, open_tag),
            }
        })
        .collect();

    ::log::debug!("HTML extractor found {} links", links.len());
    links
}

/// Extracts one record per `<img>` tag, including ones without a `src`
pub fn extract_images(html: &str) -> Vec<ImageRecord> {
    IMG_RE
        .find_iter(html)
        .map(|m| {
            let tag = m.as_str();
            let [src, alt, title, width, height] = &*IMG_ATTR_RES;
            ImageRecord {
                src: first_capture(src, tag).trim().to_string(),
                alt: first_capture(alt, tag).trim().to_string(),
                title: first_capture(title, tag).trim().to_string(),
                width: first_capture(width, tag).trim().to_string(),
                height: first_capture(height, tag).trim().to_string(),
            }
        })
        .collect()
}

fn first_capture(re: &Regex, haystack: &str) -> String {
    re.captures(haystack)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}
