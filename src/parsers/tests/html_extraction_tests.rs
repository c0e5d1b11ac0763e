use crate::parsers::html::{
    MetaTags, extract_headings, extract_images, extract_links, extract_meta, extract_title,
};
use crate::results::{ImageRecord, LinkRecord};

#[cfg(test)]
mod title_tests {
    use super::*;

    #[test]
    fn test_first_title_is_stripped() {
        let html = "<head><TITLE>  Steel <b>frames</b> &amp; more </TITLE><title>Second</title>";
        assert_eq!(extract_title(html), "Steel frames & more");
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(extract_title("<html><body>No title</body></html>"), "");
        assert_eq!(extract_title(""), "");
    }
}

#[cfg(test)]
mod meta_tests {
    use super::*;

    #[test]
    fn test_all_keys() {
        let html = r#"<head>
            <meta charset="UTF-8">
            <meta name="description" content=" Hello & welcome ">
            <meta name="keywords" content="steel, frames">
            <meta name="robots" content="noindex,nofollow">
            <link rel="canonical" href="https://example.com/a.htm">
        </head>"#;

        assert_eq!(
            extract_meta(html),
            MetaTags {
                charset: Some("utf-8".to_string()),
                description: Some("Hello & welcome".to_string()),
                keywords: Some("steel, frames".to_string()),
                robots: Some("noindex,nofollow".to_string()),
                canonical: Some("https://example.com/a.htm".to_string()),
            }
        );
    }

    #[test]
    fn test_description_keeps_literal_ampersand() {
        let meta = extract_meta(r#"<meta name="description" content="Hello & welcome"/>"#);
        assert_eq!(meta.description.as_deref(), Some("Hello & welcome"));
    }

    #[test]
    fn test_absent_keys_are_omitted() {
        assert_eq!(extract_meta("<p>nothing here</p>"), MetaTags::default());
    }

    #[test]
    fn test_first_match_wins() {
        let html = r#"
            <meta name="description" content="first">
            <meta name="description" content="second">
            <meta charset="windows-1251">
            <meta charset="utf-8">
            <link rel="canonical" href="/one.htm">
            <link rel="canonical" href="/two.htm">"#;
        let meta = extract_meta(html);

        assert_eq!(meta.description.as_deref(), Some("first"));
        assert_eq!(meta.charset.as_deref(), Some("windows-1251"));
        assert_eq!(meta.canonical.as_deref(), Some("/one.htm"));
    }

    #[test]
    fn test_case_insensitive_and_http_equiv_charset() {
        let html = r#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; Charset=Windows-1251">
            <META NAME=Keywords CONTENT="a, b">"#;
        let meta = extract_meta(html);

        assert_eq!(meta.charset.as_deref(), Some("windows-1251"));
        assert_eq!(meta.keywords.as_deref(), Some("a, b"));
    }
}

#[cfg(test)]
mod heading_tests {
    use super::*;

    #[test]
    fn test_levels_in_document_order() {
        let html = r#"<h1 class="t">Main</h1><h2>First</h2><p>x</p><H2>Second <em>part</em></H2>
            <h6>Tiny</h6>"#;
        let headings = extract_headings(html);

        assert_eq!(headings.len(), 3);
        assert_eq!(headings["h1"], vec!["Main"]);
        assert_eq!(headings["h2"], vec!["First", "Second part"]);
        assert_eq!(headings["h6"], vec!["Tiny"]);
        assert!(!headings.contains_key("h3"));
    }

    #[test]
    fn test_empty_headings_are_dropped() {
        let html = "<h1>  </h1><h2><img src=\"x.png\"></h2><h2>Kept</h2><h3>&nbsp;</h3>";
        let headings = extract_headings(html);

        assert!(!headings.contains_key("h1"));
        assert!(!headings.contains_key("h3"));
        assert_eq!(headings["h2"], vec!["Kept"]);
        assert!(headings.values().flatten().all(|text| !text.is_empty()));
    }
}

#[cfg(test)]
mod link_tests {
    use super::*;

    #[test]
    fn test_attributes_from_opening_tag() {
        let html = r#"<a class="btn" href="https://other.com/x" rel="nofollow" target="_blank">
            Go <b>there</b></a>"#;

        assert_eq!(
            extract_links(html),
            vec![LinkRecord {
                href: "https://other.com/x".to_string(),
                anchor: "Go there".to_string(),
                rel: "nofollow".to_string(),
                target: "_blank".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_attributes_are_empty() {
        let links = extract_links(r#"<A HREF="/about.htm">About</A>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/about.htm");
        assert_eq!(links[0].rel, "");
        assert_eq!(links[0].target, "");
    }

    #[test]
    fn test_rel_in_body_is_ignored() {
        let links = extract_links(r#"<a href="/x.htm"><span rel="tag">X</span></a>"#);
        assert_eq!(links[0].rel, "");
        assert_eq!(links[0].anchor, "X");
    }

    #[test]
    fn test_unquoted_or_missing_href_is_skipped() {
        let html = r#"<a name="top">Top</a><a href=/bare.htm>Bare</a><a href="">Empty</a>
            <a href="/ok.htm">Ok</a>"#;
        let links = extract_links(html);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/ok.htm");
    }

    #[test]
    fn test_source_order_is_preserved() {
        let html = r##"<a href="/1">1</a><p><a href="#2">2</a></p><a href="https://3.com">3</a>"##;
        let hrefs: Vec<String> = extract_links(html).into_iter().map(|l| l.href).collect();
        assert_eq!(hrefs, vec!["/1", "#2", "https://3.com"]);
    }
}

#[cfg(test)]
mod image_tests {
    use super::*;

    #[test]
    fn test_all_attributes() {
        let images =
            extract_images(r#"<img src="/i/a.jpg" alt="A frame" title="Frame" width="640" height="480" />"#);

        assert_eq!(
            images,
            vec![ImageRecord {
                src: "/i/a.jpg".to_string(),
                alt: "A frame".to_string(),
                title: "Frame".to_string(),
                width: "640".to_string(),
                height: "480".to_string(),
            }]
        );
    }

    #[test]
    fn test_every_img_produces_a_record() {
        let html = r#"<img><IMG SRC="b.png"><img src="" alt=""><img src=c.png alt="unquoted src">"#;
        let images = extract_images(html);

        assert_eq!(images.len(), 4);
        assert_eq!(images[0], ImageRecord::default());
        assert_eq!(images[1].src, "b.png");
        assert_eq!(images[2].src, "");
        assert_eq!(images[3].src, "");
        assert_eq!(images[3].alt, "unquoted src");
    }
}
