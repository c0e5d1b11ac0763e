use crate::parsers::text::{collapse_whitespace, decode_entities, strip_tags};

#[test]
fn test_strip_plain_text() {
    assert_eq!(strip_tags(""), "");
    assert_eq!(strip_tags("   \n\t  "), "");
    assert_eq!(strip_tags("Hello, world!"), "Hello, world!");
}

#[test]
fn test_tags_become_spaces() {
    assert_eq!(strip_tags("<p>Hello</p><p>world</p>"), "Hello world");
    assert_eq!(strip_tags("Hel<b>lo</b>"), "Hel lo");
    assert_eq!(
        strip_tags("  <span class=\"x\">\n  Multi\n   line  </span> "),
        "Multi line"
    );
}

#[test]
fn test_scripts_and_styles_are_dropped() {
    let html = r#"Before<script type="text/javascript">var x = "<b>no</b>";</script>
        <STYLE>.a { color: red }</STYLE>After"#;
    assert_eq!(strip_tags(html), "Before After");
}

#[test]
fn test_entities_are_decoded() {
    assert_eq!(strip_tags("Fish &amp; Chips"), "Fish & Chips");
    assert_eq!(strip_tags("&lt;tag&gt; &quot;q&quot; &#39;s&#39;"), "<tag> \"q\" 's'");
    assert_eq!(strip_tags("&copy; 2024 &#8212; &#x41;"), "© 2024 — A");
    assert_eq!(strip_tags("AT&T"), "AT&T");
}

#[test]
fn test_nbsp_collapses_like_whitespace() {
    assert_eq!(strip_tags("&nbsp;Price:&nbsp;&nbsp;10&nbsp;"), "Price: 10");
}

#[test]
fn test_strip_is_idempotent() {
    let inputs = [
        "<h1>  Заголовок <small>страницы</small></h1>",
        "<div><script>alert(1)</script>Tom &amp; Jerry &gt; Spike</div>",
        "plain text   with\n\nbreaks",
        "1 < 2 and 3 > 2",
        "<a href=\"/\">Home</a>&nbsp;|&nbsp;<a href=\"/c\">Contacts</a>",
    ];

    for input in inputs {
        let once = strip_tags(input);
        assert_eq!(strip_tags(&once), once, "not idempotent for {input:?}");
    }
}

#[test]
fn test_decode_entities_keeps_literal_angle_brackets() {
    assert_eq!(decode_entities("a < b &amp; c"), "a < b & c");
    assert_eq!(decode_entities("no entities <here>"), "no entities <here>");
}

#[test]
fn test_collapse_whitespace() {
    assert_eq!(collapse_whitespace("  Trim  me  "), "Trim me");
    assert_eq!(collapse_whitespace("Tabs\tand\nlines"), "Tabs and lines");
    assert_eq!(collapse_whitespace("   "), "");
}
