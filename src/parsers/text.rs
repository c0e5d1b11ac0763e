use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<script[\s\S]*?</script>").expect("valid script regex"));

static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<style[\s\S]*?</style>").expect("valid style regex"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Reduces an HTML fragment to its visible text.
///
/// This function:
/// - Drops `<script>` and `<style>` blocks together with their content
/// - Replaces every remaining tag with a single space
/// - Decodes HTML entities
/// - Collapses whitespace runs into one space and trims the ends
///
/// Applying it to its own output returns the same text, as long as the decoded
/// text does not itself spell out markup or entities (`&amp;lt;` decodes to
/// `&lt;`, which a second pass would decode again).
pub fn strip_tags(html: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, "");
    let without_styles = STYLE_RE.replace_all(&without_scripts, "");
    let text = TAG_RE.replace_all(&without_styles, " ");
    collapse_whitespace(&decode_entities(&text))
}

/// Decodes named and numeric character references.
///
/// Decoding is delegated to the HTML tokenizer so the full entity table is
/// covered. Literal `<` is escaped first so the tokenizer never sees markup.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let escaped = text.replace('<', "&lt;");
    let fragment = Html::parse_fragment(&escaped);
    fragment.root_element().text().collect()
}

/// Collapses every whitespace run into a single space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
