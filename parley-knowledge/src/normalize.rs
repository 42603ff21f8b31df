//! Text normalization: markup stripping and whitespace collapsing.
//!
//! Two extraction paths feed the learning pipeline. Uploaded files are only
//! treated as markup when the filename says so, and then every text node is
//! taken. Web pages always go through the visible-text path, which skips
//! the subtrees of boilerplate elements. Malformed markup is not an error:
//! html5ever recovers and we extract whatever parsed.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

/// Elements whose entire subtree is invisible noise on a web page.
const NOISE_TAGS: [&str; 8] = [
    "script", "style", "noscript", "header", "footer", "nav", "form", "aside",
];

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run (spaces, tabs, newlines) to a single space
/// and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Normalize uploaded file content.
///
/// Markup is only stripped when the filename indicates an HTML-like format;
/// plain text passes straight through to whitespace collapsing.
pub fn extract_file_text(content: &str, filename: &str) -> String {
    let name = filename.to_lowercase();
    if name.ends_with(".html") || name.ends_with(".php") {
        let document = Html::parse_document(content);
        let text = document.root_element().text().collect::<Vec<_>>().join(" ");
        collapse_whitespace(&text)
    } else {
        collapse_whitespace(content)
    }
}

/// Extract the human-visible text of a web page.
pub fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    collect_visible_text(document.root_element(), &mut out);
    collapse_whitespace(&out)
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    if NOISE_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_visible_text(child_element, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  hello\t\nworld   again \n"),
            "hello world again"
        );
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(
            extract_file_text("def main():\n    pass\n", "script.py"),
            "def main(): pass"
        );
    }

    #[test]
    fn test_html_file_is_stripped() {
        let html = "<html><body><h1>Title</h1><p>Some   text.</p></body></html>";
        assert_eq!(extract_file_text(html, "page.HTML"), "Title Some text.");
    }

    #[test]
    fn test_page_text_skips_noise_elements() {
        let html = r#"<html>
          <head><style>body { color: red; }</style></head>
          <body>
            <nav><a href="/">Home</a></nav>
            <script>var x = 1;</script>
            <p>Visible paragraph.</p>
            <footer>Copyright</footer>
          </body>
        </html>"#;
        assert_eq!(extract_page_text(html), "Visible paragraph.");
    }

    #[test]
    fn test_malformed_markup_degrades_to_best_effort() {
        let text = extract_page_text("<p>Unclosed paragraph <b>bold");
        assert_eq!(text, "Unclosed paragraph bold");
    }
}
