//! Trust-marker detection over rendered page text.
//!
//! Pages are parsed with `scraper` and flattened to the text a reader would
//! see: text inside `script`, `style`, `noscript` and `template` elements is
//! skipped, so serialized props and inline code never count as markers.
//! Each marker is a fixed set of lower-case substrings.

use scraper::{Html, Selector};

use crate::types::TrustSignals;

/// A body must be longer than this many characters to count as real content.
pub const CONTENT_MIN_CHARS: usize = 1000;

const TIMESTAMP_MARKERS: &[&str] = &["updated", "as of", "last refresh"];
const SOURCE_MARKERS: &[&str] = &["source:", "data by", "powered by"];
const DELAYED_MARKERS: &[&str] = &["delayed", "15 min", "real-time"];
const DISCLAIMER_MARKERS: &[&str] = &["not financial advice", "educational"];
const DEMO_MARKERS: &[&str] = &["demo", "sample"];

/// Crash-page fragments emitted by the front-end framework or the server.
const APP_ERROR_MARKERS: &[&str] = &["Application error", "Internal Server Error"];

/// Elements whose text is never shown to a reader.
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Evaluate all five trust markers against `text`. Case-insensitive.
pub fn detect_trust_markers(text: &str) -> TrustSignals {
    let text = text.to_lowercase();
    let any = |needles: &[&str]| needles.iter().any(|n| text.contains(n));

    TrustSignals {
        has_timestamps: any(TIMESTAMP_MARKERS),
        has_source_badges: any(SOURCE_MARKERS),
        has_delayed_marker: any(DELAYED_MARKERS),
        has_disclaimer: any(DISCLAIMER_MARKERS),
        has_demo_badge: any(DEMO_MARKERS),
    }
}

/// Parse `html` and evaluate trust markers on its text content.
pub fn detect_trust_markers_in_html(html: &str) -> TrustSignals {
    detect_trust_markers(&page_text(html))
}

/// Concatenated visible text content of an HTML document.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    for node in document.root_element().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| HIDDEN_TEXT_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }
    text
}

/// Text of the first `<title>` element, if any.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let sel = Selector::parse("title").ok()?;
    document
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>())
}

/// Whether the body is long enough to be a rendered page.
pub fn has_content(body: &str) -> bool {
    body.chars().count() > CONTENT_MIN_CHARS
}

/// Whether the body looks like a framework or server crash page.
pub fn has_app_error(body: &str) -> bool {
    APP_ERROR_MARKERS.iter().any(|m| body.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_marker_family() {
        let s = detect_trust_markers("Last refresh 10:00");
        assert!(s.has_timestamps);
        assert!(!s.has_source_badges);

        let s = detect_trust_markers("Data by Finnhub");
        assert!(s.has_source_badges);

        let s = detect_trust_markers("Quotes delayed");
        assert!(s.has_delayed_marker);

        let s = detect_trust_markers("This is NOT FINANCIAL ADVICE");
        assert!(s.has_disclaimer);

        let s = detect_trust_markers("sample portfolio");
        assert!(s.has_demo_badge);
        assert!(!s.has_disclaimer);
    }

    #[test]
    fn test_empty_text_has_no_markers() {
        assert_eq!(detect_trust_markers(""), TrustSignals::default());
    }

    #[test]
    fn test_all_markers_present() {
        let s = detect_trust_markers(
            "As of 4pm. Source: Yahoo. 15 min delayed. Educational use. Demo mode.",
        );
        assert_eq!(
            s,
            TrustSignals {
                has_timestamps: true,
                has_source_badges: true,
                has_delayed_marker: true,
                has_disclaimer: true,
                has_demo_badge: true,
            }
        );
    }

    #[test]
    fn test_source_badge_requires_colon() {
        let s = detect_trust_markers("open source project");
        assert!(!s.has_source_badges);
    }

    #[test]
    fn test_html_text_extraction() {
        let html = "<html><head><title>Screener</title></head>\
                    <body><p>Updated</p><span>Powered <b>by</b> Finnhub</span></body></html>";
        let s = detect_trust_markers_in_html(html);
        assert!(s.has_timestamps);
        // Text nodes join without separators, so "Powered " + "by" still matches.
        assert!(s.has_source_badges);
    }

    #[test]
    fn test_script_and_style_text_is_ignored() {
        let html = r#"<html><head><style>.updated { color: red }</style></head><body>
            <p>Hello</p>
            <script>self.__next_f.push({"updatedAt":"2026-10-19","mode":"demo"})</script>
            <noscript>Powered by JavaScript</noscript>
            <template><span>Source: Finnhub</span></template>
            </body></html>"#;
        let s = detect_trust_markers_in_html(html);
        assert!(!s.has_timestamps);
        assert!(!s.has_demo_badge);
        assert!(!s.has_source_badges);
        assert!(page_text(html).contains("Hello"));
        assert!(!page_text(html).contains("updatedAt"));
    }

    #[test]
    fn test_visible_text_next_to_script_still_counts() {
        let html = "<body><script>var x = 1;</script><p>Updated 4pm</p></body>";
        assert!(detect_trust_markers_in_html(html).has_timestamps);
    }

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title>Legendary Investor</title></head><body></body></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Legendary Investor"));
        assert_eq!(extract_title("<html><body>hi</body></html>"), None);
    }

    #[test]
    fn test_has_content_threshold() {
        assert!(!has_content(&"x".repeat(CONTENT_MIN_CHARS)));
        assert!(has_content(&"x".repeat(CONTENT_MIN_CHARS + 1)));
    }

    #[test]
    fn test_app_error_detection() {
        assert!(has_app_error("<h2>Application error: a client-side exception</h2>"));
        assert!(has_app_error("500 Internal Server Error"));
        assert!(!has_app_error("<h1>Welcome</h1>"));
    }
}
