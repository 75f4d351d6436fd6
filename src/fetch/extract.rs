//! HTML to plain text.
//!
//! Main content is taken from the most specific paragraph container that
//! yields a usable amount of text, falling back to all visible body text.

use scraper::{ElementRef, Html, Selector};

use crate::constants::MIN_DOCUMENT_CHARS;
use crate::text::normalize_whitespace;

const PARAGRAPH_SELECTORS: [&str; 3] = ["article p", "main p", "p"];

const HIDDEN_ELEMENTS: [&str; 7] = [
    "script", "style", "noscript", "template", "nav", "header", "footer",
];

/// Extracts readable text; paragraphs are separated by blank lines.
pub fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for css in PARAGRAPH_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };

        let paragraphs: Vec<String> = document
            .select(&selector)
            .filter(|p| !is_hidden(p))
            .map(|p| normalize_whitespace(&p.text().collect::<String>()))
            .filter(|p| !p.is_empty())
            .collect();

        let text = paragraphs.join("\n\n");
        if text.chars().count() >= MIN_DOCUMENT_CHARS {
            return text;
        }
    }

    body_text(&document)
}

fn is_hidden(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
    })
}

fn body_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };
    let Some(body) = document.select(&selector).next() else {
        return String::new();
    };

    let mut parts: Vec<&str> = Vec::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            parts.push(text);
        }
    }

    normalize_whitespace(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_article_paragraphs() {
        let html = r#"
            <html><body>
              <nav><p>Home | World | Sport | Weather and more links</p></nav>
              <article>
                <p>The Eiffel Tower is a wrought-iron lattice tower in Paris.</p>
                <p>It was completed in <b>1889</b> for the World's Fair.</p>
              </article>
              <p>Sidebar paragraph that should be ignored entirely here.</p>
            </body></html>
        "#;

        let text = extract_main_text(html);

        assert_eq!(
            text,
            "The Eiffel Tower is a wrought-iron lattice tower in Paris.\n\n\
             It was completed in 1889 for the World's Fair."
        );
    }

    #[test]
    fn test_falls_back_to_main_then_all_paragraphs() {
        let html = r#"
            <html><body>
              <div><p>A standalone paragraph with enough words to count as content.</p></div>
            </body></html>
        "#;

        assert_eq!(
            extract_main_text(html),
            "A standalone paragraph with enough words to count as content."
        );
    }

    #[test]
    fn test_short_article_falls_through() {
        let html = r#"
            <html><body>
              <article><p>Too short.</p></article>
              <main><p>The main element holds the real story text for this page.</p></main>
            </body></html>
        "#;

        assert_eq!(
            extract_main_text(html),
            "The main element holds the real story text for this page."
        );
    }

    #[test]
    fn test_body_text_fallback_skips_scripts() {
        let html = r#"
            <html><head><title>t</title></head><body>
              <script>var tracking = "do not include";</script>
              <style>.x { color: red }</style>
              <div>Plain   div text without paragraphs.</div>
            </body></html>
        "#;

        assert_eq!(extract_main_text(html), "Plain div text without paragraphs.");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract_main_text(""), "");
        assert_eq!(extract_main_text("<html><body></body></html>"), "");
    }
}
