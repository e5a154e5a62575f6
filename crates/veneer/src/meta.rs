// ABOUTME: Page metadata extraction from meta tags in rendered documents.
// ABOUTME: Resolves a metadata name to meta[name]/meta[property] content values.

//! Page metadata lookup.
//!
//! Rendered pages expose document metadata through `<meta>` tags: plain
//! names use the `name` attribute, open-graph/twitter style names (anything
//! containing a colon) use `property`. Lookup behavior:
//!
//! - All matching tags contribute; values join with ", ".
//! - Values are whitespace-normalized; empty values are skipped.
//! - A name with no matches (or an unparseable selector) yields `None`.

use dom_query::Document;

use crate::selectors::cached_matcher;
use crate::text::normalize_whitespace;

/// Looks up a metadata value by name, joining multiple matches with ", ".
pub fn page_metadata(doc: &Document, name: &str) -> Option<String> {
    let values = page_metadata_all(doc, name);
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Looks up all values for a metadata name, in document order.
pub fn page_metadata_all(doc: &Document, name: &str) -> Vec<String> {
    // Names containing a colon (og:title, twitter:card) live in `property`
    let attr = if name.contains(':') { "property" } else { "name" };
    let css = format!("meta[{}=\"{}\"]", attr, name);

    let matcher = match cached_matcher(&css) {
        Some(m) => m,
        None => return vec![],
    };

    doc.select_matcher(&matcher)
        .iter()
        .filter_map(|el| {
            el.attr("content").map(|v| normalize_whitespace(&v))
        })
        .filter(|v| !v.is_empty())
        .collect()
}
