// ABOUTME: Integration tests for the text-trimming contract.
// ABOUTME: Covers budget accounting, pruning, order preservation, and whitespace transparency.

use std::collections::{HashMap, HashSet};

use pretty_assertions::assert_eq;
use scraper::{Html, Node, Selector};
use veneer::dom::serialize::serialize_children;
use veneer::trim_text_to_char_limit;

fn trim(html: &str, limit: usize) -> String {
    let mut fragment = Html::parse_fragment(html);
    trim_text_to_char_limit(&mut fragment, limit);
    let mut out = String::new();
    serialize_children(
        *fragment.root_element(),
        &HashSet::new(),
        &HashMap::new(),
        &mut out,
    );
    out
}

/// Concatenated text content of a fragment, in document order.
fn text_content(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .tree
        .root()
        .descendants()
        .filter_map(|n| match n.value() {
            Node::Text(t) => Some(t.text.to_string()),
            _ => None,
        })
        .collect()
}

/// Total characters across text nodes that carry non-whitespace content.
fn visible_text_len(html: &str) -> usize {
    let fragment = Html::parse_fragment(html);
    fragment
        .tree
        .root()
        .descendants()
        .filter_map(|n| match n.value() {
            Node::Text(t) if !t.text.trim().is_empty() => Some(t.text.chars().count()),
            _ => None,
        })
        .sum()
}

mod budget {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn retained_text_never_exceeds_limit() {
        let html = "<div><p>alpha beta</p><ul><li>gamma</li><li>delta</li></ul><p>epsilon</p></div>";
        for limit in 0..=40 {
            let trimmed = trim(html, limit);
            assert!(
                visible_text_len(&trimmed) <= limit,
                "limit {} produced {} visible chars: {}",
                limit,
                visible_text_len(&trimmed),
                trimmed
            );
        }
    }

    #[test]
    fn limit_at_or_above_total_length_is_identity() {
        let html = "<div><p>alpha</p><p>beta <b>bold</b></p></div>";
        let total = visible_text_len(html);
        assert_eq!(trim(html, total), html);
        assert_eq!(trim(html, total + 100), html);
    }

    #[test]
    fn truncation_spends_the_full_original_length() {
        // "abcdefgh" counts for 8 even though only 3 chars survive, so the
        // following list contributes nothing at all
        let out = trim("<div><p>abcdefgh</p><ul><li>x</li></ul></div>", 3);
        assert_eq!(out, "<div><p>abc</p></div>");
    }

    #[test]
    fn zero_limit_removes_all_visible_text() {
        let out = trim("<div><h2>Title</h2><p>Body</p></div>", 0);
        assert_eq!(visible_text_len(&out), 0);
    }
}

mod structure {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nesting_of_retained_content_is_preserved() {
        let out = trim(
            "<div><p>one <em>two <strong>three</strong></em></p></div>",
            9,
        );
        assert_eq!(out, "<div><p>one <em>two <strong>t</strong></em></p></div>");
    }

    #[test]
    fn document_order_is_preserved() {
        let html = "<div>a<span>b<i>c</i></span>d<span>e</span></div>";
        for limit in 1..=5 {
            let trimmed = trim(html, limit);
            let payload: String = "abcde".chars().take(limit).collect();
            assert_eq!(
                text_content(&trimmed),
                payload,
                "limit {} produced {:?}",
                limit,
                trimmed
            );
        }
    }

    #[test]
    fn elements_past_the_cut_are_removed_not_blanked() {
        let out = trim("<div><p>keep</p><p>drop</p><ul><li>drop</li></ul></div>", 4);
        assert_eq!(out, "<div><p>keep</p></div>");
    }
}

mod whitespace {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whitespace_only_tree_survives_zero_limit() {
        assert_eq!(trim("<p>   </p>", 0), "<p>   </p>");
        assert_eq!(trim("<div> <span>  </span> </div>", 0), "<div> <span>  </span> </div>");
    }

    #[test]
    fn whitespace_nodes_cost_no_budget() {
        let out = trim("<div><b>ab</b>   <i>cd</i></div>", 4);
        assert_eq!(out, "<div><b>ab</b>   <i>cd</i></div>");
    }

    #[test]
    fn text_free_subtrees_survive_exhaustion() {
        let out = trim(
            r#"<div><p>abcd</p><p><img src="/x.png"></p></div>"#,
            2,
        );
        assert_eq!(out, r#"<div><p>ab</p><p><img src="/x.png" /></p></div>"#);
    }
}

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    // The three canonical cases for the trimming contract

    #[test]
    fn hello_world_at_five() {
        assert_eq!(trim("<div>Hello <b>World</b></div>", 5), "<div>Hello</div>");
    }

    #[test]
    fn whitespace_paragraph_at_zero() {
        assert_eq!(trim("<p>   </p>", 0), "<p>   </p>");
    }

    #[test]
    fn nested_span_at_three() {
        assert_eq!(
            trim("<div>AB<span>CD</span>EF</div>", 3),
            "<div>AB<span>C</span></div>"
        );
    }

    #[test]
    fn rich_text_summary_card() {
        let summary = "<div>\
            <h4>Field notes</h4>\
            <p>The first paragraph runs long enough to cross the budget.</p>\
            <p>The second paragraph never makes it.</p>\
        </div>";
        let out = trim(summary, 30);
        assert!(out.contains("<h4>Field notes</h4>"));
        assert!(out.starts_with("<div><h4>"));
        assert!(!out.contains("second paragraph"));
        assert!(visible_text_len(&out) <= 30);
        // the surviving paragraph is still a closed <p>
        assert!(out.contains("</p>"));
    }

    #[test]
    fn subtree_trim_leaves_siblings_alone() {
        let mut fragment =
            Html::parse_fragment("<div class=\"a\">abcdef</div><div class=\"b\">ghij</div>");
        let sel = Selector::parse("div.a").unwrap();
        let id = fragment.select(&sel).next().unwrap().id();
        veneer::trim_subtree_to_char_limit(&mut fragment.tree, id, 3);

        let mut out = String::new();
        serialize_children(
            *fragment.root_element(),
            &HashSet::new(),
            &HashMap::new(),
            &mut out,
        );
        assert_eq!(out, "<div class=\"a\">abc</div><div class=\"b\">ghij</div>");
    }
}
