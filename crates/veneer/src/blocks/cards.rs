// ABOUTME: Cards decorator turning block rows into a list of cards.
// ABOUTME: Splits image and body cells, optimizes images, and trims body copy to a budget.

use std::collections::{HashMap, HashSet};

use scraper::{Html, Selector};

use crate::blocks::{is_image_only_cell, rewrite_image, Block};
use crate::dom::build::Tag;
use crate::dom::serialize::serialize_children;
use crate::dom::trim::trim_text_to_char_limit;
use crate::error::DecorateError;
use crate::options::DecorateOptions;

/// Decorates a cards block: each row becomes an `<li>`, image-only cells
/// become `cards-card-image` divs with optimized pictures, and the remaining
/// cells merge into a `cards-card-body` div whose copy is trimmed to the
/// configured summary budget.
pub fn decorate(block: &Block<'_>, opts: &DecorateOptions) -> Result<String, DecorateError> {
    let img_sel = Selector::parse("img[src]").unwrap();

    let mut list = Tag::new("ul");
    for row in block.rows() {
        let cells = Block::cells(row);
        if cells.is_empty() {
            continue;
        }

        let mut li = Tag::new("li");
        let mut body_html = String::new();
        for cell in cells {
            if is_image_only_cell(&cell) {
                let inner = cell
                    .select(&img_sel)
                    .next()
                    .and_then(|img| rewrite_image(&img, false, opts))
                    .unwrap_or_else(|| cell.inner_html());
                li = li.child(Tag::new("div").class("cards-card-image").raw(inner));
            } else {
                body_html.push_str(&cell.inner_html());
            }
        }
        if !body_html.trim().is_empty() {
            let trimmed = trim_body(&body_html, opts.summary_char_limit);
            li = li.child(Tag::new("div").class("cards-card-body").raw(trimmed));
        }
        list = list.child(li);
    }

    let mut root = Tag::new("div").class(&block.name);
    for variant in &block.variants {
        root = root.class(variant);
    }
    Ok(root
        .class("block")
        .attr("data-block-name", &block.name)
        .child(list)
        .render())
}

/// Trims card body markup to the summary character budget while keeping its
/// nesting intact.
fn trim_body(html: &str, limit: usize) -> String {
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
