// ABOUTME: Hero banner decorator and the auto-hero builder.
// ABOUTME: Rearranges a leading picture and heading into standard hero markup.

use ego_tree::NodeId;
use scraper::{ElementRef, Node, Selector};

use crate::blocks::{decorate_generic, is_block_div, rewrite_image, Block};
use crate::dom::build::Tag;
use crate::error::DecorateError;
use crate::options::DecorateOptions;
use crate::text::normalize_whitespace;

/// Decorates an explicit hero block: picture first, then heading, then any
/// remaining copy, all inside the standard block/row/cell wrappers.
pub fn decorate(block: &Block<'_>, opts: &DecorateOptions) -> Result<String, DecorateError> {
    let picture = first_picture(block.element);
    let heading = first_heading(block.element);
    if picture.is_none() && heading.is_none() {
        return Ok(decorate_generic(block));
    }

    let mut content = Tag::new("div");
    if let Some(pic) = &picture {
        content = content.raw(picture_markup(pic, opts));
    }
    if let Some(h) = &heading {
        content = content.raw(h.html());
    }

    let p_sel = Selector::parse("p").unwrap();
    for p in block.element.select(&p_sel) {
        // The paragraph wrapping the hero image was consumed with it
        if picture.map_or(false, |pic| p.descendants().any(|n| n.id() == pic.id())) {
            continue;
        }
        let has_text = !normalize_whitespace(&p.text().collect::<String>()).is_empty();
        let has_children = p.children().any(|c| c.value().is_element());
        if has_text || has_children {
            content = content.raw(p.html());
        }
    }

    let mut root = Tag::new("div").class(&block.name);
    for variant in &block.variants {
        root = root.class(variant);
    }
    Ok(root
        .class("block")
        .attr("data-block-name", &block.name)
        .child(Tag::new("div").child(content))
        .render())
}

/// Synthesizes a hero block from a section's leading picture and `<h1>`.
///
/// Only default content is considered (explicit blocks keep their nodes),
/// and the picture must precede the heading in document order. Returns the
/// hero markup plus the ids of the consumed nodes so the caller can skip
/// them during serialization.
pub(crate) fn build_auto(
    section: ElementRef<'_>,
    opts: &DecorateOptions,
) -> Option<(String, Vec<NodeId>)> {
    let mut picture: Option<ElementRef> = None;
    let mut heading: Option<ElementRef> = None;
    'outer: for child in section.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if is_block_div(&el) {
                continue;
            }
        }
        for node in child.descendants() {
            if let Some(el) = ElementRef::wrap(node) {
                let name = el.value().name();
                if picture.is_none() && (name == "picture" || name == "img") {
                    picture = Some(el);
                } else if name == "h1" {
                    heading = Some(el);
                    break 'outer;
                }
            }
        }
    }

    let picture = picture?;
    let heading = heading?;

    let hero = Tag::new("div")
        .class("hero")
        .class("block")
        .attr("data-block-name", "hero")
        .child(
            Tag::new("div").child(
                Tag::new("div")
                    .raw(picture_markup(&picture, opts))
                    .raw(heading.html()),
            ),
        );

    Some((
        hero.render(),
        vec![consumed_id(&picture), consumed_id(&heading)],
    ))
}

/// Markup for a hero image: the optimized picture when the source allows,
/// otherwise the original element untouched.
pub(crate) fn picture_markup(el: &ElementRef<'_>, opts: &DecorateOptions) -> String {
    let img = if el.value().name() == "img" {
        Some(*el)
    } else {
        let img_sel = Selector::parse("img[src]").unwrap();
        el.select(&img_sel).next()
    };
    img.and_then(|img| rewrite_image(&img, opts.eager_first_image, opts))
        .unwrap_or_else(|| el.html())
}

fn first_picture<'a>(root: ElementRef<'a>) -> Option<ElementRef<'a>> {
    for node in root.descendants() {
        if let Some(el) = ElementRef::wrap(node) {
            if matches!(el.value().name(), "picture" | "img") {
                return Some(el);
            }
        }
    }
    None
}

fn first_heading<'a>(root: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let sel = Selector::parse("h1, h2, h3").unwrap();
    root.select(&sel).next()
}

/// The node to remove along with a consumed element: its `<p>` wrapper when
/// the paragraph holds nothing else, otherwise the element itself.
fn consumed_id(el: &ElementRef<'_>) -> NodeId {
    if let Some(parent) = el.parent() {
        if let Some(parent_el) = ElementRef::wrap(parent) {
            if parent_el.value().name() == "p" && holds_only(parent_el, el.id()) {
                return parent_el.id();
            }
        }
    }
    el.id()
}

fn holds_only(parent: ElementRef<'_>, id: NodeId) -> bool {
    parent.children().all(|c| match c.value() {
        Node::Text(t) => t.text.trim().is_empty(),
        Node::Element(_) => c.id() == id,
        _ => true,
    })
}
