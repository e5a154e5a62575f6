// ABOUTME: Block model, config extraction, and the decorator registry.
// ABOUTME: Maps CMS block markup (nested div grids) onto typed rows, cells, and key/value config.

//! Block handling for CMS-rendered fragments.
//!
//! A block arrives as a classed `<div>` whose first-level child `<div>`s are
//! rows and second-level child `<div>`s are cells. The first class names the
//! block; remaining classes are variants. Two-cell rows double as key/value
//! configuration ([`read_block_config`]).

use std::collections::HashMap;

use scraper::{ElementRef, Node, Selector};
use serde::{Deserialize, Serialize};

use crate::assets;
use crate::dom::build::Tag;
use crate::error::DecorateError;
use crate::options::DecorateOptions;
use crate::text::{normalize_whitespace, to_class_name};

pub mod cards;
pub mod columns;
pub mod hero;

/// A view over a block element: normalized name, variant classes, element.
#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub name: String,
    pub variants: Vec<String>,
    pub element: ElementRef<'a>,
}

impl<'a> Block<'a> {
    /// Builds a block view from a classed `<div>`. Returns None when the
    /// element is not a div or carries no usable class.
    pub fn from_element(element: ElementRef<'a>) -> Option<Self> {
        if element.value().name() != "div" {
            return None;
        }
        let mut classes = element.value().classes();
        let name = to_class_name(classes.next()?);
        if name.is_empty() {
            return None;
        }
        let variants = classes
            .map(to_class_name)
            .filter(|c| !c.is_empty() && *c != name)
            .collect();
        Some(Self {
            name,
            variants,
            element,
        })
    }

    /// First-level child divs, in document order.
    pub fn rows(&self) -> Vec<ElementRef<'a>> {
        child_divs(self.element)
    }

    /// Child divs of a row, in document order.
    pub fn cells(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        child_divs(row)
    }

    /// Key/value configuration read from this block's two-cell rows.
    pub fn config(&self) -> BlockConfig {
        read_block_config(&self.element)
    }
}

fn child_divs(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name() == "div")
        .collect()
}

/// Whether an element is a block div: a `<div>` with a non-empty class.
pub(crate) fn is_block_div(el: &ElementRef<'_>) -> bool {
    el.value().name() == "div"
        && el
            .value()
            .attr("class")
            .map_or(false, |c| !c.trim().is_empty())
}

/// Whether a cell holds nothing but a picture (ignoring whitespace).
pub(crate) fn is_image_only_cell(cell: &ElementRef<'_>) -> bool {
    let mut has_image = false;
    for child in cell.children() {
        match child.value() {
            Node::Text(t) => {
                if !t.text.trim().is_empty() {
                    return false;
                }
            }
            Node::Element(el) => match el.name() {
                "picture" | "img" => has_image = true,
                _ => return false,
            },
            _ => {}
        }
    }
    has_image
}

/// Rewrites an `<img>` into optimized `<picture>` markup, resolving its
/// source against the configured base. Returns None for spacer images or
/// sources that cannot be used.
pub(crate) fn rewrite_image(
    img: &ElementRef<'_>,
    eager: bool,
    opts: &DecorateOptions,
) -> Option<String> {
    let src = img.value().attr("src")?.trim();
    if src.is_empty() || assets::is_spacer_image(src) {
        return None;
    }
    let resolved = match opts.base_url.as_deref() {
        Some(base) if assets::is_local_asset(src, base) => {
            assets::resolve_asset_url(src, Some(base)).unwrap_or_else(|| src.to_string())
        }
        _ => src.to_string(),
    };
    let alt = img.value().attr("alt").unwrap_or("");
    assets::optimized_picture(&resolved, alt, eager, &opts.breakpoints)
}

/// One config key with its values, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    pub values: Vec<String>,
}

/// Key/value configuration read from a block's two-cell rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfig {
    entries: Vec<ConfigEntry>,
}

impl BlockConfig {
    /// First value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .and_then(|e| e.values.first())
            .map(String::as_str)
    }

    /// All values for a key, in document order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.iter()
    }

    fn push(&mut self, key: String, mut values: Vec<String>) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == key) {
            existing.values.append(&mut values);
        } else {
            self.entries.push(ConfigEntry { key, values });
        }
    }
}

/// Reads key/value configuration from a block's rows.
///
/// Each row with at least two cell divs contributes one entry: the key is
/// the class-name form of the first cell's text; the value is the second
/// cell's link hrefs, image srcs, or normalized text, in that order of
/// preference. Rows repeating a key append to its values.
pub fn read_block_config(block: &ElementRef<'_>) -> BlockConfig {
    let mut config = BlockConfig::default();
    for row in child_divs(*block) {
        let cells = child_divs(row);
        if cells.len() < 2 {
            continue;
        }
        let key = to_class_name(&cells[0].text().collect::<String>());
        if key.is_empty() {
            continue;
        }
        let values = cell_values(cells[1]);
        if values.is_empty() {
            continue;
        }
        config.push(key, values);
    }
    config
}

fn cell_values(cell: ElementRef<'_>) -> Vec<String> {
    let link_sel = Selector::parse("a[href]").unwrap();
    let links: Vec<String> = cell
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect();
    if !links.is_empty() {
        return links;
    }

    let img_sel = Selector::parse("img[src]").unwrap();
    let srcs: Vec<String> = cell
        .select(&img_sel)
        .filter_map(|img| img.value().attr("src"))
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty())
        .collect();
    if !srcs.is_empty() {
        return srcs;
    }

    let text = normalize_whitespace(&cell.text().collect::<String>());
    if text.is_empty() {
        vec![]
    } else {
        vec![text]
    }
}

/// Signature of a block decorator: the block view in, decorated markup out.
pub type DecorateFn = fn(&Block<'_>, &DecorateOptions) -> Result<String, DecorateError>;

/// Registry for looking up block decorators by normalized block name.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    map: HashMap<String, DecorateFn>,
}

impl BlockRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in decorators registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("hero", hero::decorate);
        registry.register("cards", cards::decorate);
        registry.register("columns", columns::decorate);
        registry
    }

    /// Registers a decorator under a block name (normalized).
    pub fn register(&mut self, name: impl AsRef<str>, decorator: DecorateFn) {
        self.map.insert(to_class_name(name.as_ref()), decorator);
    }

    /// Looks up a decorator by normalized block name.
    pub fn get(&self, name: &str) -> Option<DecorateFn> {
        self.map.get(name).copied()
    }

    /// Returns the number of registered decorators.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no decorators are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Generic decoration for blocks without a registered decorator: the block
/// element gains the standard classes and keeps its content as-is.
pub fn decorate_generic(block: &Block<'_>) -> String {
    let mut tag = Tag::new("div").class(&block.name);
    for variant in &block.variants {
        tag = tag.class(variant);
    }
    tag.class("block")
        .attr("data-block-name", &block.name)
        .raw(block.element.inner_html())
        .render()
}
