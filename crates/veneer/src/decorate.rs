// ABOUTME: The decoration engine turning CMS-rendered fragments into component markup.
// ABOUTME: Wraps sections, dispatches block decorators, and auto-builds the hero.

//! The fragment decoration pipeline.
//!
//! A rendered fragment arrives as top-level `<div>`s (sections) whose
//! classed child `<div>`s are blocks. [`Decorator::decorate`] walks that
//! structure: sections gain the `section` class and per-block container
//! classes, default content is grouped into `default-content-wrapper` divs,
//! blocks are dispatched through the [`BlockRegistry`], and, when enabled,
//! a hero block is synthesized from the first leading picture + `<h1>` pair.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::blocks::{decorate_generic, hero, is_block_div, read_block_config, Block, BlockConfig, BlockRegistry};
use crate::dom::serialize::{escape_text, serialize_node, ClassAdditions};
use crate::error::DecorateError;
use crate::options::{DecorateOptions, DecoratorBuilder};

/// The decoration engine.
#[derive(Debug, Clone)]
pub struct Decorator {
    opts: DecorateOptions,
    registry: BlockRegistry,
}

impl Decorator {
    /// Create a DecoratorBuilder for fluent configuration.
    pub fn builder() -> DecoratorBuilder {
        DecoratorBuilder::new()
    }

    /// Create a Decorator with the given options and the built-in blocks.
    pub fn new(opts: DecorateOptions) -> Self {
        Self::with_registry(opts, BlockRegistry::builtin())
    }

    pub(crate) fn with_registry(opts: DecorateOptions, registry: BlockRegistry) -> Self {
        Self { opts, registry }
    }

    /// The options this decorator runs with.
    pub fn options(&self) -> &DecorateOptions {
        &self.opts
    }

    /// Decorates a full fragment: sections, wrappers, blocks, auto-hero.
    pub fn decorate(&self, html: &str) -> Result<String, DecorateError> {
        self.check_base("decorate")?;
        let fragment = Html::parse_fragment(html);

        let hero_sel = Selector::parse("div.hero").unwrap();
        let mut auto_hero_pending =
            self.opts.auto_hero && fragment.select(&hero_sel).next().is_none();

        let mut out = String::new();
        let no_classes = ClassAdditions::new();
        for child in fragment.root_element().children() {
            match child.value() {
                Node::Element(el) if el.name() == "div" => {
                    if let Some(section) = ElementRef::wrap(child) {
                        self.decorate_section(section, &mut auto_hero_pending, &mut out)?;
                    }
                }
                Node::Element(_) => {
                    // Stray non-div top-level content passes through untouched
                    serialize_node(child, &HashSet::new(), &no_classes, &mut out);
                }
                Node::Text(t) => out.push_str(&escape_text(&t.text)),
                _ => {}
            }
        }
        Ok(out)
    }

    /// Decorates a single block fragment, without the section scaffolding.
    pub fn decorate_block(&self, html: &str) -> Result<String, DecorateError> {
        self.check_base("decorate-block")?;
        let fragment = Html::parse_fragment(html);
        let block = fragment
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| is_block_div(el))
            .and_then(Block::from_element);
        match block {
            Some(block) => self.render_block(&block),
            None => Err(DecorateError::parse(
                "",
                "decorate-block",
                Some(anyhow::anyhow!("no block element found in fragment")),
            )),
        }
    }

    /// Reads the key/value config of the first block in a fragment.
    pub fn block_config(&self, html: &str) -> Result<BlockConfig, DecorateError> {
        let fragment = Html::parse_fragment(html);
        let block = fragment
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| is_block_div(el));
        match block {
            Some(el) => Ok(read_block_config(&el)),
            None => Err(DecorateError::parse(
                "",
                "block-config",
                Some(anyhow::anyhow!("no block element found in fragment")),
            )),
        }
    }

    fn decorate_section(
        &self,
        section: ElementRef<'_>,
        auto_hero_pending: &mut bool,
        out: &mut String,
    ) -> Result<(), DecorateError> {
        let mut skip = HashSet::new();
        let mut hero_html = None;
        if *auto_hero_pending {
            if let Some((html, consumed)) = hero::build_auto(section, &self.opts) {
                debug!("auto-building hero block");
                hero_html = Some(html);
                skip.extend(consumed);
                *auto_hero_pending = false;
            }
        }

        let mut container_classes = Vec::new();
        if hero_html.is_some() {
            container_classes.push("hero-container".to_string());
        }
        for child in section.children() {
            if let Some(el) = ElementRef::wrap(child) {
                if is_block_div(&el) {
                    if let Some(block) = Block::from_element(el) {
                        container_classes.push(format!("{}-container", block.name));
                    }
                }
            }
        }

        out.push_str("<div class=\"section");
        for class in &container_classes {
            out.push(' ');
            out.push_str(class);
        }
        out.push_str("\">");

        if let Some(hero) = &hero_html {
            out.push_str("<div class=\"hero-wrapper\">");
            out.push_str(hero);
            out.push_str("</div>");
        }

        let no_classes = ClassAdditions::new();
        let mut wrapper_open = false;
        for child in section.children() {
            if skip.contains(&child.id()) {
                continue;
            }
            let as_block = ElementRef::wrap(child)
                .filter(|el| is_block_div(el))
                .and_then(Block::from_element);
            if let Some(block) = as_block {
                if wrapper_open {
                    out.push_str("</div>");
                    wrapper_open = false;
                }
                let decorated = self.render_block(&block)?;
                out.push_str("<div class=\"");
                out.push_str(&block.name);
                out.push_str("-wrapper\">");
                out.push_str(&decorated);
                out.push_str("</div>");
            } else {
                let mut buf = String::new();
                serialize_node(child, &skip, &no_classes, &mut buf);
                // Inter-element whitespace does not open a wrapper
                if buf.trim().is_empty() {
                    continue;
                }
                if !wrapper_open {
                    out.push_str("<div class=\"default-content-wrapper\">");
                    wrapper_open = true;
                }
                out.push_str(&buf);
            }
        }
        if wrapper_open {
            out.push_str("</div>");
        }
        out.push_str("</div>");
        Ok(())
    }

    fn render_block(&self, block: &Block<'_>) -> Result<String, DecorateError> {
        match self.registry.get(&block.name) {
            Some(decorate) => {
                debug!(block = %block.name, "decorating block");
                decorate(block, &self.opts)
            }
            None => {
                warn!(block = %block.name, "no decorator registered, applying generic decoration");
                Ok(decorate_generic(block))
            }
        }
    }

    fn check_base(&self, op: &str) -> Result<(), DecorateError> {
        if let Some(base) = &self.opts.base_url {
            Url::parse(base)
                .map_err(|e| DecorateError::invalid_base("", op, Some(anyhow::Error::new(e))))?;
        }
        Ok(())
    }
}
