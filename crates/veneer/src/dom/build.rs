// ABOUTME: Markup construction helper for decorators.
// ABOUTME: Builds well-formed HTML strings from tag names, attributes, and children.

//! Element creation for decorated markup.
//!
//! Decorators assemble their output from scratch rather than mutating the
//! parsed tree, so this module provides a small builder over tag name,
//! attributes, and children. Children can be escaped text, raw HTML lifted
//! from the source fragment, or nested builders.

use crate::dom::serialize::{escape_attr, escape_text, is_void_element};

/// A single element under construction.
#[derive(Debug, Clone)]
pub struct Tag {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
}

#[derive(Debug, Clone)]
enum Child {
    Text(String),
    Raw(String),
    Tag(Tag),
}

impl Tag {
    /// Starts a new element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute. Repeated attributes are emitted in call order.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Adds a class, merging with any class set earlier.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        let class = class.as_ref();
        if class.is_empty() {
            return self;
        }
        if let Some(existing) = self.attrs.iter_mut().find(|(k, _)| k == "class") {
            existing.1.push(' ');
            existing.1.push_str(class);
            return self;
        }
        self.attrs.push(("class".to_string(), class.to_string()));
        self
    }

    /// Appends an escaped text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    /// Appends a raw HTML child. The caller is responsible for its validity.
    pub fn raw(mut self, html: impl Into<String>) -> Self {
        self.children.push(Child::Raw(html.into()));
        self
    }

    /// Appends a nested element child.
    pub fn child(mut self, child: Tag) -> Self {
        self.children.push(Child::Tag(child));
        self
    }

    /// Renders the element and its children to an HTML string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&escape_attr(v));
            out.push('"');
        }

        if is_void_element(&self.name) {
            out.push_str(" />");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                Child::Text(t) => out.push_str(&escape_text(t)),
                Child::Raw(html) => out.push_str(html),
                Child::Tag(tag) => tag.render_into(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let html = Tag::new("p").text("hello").render();
        assert_eq!(html, "<p>hello</p>");
    }

    #[test]
    fn test_render_attrs_and_classes() {
        let html = Tag::new("div")
            .class("hero")
            .class("block")
            .attr("data-block-name", "hero")
            .render();
        assert_eq!(html, r#"<div class="hero block" data-block-name="hero"></div>"#);
    }

    #[test]
    fn test_render_nested() {
        let html = Tag::new("ul")
            .child(Tag::new("li").text("one"))
            .child(Tag::new("li").text("two"))
            .render();
        assert_eq!(html, "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn test_render_void_element_ignores_children() {
        let html = Tag::new("img")
            .attr("src", "/a.png")
            .attr("alt", "a")
            .render();
        assert_eq!(html, r#"<img src="/a.png" alt="a" />"#);
    }

    #[test]
    fn test_render_escapes_text_and_attrs() {
        let html = Tag::new("a")
            .attr("href", "/q?a=1&b=\"2\"")
            .text("1 < 2 & 3")
            .render();
        assert_eq!(
            html,
            r#"<a href="/q?a=1&amp;b=&quot;2&quot;">1 &lt; 2 &amp; 3</a>"#
        );
    }

    #[test]
    fn test_render_raw_child_passes_through() {
        let html = Tag::new("div").raw("<b>kept</b>").render();
        assert_eq!(html, "<div><b>kept</b></div>");
    }

    #[test]
    fn test_empty_class_is_ignored() {
        let html = Tag::new("div").class("").render();
        assert_eq!(html, "<div></div>");
    }
}
