// ABOUTME: Serialization of parsed fragments back to HTML strings.
// ABOUTME: Supports skip sets for pruned nodes and per-node class injection.

use std::collections::{HashMap, HashSet};

use ego_tree::{NodeId, NodeRef};
use scraper::Node;

/// Extra classes to merge into specific elements during serialization.
pub type ClassAdditions = HashMap<NodeId, Vec<String>>;

/// Serializes a node and its subtree, honoring the skip set and class additions.
pub fn serialize_node(
    node: NodeRef<Node>,
    skip: &HashSet<NodeId>,
    classes: &ClassAdditions,
    out: &mut String,
) {
    if skip.contains(&node.id()) {
        return;
    }
    match node.value() {
        Node::Text(t) => out.push_str(&escape_text(t)),
        Node::Element(el) => {
            let name = el.name();
            out.push('<');
            out.push_str(name);

            let added = classes.get(&node.id());
            let mut wrote_class = false;
            for (k, v) in el.attrs() {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                if k == "class" {
                    wrote_class = true;
                    out.push_str(&escape_attr(v));
                    if let Some(extra) = added {
                        for class in extra {
                            out.push(' ');
                            out.push_str(&escape_attr(class));
                        }
                    }
                } else {
                    out.push_str(&escape_attr(v));
                }
                out.push('"');
            }
            if !wrote_class {
                if let Some(extra) = added {
                    out.push_str(" class=\"");
                    out.push_str(&escape_attr(&extra.join(" ")));
                    out.push('"');
                }
            }

            if is_void_element(name) {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for child in node.children() {
                serialize_node(child, skip, classes, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        _ => {}
    }
}

/// Serializes only the children of a node, honoring skip set and class additions.
pub fn serialize_children(
    node: NodeRef<Node>,
    skip: &HashSet<NodeId>,
    classes: &ClassAdditions,
    out: &mut String,
) {
    for child in node.children() {
        serialize_node(child, skip, classes, out);
    }
}

/// Escape attribute value.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Check if tag is an HTML void element.
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
