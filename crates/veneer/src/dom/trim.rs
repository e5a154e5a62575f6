// ABOUTME: Budgeted text trimming for parsed HTML fragments.
// ABOUTME: Walks a fragment depth-first, truncating and pruning once the character budget is spent.

//! Trimming rendered rich text to a character budget.
//!
//! [`trim_text_to_char_limit`] enforces a single character budget across an
//! entire fragment while keeping the retained markup nested exactly as it
//! was: truncation never splits a tag and never leaves a dangling unclosed
//! element. This is what lets a rich-text summary be cut down to a card's
//! character limit without flattening it to plain text first.
//!
//! Accounting rules:
//!
//! - A text node counts for its full character length when it contains any
//!   non-whitespace character, and for zero otherwise. Whitespace-only text
//!   nodes pass through untouched.
//! - A text node that crosses the remaining budget keeps exactly the prefix
//!   that fits. The running counter still advances by the node's full
//!   length, so the discarded tail also spends budget; this is what stops
//!   any later sibling from contributing.
//! - Once the budget is spent, every later node whose subtree contains
//!   visible text is detached whole. Subtrees with no visible text (pure
//!   whitespace, bare images) are never pruned.

use ego_tree::{NodeId, Tree};
use scraper::{Html, Node};

/// Trims a parsed fragment in place so that the total visible text retained
/// across all its text nodes does not exceed `limit` characters.
///
/// Characters are Unicode scalar values, so truncation never splits a code
/// point. A `limit` of at least the fragment's visible text length leaves
/// the fragment unchanged; a `limit` of zero removes everything that
/// carries visible text and nothing else.
pub fn trim_text_to_char_limit(fragment: &mut Html, limit: usize) {
    let root = fragment.tree.root().id();
    trim_subtree_to_char_limit(&mut fragment.tree, root, limit);
}

/// Trims the subtree under `root` to `limit` characters of visible text.
///
/// Same contract as [`trim_text_to_char_limit`], scoped to one node of an
/// existing tree. The root itself is never detached; exhaustion removes its
/// text-bearing descendants instead.
pub fn trim_subtree_to_char_limit(tree: &mut Tree<Node>, root: NodeId, limit: usize) {
    let mut count = 0usize;
    trim_node(tree, root, limit, &mut count);
}

/// Number of characters a text node counts for: its full length when it
/// holds any non-whitespace character, zero otherwise.
fn effective_len(text: &str) -> usize {
    if text.trim().is_empty() {
        0
    } else {
        text.chars().count()
    }
}

/// Whether any text node at or under `id` carries a non-whitespace character.
fn has_visible_text(tree: &Tree<Node>, id: NodeId) -> bool {
    let Some(node) = tree.get(id) else {
        return false;
    };
    node.descendants().any(|n| match n.value() {
        Node::Text(t) => !t.text.trim().is_empty(),
        _ => false,
    })
}

enum Step {
    Text(String, usize),
    Branch(Vec<NodeId>),
    Leaf,
}

fn trim_node(tree: &mut Tree<Node>, id: NodeId, limit: usize, count: &mut usize) {
    let step = match tree.get(id) {
        Some(node) => match node.value() {
            Node::Text(t) => Step::Text(t.text.to_string(), effective_len(&t.text)),
            Node::Element(_) | Node::Document | Node::Fragment => {
                // Snapshot child ids: the loop below detaches while iterating
                Step::Branch(node.children().map(|c| c.id()).collect())
            }
            _ => Step::Leaf,
        },
        None => Step::Leaf,
    };

    match step {
        Step::Text(text, effective) => {
            if *count + effective > limit {
                let keep = limit - *count;
                let truncated: String = text.chars().take(keep).collect();
                if let Some(mut node) = tree.get_mut(id) {
                    if let Node::Text(t) = node.value() {
                        t.text = truncated.as_str().into();
                    }
                }
            }
            // The counter advances by the node's full effective length even
            // when only a prefix was kept; callers observe this accounting.
            *count += effective;
        }
        Step::Branch(children) => {
            for child in children {
                if *count >= limit {
                    if has_visible_text(tree, child) {
                        if let Some(mut node) = tree.get_mut(child) {
                            node.detach();
                        }
                    }
                } else {
                    trim_node(tree, child, limit, count);
                }
            }
        }
        Step::Leaf => {}
    }
}
