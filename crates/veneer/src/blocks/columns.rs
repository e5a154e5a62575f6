// ABOUTME: Columns decorator for multi-column layout blocks.
// ABOUTME: Adds the column-count class and marks image-only cells.

use std::collections::{HashMap, HashSet};

use crate::blocks::{is_image_only_cell, Block};
use crate::dom::build::Tag;
use crate::dom::serialize::{serialize_children, ClassAdditions};
use crate::error::DecorateError;
use crate::options::DecorateOptions;

/// Decorates a columns block: the block gains a `columns-N-cols` class for
/// the column count of its first row, and every cell holding only a picture
/// gains `columns-img-col`. Row and cell markup is otherwise preserved.
pub fn decorate(block: &Block<'_>, _opts: &DecorateOptions) -> Result<String, DecorateError> {
    let rows = block.rows();
    let cols = rows.first().map(|row| Block::cells(*row).len()).unwrap_or(0);

    let mut classes: ClassAdditions = HashMap::new();
    for row in &rows {
        for cell in Block::cells(*row) {
            if is_image_only_cell(&cell) {
                classes.insert(cell.id(), vec!["columns-img-col".to_string()]);
            }
        }
    }

    let mut inner = String::new();
    serialize_children(*block.element, &HashSet::new(), &classes, &mut inner);

    let mut root = Tag::new("div").class(&block.name);
    for variant in &block.variants {
        root = root.class(variant);
    }
    root = root.class("block");
    if cols > 0 {
        root = root.class(format!("columns-{}-cols", cols));
    }
    Ok(root
        .attr("data-block-name", &block.name)
        .raw(inner)
        .render())
}
