// ABOUTME: Main library entry point for the veneer fragment decorator.
// ABOUTME: Re-exports the public API: Decorator, DecoratorBuilder, blocks, DOM utilities, errors.

//! veneer - server-side decoration of CMS-rendered HTML fragments.
//!
//! This crate takes the "plain" markup a content-managed site renders
//! (nested `<div>` grids) and rearranges it into styled component markup:
//! hero banners, card grids, column layouts. It also exposes the DOM
//! utilities the decorators are built from: markup building, budgeted text
//! trimming, asset-path resolution, and metadata/config extraction.
//!
//! # Example
//!
//! ```
//! use veneer::Decorator;
//!
//! let decorator = Decorator::builder().build();
//! let html = decorator
//!     .decorate("<div><div class=\"columns\"><div><div>One</div><div>Two</div></div></div></div>")
//!     .expect("static fragment decorates");
//! assert!(html.contains("columns-2-cols"));
//! ```

pub mod assets;
pub mod blocks;
pub mod decorate;
pub mod dom;
pub mod error;
pub mod meta;
pub mod options;
pub mod selectors;
pub mod text;

pub use crate::assets::{default_breakpoints, optimized_picture, resolve_asset_url, Breakpoint};
pub use crate::blocks::{
    read_block_config, Block, BlockConfig, BlockRegistry, ConfigEntry, DecorateFn,
};
pub use crate::decorate::Decorator;
pub use crate::dom::trim::{trim_subtree_to_char_limit, trim_text_to_char_limit};
pub use crate::error::{DecorateError, ErrorCode};
pub use crate::meta::{page_metadata, page_metadata_all};
pub use crate::options::{DecorateOptions, DecoratorBuilder};
pub use crate::text::{normalize_whitespace, to_camel_case, to_class_name};
