// ABOUTME: DOM utilities for fragment decoration.
// ABOUTME: Markup building, skip-set serialization, and budgeted text trimming.

//! DOM utilities for working with parsed HTML fragments.
//!
//! This module provides the low-level helpers decorators are built from:
//! constructing markup ([`build`]), re-serializing parsed trees while
//! skipping or re-classing nodes ([`serialize`]), and trimming rendered
//! text to a character budget ([`trim`]).

pub mod build;
pub mod serialize;
pub mod trim;
