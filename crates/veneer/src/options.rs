// ABOUTME: Configuration options for decoration including DecorateOptions and DecoratorBuilder.
// ABOUTME: DecoratorBuilder provides a fluent API for constructing Decorator instances.

use crate::assets::{default_breakpoints, Breakpoint};
use crate::blocks::{BlockRegistry, DecorateFn};
use crate::decorate::Decorator;

/// Configuration options for the decoration engine.
#[derive(Debug, Clone)]
pub struct DecorateOptions {
    /// Base URL local asset paths resolve against.
    pub base_url: Option<String>,
    /// Character budget for card body copy.
    pub summary_char_limit: usize,
    /// Load the first (hero) image eagerly.
    pub eager_first_image: bool,
    /// Synthesize a hero block from a leading picture and h1.
    pub auto_hero: bool,
    /// Renditions emitted for optimized pictures.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for DecorateOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            summary_char_limit: 180,
            eager_first_image: true,
            auto_hero: true,
            breakpoints: default_breakpoints(),
        }
    }
}

/// Builder for constructing Decorator instances with custom configuration.
#[derive(Debug, Clone)]
pub struct DecoratorBuilder {
    opts: DecorateOptions,
    registry: BlockRegistry,
}

impl DecoratorBuilder {
    /// Create a new DecoratorBuilder with default options and the built-in
    /// block decorators.
    pub fn new() -> Self {
        Self {
            opts: DecorateOptions::default(),
            registry: BlockRegistry::builtin(),
        }
    }

    /// Set the base URL for asset resolution.
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.opts.base_url = Some(base.into());
        self
    }

    /// Set the character budget for card body copy.
    pub fn summary_char_limit(mut self, limit: usize) -> Self {
        self.opts.summary_char_limit = limit;
        self
    }

    /// Load the first image eagerly or lazily.
    pub fn eager_first_image(mut self, eager: bool) -> Self {
        self.opts.eager_first_image = eager;
        self
    }

    /// Enable or disable hero auto-building.
    pub fn auto_hero(mut self, auto: bool) -> Self {
        self.opts.auto_hero = auto;
        self
    }

    /// Set the renditions emitted for optimized pictures.
    pub fn breakpoints(mut self, breakpoints: Vec<Breakpoint>) -> Self {
        self.opts.breakpoints = breakpoints;
        self
    }

    /// Replace the block decorator registry.
    pub fn registry(mut self, registry: BlockRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register a single block decorator on top of the current registry.
    pub fn block(mut self, name: impl AsRef<str>, decorator: DecorateFn) -> Self {
        self.registry.register(name, decorator);
        self
    }

    /// Build the Decorator with the configured options.
    pub fn build(self) -> Decorator {
        Decorator::with_registry(self.opts, self.registry)
    }
}

impl Default for DecoratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = DecorateOptions::default();
        assert_eq!(opts.base_url, None);
        assert_eq!(opts.summary_char_limit, 180);
        assert!(opts.eager_first_image);
        assert!(opts.auto_hero);
        assert_eq!(opts.breakpoints.len(), 2);
    }

    #[test]
    fn test_builder_sets_options() {
        let decorator = DecoratorBuilder::new()
            .base_url("https://example.com")
            .summary_char_limit(80)
            .eager_first_image(false)
            .auto_hero(false)
            .build();
        let opts = decorator.options();
        assert_eq!(opts.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(opts.summary_char_limit, 80);
        assert!(!opts.eager_first_image);
        assert!(!opts.auto_hero);
    }
}
