// ABOUTME: Pre-compiled CSS selector cache for metadata and block lookups.
// ABOUTME: Compiles each selector once and reuses the Matcher on every query.

//! Selector caching for repeated DOM queries.
//!
//! Metadata extraction resolves the same handful of `meta[...]` selectors on
//! every fragment it sees. Compiling a selector is expensive relative to
//! matching it, so this module keeps a process-wide cache of compiled
//! `Matcher`s keyed by selector string.

use std::collections::HashMap;
use std::sync::RwLock;

use dom_query::Matcher;
use once_cell::sync::Lazy;

// Invalid selectors cache as None so they are not re-parsed either.
static MATCHER_CACHE: Lazy<RwLock<HashMap<String, Option<Matcher>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `Some(Matcher)` for a valid selector, `None` for an invalid one.
/// Safe to call from multiple threads: cache hits take a shared lock, misses
/// an exclusive one.
pub fn cached_matcher(css: &str) -> Option<Matcher> {
    {
        let cache = MATCHER_CACHE.read().unwrap();
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Matcher::new(css).ok();
    let mut cache = MATCHER_CACHE.write().unwrap();
    // Another thread may have compiled it while we waited for the lock
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}

/// Compiles a batch of selectors into the cache up front.
///
/// Useful during startup to avoid lock contention once decoration begins.
pub fn warm_cache<I, S>(selectors: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cache = MATCHER_CACHE.write().unwrap();
    for css in selectors {
        let css = css.as_ref();
        if !cache.contains_key(css) {
            let compiled = Matcher::new(css).ok();
            cache.insert(css.to_string(), compiled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_selector_is_cached() {
        assert!(cached_matcher("meta[name]").is_some());
        assert!(cached_matcher("meta[name]").is_some());
    }

    #[test]
    fn test_invalid_selector_returns_none() {
        assert!(cached_matcher("[[[invalid").is_none());
        assert!(cached_matcher("[[[invalid").is_none());
    }

    #[test]
    fn test_warm_cache() {
        warm_cache(["div.section", "div.block", "picture > img"]);
        assert!(cached_matcher("div.section").is_some());
        assert!(cached_matcher("div.block").is_some());
        assert!(cached_matcher("picture > img").is_some());
    }
}
