// ABOUTME: Asset URL resolution and responsive picture markup for decoration.
// ABOUTME: Resolves relative asset paths against a base and renders optimized <picture> elements.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom::build::Tag;

/// Patterns indicating spacer or tracking-pixel images (case-insensitive).
static SPACER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)transparent|spacer|blank|pixel|tracking|beacon|1x1").unwrap());

/// One rendition of a responsive image: an optional media query and a width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub media: Option<String>,
    pub width: u32,
}

impl Breakpoint {
    pub fn new(media: Option<&str>, width: u32) -> Self {
        Self {
            media: media.map(str::to_string),
            width,
        }
    }
}

/// Default renditions: a 2000px desktop cut and a 750px mobile fallback.
pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new(Some("(min-width: 600px)"), 2000),
        Breakpoint::new(None, 750),
    ]
}

/// Resolves a potentially relative asset URL against a base URL.
/// Returns None if resolution fails or the input is invalid.
pub fn resolve_asset_url(src: &str, base: Option<&str>) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    // Already absolute
    if src.starts_with("http://") || src.starts_with("https://") {
        return Some(src.to_string());
    }

    // Data URIs are already absolute
    if src.starts_with("data:") {
        return Some(src.to_string());
    }

    let base = base?;
    let base_parsed = Url::parse(base).ok()?;

    let resolved = base_parsed.join(src).ok()?;
    Some(resolved.to_string())
}

/// Checks whether an asset lives on the same host as the given base URL.
/// Relative paths count as local; data URIs and foreign hosts do not.
pub fn is_local_asset(src: &str, base: &str) -> bool {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return false;
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        let (Ok(src_url), Ok(base_url)) = (Url::parse(src), Url::parse(base)) else {
            return false;
        };
        return src_url.host_str() == base_url.host_str();
    }
    true
}

/// Checks whether an image source looks like a spacer or tracking pixel.
pub fn is_spacer_image(src: &str) -> bool {
    let src = src.trim();
    if src.is_empty() {
        return true;
    }
    let lower = src.to_lowercase();
    if SPACER_RE.is_match(&lower) {
        return true;
    }
    contains_tiny_dimensions(&lower)
}

/// Checks if a URL carries 1x1-pixel dimensions in its query string.
fn contains_tiny_dimensions(url: &str) -> bool {
    if url.contains("width=1&") || url.ends_with("width=1") {
        return true;
    }
    if url.contains("height=1&") || url.ends_with("height=1") {
        return true;
    }
    if url.contains("w=1&") || url.contains("&w=1") || url.ends_with("?w=1") {
        return true;
    }
    if url.contains("h=1&") || url.contains("&h=1") || url.ends_with("?h=1") {
        return true;
    }
    false
}

/// Renders responsive `<picture>` markup for an asset.
///
/// Emits one webp `<source>` per breakpoint, fallback `<source>`s in the
/// original format for all but the last breakpoint, and a final `<img>`
/// carrying the alt text and the loading strategy. Returns None for an
/// empty source.
pub fn optimized_picture(
    src: &str,
    alt: &str,
    eager: bool,
    breakpoints: &[Breakpoint],
) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }
    // Optimization params are rebuilt per rendition, so any existing query goes
    let path = src.split(['?', '#']).next().unwrap_or(src);
    if path.is_empty() {
        return None;
    }
    let ext = match path.rsplit('/').next().and_then(|f| f.rsplit_once('.')) {
        Some((_, e)) if !e.is_empty() => e,
        _ => "png",
    };

    let defaults;
    let breakpoints = if breakpoints.is_empty() {
        defaults = default_breakpoints();
        &defaults
    } else {
        breakpoints
    };

    let mut picture = Tag::new("picture");
    for bp in breakpoints {
        let mut source = Tag::new("source").attr("type", "image/webp");
        if let Some(media) = &bp.media {
            source = source.attr("media", media.clone());
        }
        source = source.attr(
            "srcset",
            format!("{}?width={}&format=webply&optimize=medium", path, bp.width),
        );
        picture = picture.child(source);
    }

    for (i, bp) in breakpoints.iter().enumerate() {
        let fallback = format!("{}?width={}&format={}&optimize=medium", path, bp.width, ext);
        if i < breakpoints.len() - 1 {
            let mut source = Tag::new("source");
            if let Some(media) = &bp.media {
                source = source.attr("media", media.clone());
            }
            picture = picture.child(source.attr("srcset", fallback));
        } else {
            picture = picture.child(
                Tag::new("img")
                    .attr("loading", if eager { "eager" } else { "lazy" })
                    .attr("alt", alt)
                    .attr("src", fallback),
            );
        }
    }

    Some(picture.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_asset_url_absolute() {
        let result = resolve_asset_url("https://example.com/media/hero.jpg", None);
        assert_eq!(result, Some("https://example.com/media/hero.jpg".to_string()));
    }

    #[test]
    fn test_resolve_asset_url_relative_with_base() {
        let result = resolve_asset_url("/media/hero.jpg", Some("https://example.com/page"));
        assert_eq!(result, Some("https://example.com/media/hero.jpg".to_string()));

        let result = resolve_asset_url("hero.jpg", Some("https://example.com/articles/"));
        assert_eq!(
            result,
            Some("https://example.com/articles/hero.jpg".to_string())
        );
    }

    #[test]
    fn test_resolve_asset_url_relative_without_base() {
        assert_eq!(resolve_asset_url("/media/hero.jpg", None), None);
    }

    #[test]
    fn test_resolve_asset_url_empty() {
        assert_eq!(resolve_asset_url("", None), None);
        assert_eq!(resolve_asset_url("   ", Some("https://example.com")), None);
    }

    #[test]
    fn test_is_local_asset() {
        assert!(is_local_asset("/media/a.png", "https://example.com"));
        assert!(is_local_asset(
            "https://example.com/a.png",
            "https://example.com/page"
        ));
        assert!(!is_local_asset(
            "https://cdn.other.com/a.png",
            "https://example.com"
        ));
        assert!(!is_local_asset("data:image/png;base64,AAAA", "https://example.com"));
    }

    #[test]
    fn test_is_spacer_image() {
        assert!(is_spacer_image("transparent.gif"));
        assert!(is_spacer_image("/img/spacer.png"));
        assert!(is_spacer_image("https://t.example.com/pixel.gif"));
        assert!(is_spacer_image("/media/photo.jpg?width=1&height=1"));
        assert!(is_spacer_image(""));
        assert!(!is_spacer_image("/media/photo.jpg"));
    }

    #[test]
    fn test_optimized_picture_structure() {
        let html = optimized_picture(
            "/media/hero.jpg?x=1",
            "A hero",
            true,
            &default_breakpoints(),
        )
        .unwrap();

        // webp sources for both breakpoints, existing query dropped
        assert!(html.contains(r#"type="image/webp""#));
        assert!(html.contains("/media/hero.jpg?width=2000&amp;format=webply&amp;optimize=medium"));
        assert!(html.contains("/media/hero.jpg?width=750&amp;format=webply&amp;optimize=medium"));
        // fallback keeps the original format
        assert!(html.contains("format=jpg"));
        // final img carries loading and alt
        assert!(html.contains(r#"loading="eager""#));
        assert!(html.contains(r#"alt="A hero""#));
        assert!(html.starts_with("<picture>"));
        assert!(html.ends_with("</picture>"));
    }

    #[test]
    fn test_optimized_picture_lazy_and_default_ext() {
        let html = optimized_picture("/media/asset", "", false, &default_breakpoints()).unwrap();
        assert!(html.contains(r#"loading="lazy""#));
        assert!(html.contains("format=png"));
    }

    #[test]
    fn test_optimized_picture_empty_src() {
        assert_eq!(optimized_picture("", "alt", false, &default_breakpoints()), None);
        assert_eq!(optimized_picture("  ", "alt", false, &[]), None);
    }

    #[test]
    fn test_optimized_picture_empty_breakpoints_uses_defaults() {
        let html = optimized_picture("/a.png", "", false, &[]).unwrap();
        assert!(html.contains("width=2000"));
        assert!(html.contains("width=750"));
    }
}
