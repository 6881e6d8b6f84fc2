//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/theme.css") // -> "/site/css/theme.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Percent-encode each `/`-separated segment of a path
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|seg| utf8_percent_encode(seg, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Site-relative URL of the page for `slug`
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &post_path(config, slug))
}

/// Absolute URL of the page for `slug`
pub fn post_permalink(config: &SiteConfig, slug: &str) -> String {
    full_url_for(config, &post_path(config, slug))
}

fn post_path(config: &SiteConfig, slug: &str) -> String {
    format!("{}/{}/", config.blog_dir.trim_matches('/'), encode_path(slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/site/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/theme.css"), "/site/css/theme.css");
        assert_eq!(url_for(&config, ""), "/site/");
        assert_eq!(url_for(&SiteConfig::default(), "blog/a/"), "/blog/a/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/a/"),
            "https://example.com/site/blog/a/"
        );
    }

    #[test]
    fn test_post_url_encodes_segments() {
        let config = SiteConfig::default();
        assert_eq!(post_url(&config, "2024/hello-world"), "/blog/2024/hello-world/");
        assert_eq!(post_url(&config, "caf\u{e9} notes"), "/blog/caf%C3%A9%20notes/");
    }

    #[test]
    fn test_post_permalink() {
        let mut config = test_config();
        config.blog_dir = "/writing/".to_string();
        assert_eq!(
            post_permalink(&config, "notes/a"),
            "https://example.com/site/writing/notes/a/"
        );
    }
}
