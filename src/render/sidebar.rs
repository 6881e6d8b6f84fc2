//! Post sidebar model

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{sort_newest_first, PostSummary};
use crate::helpers::{format_date, post_url};

/// Shown in place of the list when there are no posts
pub const NO_POSTS: &str = "No blog posts yet";

/// One navigable sidebar entry
#[derive(Debug, Clone, Serialize)]
pub struct SidebarEntry {
    pub slug: String,
    pub title: String,
    /// Display date
    pub date: String,
    /// Omitted when the post has no excerpt
    pub excerpt: Option<String>,
    pub href: String,
    pub aria_label: String,
}

/// The sidebar's contents, newest post first
#[derive(Debug, Clone, Serialize)]
pub struct SidebarView {
    entries: Vec<SidebarEntry>,
    placeholder: &'static str,
}

impl SidebarView {
    /// Build the view from summaries in any order
    pub fn new(config: &SiteConfig, summaries: &[PostSummary]) -> Self {
        let mut sorted = summaries.to_vec();
        sort_newest_first(&mut sorted);

        let entries = sorted
            .into_iter()
            .map(|summary| {
                let date = format_date(&summary.pub_date);
                SidebarEntry {
                    href: post_url(config, &summary.slug),
                    aria_label: format!("{} - Published on {}", summary.title, date),
                    excerpt: (!summary.excerpt.is_empty()).then_some(summary.excerpt),
                    slug: summary.slug,
                    title: summary.title,
                    date,
                }
            })
            .collect();

        Self {
            entries,
            placeholder: NO_POSTS,
        }
    }

    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TemplateRenderer;

    fn summary(slug: &str, pub_date: &str, excerpt: &str) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: format!("Post {}", slug.to_uppercase()),
            excerpt: excerpt.to_string(),
            pub_date: pub_date.to_string(),
        }
    }

    #[test]
    fn test_resorts_ascending_input() {
        let summaries = vec![
            summary("a", "2024-01-01", ""),
            summary("b", "2024-03-01", ""),
        ];
        let view = SidebarView::new(&SiteConfig::default(), &summaries);
        let slugs: Vec<_> = view.entries().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[test]
    fn test_entry_fields() {
        let summaries = vec![summary(
            "notes/intro",
            "2024-01-05T00:00:00.000Z",
            "Hello there",
        )];
        let view = SidebarView::new(&SiteConfig::default(), &summaries);
        let entry = &view.entries()[0];

        assert_eq!(entry.date, "January 5, 2024");
        assert_eq!(entry.href, "/blog/notes/intro/");
        assert_eq!(entry.excerpt.as_deref(), Some("Hello there"));
        assert_eq!(
            entry.aria_label,
            "Post NOTES/INTRO - Published on January 5, 2024"
        );
    }

    #[test]
    fn test_render_orders_entries_and_omits_empty_excerpt() {
        let summaries = vec![
            summary("a", "2024-01-01", ""),
            summary("b", "2024-03-01", "Second post"),
        ];
        let view = SidebarView::new(&SiteConfig::default(), &summaries);
        let html = TemplateRenderer::new().unwrap().render_sidebar(&view).unwrap();

        let b = html.find(r#"href="/blog/b/""#).unwrap();
        let a = html.find(r#"href="/blog/a/""#).unwrap();
        assert!(b < a);
        assert_eq!(html.matches("post-description").count(), 1);
        assert!(html.contains("Second post"));
        assert!(!html.contains(NO_POSTS));
    }

    #[test]
    fn test_render_empty_shows_placeholder() {
        let view = SidebarView::new(&SiteConfig::default(), &[]);
        assert!(view.is_empty());

        let html = TemplateRenderer::new().unwrap().render_sidebar(&view).unwrap();
        assert!(html.contains(r#"<div class="no-posts">No blog posts yet</div>"#));
        assert!(!html.contains("posts-list"));
    }

    #[test]
    fn test_render_escapes_titles() {
        let mut s = summary("x", "2024-01-01", "");
        s.title = "<script>alert(1)</script>".to_string();
        let view = SidebarView::new(&SiteConfig::default(), &[s]);
        let html = TemplateRenderer::new().unwrap().render_sidebar(&view).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
