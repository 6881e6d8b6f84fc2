//! Post and summary models

use serde::{Deserialize, Serialize};

/// A blog post read from the content directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Path relative to the content root, extension stripped, `/`-separated
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short description shown in listings (empty when absent)
    pub excerpt: String,

    /// Publication date as an ISO-8601 UTC timestamp
    pub pub_date: String,

    /// Raw markdown/MDX body
    pub content: String,

    /// Drafts are excluded from listings
    pub draft: bool,
}

impl Post {
    /// Listing view of this post
    pub fn summary(&self) -> PostSummary {
        PostSummary::from(self)
    }
}

/// A post without its body, used anywhere more than one post is listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub pub_date: String,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            pub_date: post.pub_date.clone(),
        }
    }
}

/// Anything ordered by publication date
pub trait Dated {
    fn pub_date(&self) -> &str;
}

impl Dated for Post {
    fn pub_date(&self) -> &str {
        &self.pub_date
    }
}

impl Dated for PostSummary {
    fn pub_date(&self) -> &str {
        &self.pub_date
    }
}

/// Sort newest first. ISO-8601 strings order lexicographically; the sort is
/// stable so equal dates keep their relative order.
pub fn sort_newest_first<T: Dated>(items: &mut [T]) {
    items.sort_by(|a, b| b.pub_date().cmp(a.pub_date()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, pub_date: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: format!("Title {}", slug),
            excerpt: String::new(),
            pub_date: pub_date.to_string(),
            content: "# Body".to_string(),
            draft: false,
        }
    }

    #[test]
    fn test_summary_drops_body_and_draft() {
        let mut p = post("notes/first", "2024-01-01T00:00:00.000Z");
        p.excerpt = "An excerpt".to_string();
        let summary = p.summary();

        assert_eq!(summary.slug, p.slug);
        assert_eq!(summary.title, p.title);
        assert_eq!(summary.excerpt, p.excerpt);
        assert_eq!(summary.pub_date, p.pub_date);

        let json = serde_json::to_value(&summary).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("content"));
        assert!(!obj.contains_key("draft"));
        assert_eq!(obj["pubDate"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_sort_newest_first_is_stable() {
        let mut posts = vec![
            post("a", "2024-01-01T00:00:00.000Z"),
            post("b", "2024-03-01T00:00:00.000Z"),
            post("c", "2024-01-01T00:00:00.000Z"),
            post("d", "2023-12-31T23:59:59.000Z"),
        ];
        sort_newest_first(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a", "c", "d"]);
    }
}
