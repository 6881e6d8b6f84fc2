//! List published posts

use anyhow::Result;

use crate::content::PostSummary;
use crate::helpers::format_date;
use crate::Site;

/// Print published posts, newest first
pub fn run(site: &Site, json: bool) -> Result<()> {
    let summaries = site.posts().list_summaries()?;
    println!("{}", format_listing(&summaries, json)?);
    Ok(())
}

/// Plain-text or JSON listing of `summaries`
pub fn format_listing(summaries: &[PostSummary], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(summaries)?);
    }

    let mut out = format!("Posts ({}):", summaries.len());
    for summary in summaries {
        out.push_str(&format!(
            "\n  {} - {} [{}]",
            format_date(&summary.pub_date),
            summary.title,
            summary.slug
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> Vec<PostSummary> {
        vec![
            PostSummary {
                slug: "second".to_string(),
                title: "Second".to_string(),
                excerpt: String::new(),
                pub_date: "2024-03-01T00:00:00.000Z".to_string(),
            },
            PostSummary {
                slug: "notes/first".to_string(),
                title: "First".to_string(),
                excerpt: "Intro".to_string(),
                pub_date: "2024-01-05T00:00:00.000Z".to_string(),
            },
        ]
    }

    #[test]
    fn test_text_listing() {
        let out = format_listing(&summaries(), false).unwrap();
        assert_eq!(
            out,
            "Posts (2):\n  March 1, 2024 - Second [second]\n  January 5, 2024 - First [notes/first]"
        );
    }

    #[test]
    fn test_json_listing() {
        let out = format_listing(&summaries(), true).unwrap();
        let parsed: Vec<PostSummary> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, summaries());
        assert!(out.contains("\"pubDate\""));
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(format_listing(&[], false).unwrap(), "Posts (0):");
    }
}
