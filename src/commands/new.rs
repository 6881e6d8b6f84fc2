//! Create a new post

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::is_contained;
use crate::content::CONTENT_EXTENSIONS;
use crate::Site;

/// Front matter written for a new post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "pubDate")]
    pub_date: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    draft: bool,
}

/// Create a new post under the content directory, returning its path
///
/// The slug is `path` when given, otherwise the slugified title.
pub fn create_post(
    site: &Site,
    title: &str,
    path: Option<&str>,
    description: Option<&str>,
    draft: bool,
) -> Result<PathBuf> {
    let slug = match path {
        Some(p) => p.trim_matches('/').to_string(),
        None => slug::slugify(title),
    };
    if !is_contained(&slug) {
        anyhow::bail!("Invalid post path: {:?}", slug);
    }

    // A post of the same slug in either format would shadow or be shadowed
    for ext in CONTENT_EXTENSIONS {
        let existing = site.content_dir.join(format!("{}.{}", slug, ext));
        if existing.exists() {
            anyhow::bail!("File already exists: {:?}", existing);
        }
    }

    let scaffold = Scaffold {
        title,
        description,
        pub_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        draft,
    };
    let front_matter = serde_yaml::to_string(&scaffold)?;
    let content = format!("---\n{}---\n\n", front_matter);

    let file_path = site.content_dir.join(format!("{}.md", slug));
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}
