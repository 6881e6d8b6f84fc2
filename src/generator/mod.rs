//! Generator module - writes the static site using the built-in Tera templates

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::config::{Appearance, PreferenceStore, Theme};
use crate::content::{sort_newest_first, MarkdownRenderer, Post, PostSummary};
use crate::helpers::{post_permalink, url_for};
use crate::render::{SidebarView, TemplateRenderer, SITE_CSS, SITE_JS};
use crate::Site;

/// Listing payload for client-side consumers
pub const POSTS_JSON: &str = "posts.json";

/// Theme values the layout needs before the client script runs
#[derive(Debug, Clone, Serialize)]
struct AppearanceData {
    initial: Theme,
    default: Theme,
}

/// Site-relative asset URLs
#[derive(Debug, Clone, Serialize)]
struct AssetUrls {
    theme_css: String,
    site_css: String,
    script: String,
}

/// Static site generator using Tera templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    appearance: Appearance,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::from_config(&site.config.highlight);

        // The OS preference is only known to the browser
        let stored = PreferenceStore::new(&site.base_dir).load();
        let appearance = Appearance::resolve(stored, None, site.config.theme.default);

        Ok(Self {
            site: site.clone(),
            renderer,
            markdown,
            appearance,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        // Copy static assets (images, etc.)
        self.copy_static_assets()?;

        // Stylesheets and client script
        self.write_assets()?;

        let mut sorted_posts: Vec<_> = posts.iter().filter(|p| !p.draft).cloned().collect();
        sort_newest_first(&mut sorted_posts);
        let summaries: Vec<PostSummary> = sorted_posts.iter().map(PostSummary::from).collect();

        let context = self.create_base_context(&summaries);

        self.generate_index_page(&context)?;
        self.generate_post_pages(&sorted_posts, &context)?;
        self.generate_not_found_page(&context)?;
        self.generate_posts_json(&summaries)?;

        Ok(())
    }

    /// Context shared by every page
    fn create_base_context(&self, summaries: &[PostSummary]) -> Context {
        let config = &self.site.config;
        let mut context = Context::new();

        context.insert("site", config);
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("home_url", &url_for(config, "/"));
        context.insert(
            "appearance",
            &AppearanceData {
                initial: self.appearance.theme(),
                default: config.theme.default,
            },
        );
        context.insert(
            "assets",
            &AssetUrls {
                theme_css: url_for(config, "css/theme.css"),
                site_css: url_for(config, "css/site.css"),
                script: url_for(config, "js/folio.js"),
            },
        );
        context.insert("sidebar", &SidebarView::new(config, summaries));

        context
    }

    /// Generate the home page
    fn generate_index_page(&self, context: &Context) -> Result<()> {
        let html = self.renderer.render("index.html", context)?;
        self.write_output("index.html", &html)
    }

    /// Generate one page per post under the blog directory
    fn generate_post_pages(&self, posts: &[Post], base_context: &Context) -> Result<()> {
        let config = &self.site.config;
        let repo = self.site.posts();

        for post in posts {
            let mdx = repo
                .source_path(&post.slug)
                .and_then(|p| p.extension().map(|ext| ext == "mdx"))
                .unwrap_or(false);
            let post_html = self
                .markdown
                .render_post(&post.content, mdx)
                .with_context(|| format!("Failed to render post {:?}", post.slug))?;

            let mut context = base_context.clone();
            context.insert("post", &post.summary());
            context.insert("post_html", &post_html);
            context.insert("canonical_url", &post_permalink(config, &post.slug));

            let html = self.renderer.render("post.html", &context)?;
            let relative = format!(
                "{}/{}/index.html",
                config.blog_dir.trim_matches('/'),
                post.slug
            );
            // An empty blog_dir puts posts at the site root
            self.write_output(&relative, &html)?;
        }

        tracing::info!("Generated {} post pages", posts.len());
        Ok(())
    }

    /// Generate the page served for unknown routes
    fn generate_not_found_page(&self, context: &Context) -> Result<()> {
        let html = self.renderer.render("404.html", context)?;
        self.write_output("404.html", &html)
    }

    /// Write the summary listing as JSON
    fn generate_posts_json(&self, summaries: &[PostSummary]) -> Result<()> {
        let json = serde_json::to_string_pretty(summaries)?;
        self.write_output(POSTS_JSON, &json)
    }

    /// Write the theme stylesheet, layout stylesheet and client script
    fn write_assets(&self) -> Result<()> {
        let stylesheet = self
            .site
            .config
            .theme
            .stylesheet(self.appearance.theme());
        self.write_output("css/theme.css", &stylesheet)?;
        self.write_output("css/site.css", SITE_CSS)?;
        self.write_output("js/folio.js", SITE_JS)?;
        Ok(())
    }

    /// Copy the static directory verbatim into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.is_dir() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry
                .with_context(|| format!("Failed to walk static directory {:?}", static_dir))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            tracing::debug!("Copied: {:?}", relative);
        }

        Ok(())
    }

    /// Write `content` to a path relative to the public directory
    fn write_output(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self
            .site
            .public_dir
            .join(Path::new(relative.trim_start_matches('/')));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {}", relative);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteLink;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site_with_posts() -> (TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "content/blog/first.md",
            "---\ntitle: First\ndescription: The first one\npubDate: 2024-01-05\n---\n\n# Hello\n",
        );
        write(
            dir.path(),
            "content/blog/notes/second.mdx",
            "---\ntitle: Second\npubDate: 2024-03-01\n---\nimport Chart from './Chart'\n\nSome *mdx* text.\n",
        );
        write(
            dir.path(),
            "content/blog/wip.md",
            "---\ntitle: Work in progress\npubDate: 2024-06-01\ndraft: true\n---\n\nLater.\n",
        );
        write(dir.path(), "static/images/logo.svg", "<svg></svg>");
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    fn generate(site: &Site) {
        let posts = site.posts().list_all().unwrap();
        Generator::new(site).unwrap().generate(&posts).unwrap();
    }

    fn read(site: &Site, relative: &str) -> String {
        fs::read_to_string(site.public_dir.join(relative)).unwrap()
    }

    #[test]
    fn test_generates_all_outputs() {
        let (_dir, site) = site_with_posts();
        generate(&site);

        for file in [
            "index.html",
            "404.html",
            "blog/first/index.html",
            "blog/notes/second/index.html",
            "css/theme.css",
            "css/site.css",
            "js/folio.js",
            "posts.json",
            "images/logo.svg",
        ] {
            assert!(site.public_dir.join(file).is_file(), "missing {}", file);
        }
        assert!(!site.public_dir.join("blog/wip/index.html").exists());
    }

    #[test]
    fn test_index_carries_sidebar_newest_first() {
        let (_dir, site) = site_with_posts();
        generate(&site);

        let html = read(&site, "index.html");
        let second = html.find(r#"href="/blog/notes/second/""#).unwrap();
        let first = html.find(r#"href="/blog/first/""#).unwrap();
        assert!(second < first);
        assert!(html.contains("January 5, 2024"));
        assert!(!html.contains("Work in progress"));
    }

    #[test]
    fn test_post_page_renders_body() {
        let (_dir, site) = site_with_posts();
        generate(&site);

        let html = read(&site, "blog/first/index.html");
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("First | My Site"));
        assert!(html.contains(r#"datetime="2024-01-05T00:00:00.000Z""#));
        assert!(html.contains(r#"href="http://localhost:4000/blog/first/""#));

        let mdx = read(&site, "blog/notes/second/index.html");
        assert!(mdx.contains("<em>mdx</em>"));
        assert!(!mdx.contains("import Chart"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_static_entry_fails_generation() {
        let (dir, site) = site_with_posts();
        std::os::unix::fs::symlink(
            dir.path().join("static/missing.png"),
            dir.path().join("static/images/broken.png"),
        )
        .unwrap();

        let posts = site.posts().list_all().unwrap();
        let err = Generator::new(&site).unwrap().generate(&posts).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.png"));
    }

    #[test]
    fn test_empty_blog_dir_stays_inside_public() {
        let (_dir, mut site) = site_with_posts();
        site.config.blog_dir = String::new();
        generate(&site);

        assert!(site.public_dir.join("first/index.html").is_file());
        assert!(read(&site, "index.html").contains(r#"href="/first/""#));
    }

    #[test]
    fn test_posts_json_lists_summaries() {
        let (_dir, site) = site_with_posts();
        generate(&site);

        let json: serde_json::Value = serde_json::from_str(&read(&site, POSTS_JSON)).unwrap();
        let list = json.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["slug"], "notes/second");
        assert_eq!(list[1]["excerpt"], "The first one");
        assert_eq!(list[1]["pubDate"], "2024-01-05T00:00:00.000Z");
        assert!(list[0].get("content").is_none());
    }

    #[test]
    fn test_home_page_lists_configured_links() {
        let (_dir, mut site) = site_with_posts();
        generate(&site);
        assert!(!read(&site, "index.html").contains("home-links"));

        site.config.links = vec![SiteLink {
            name: "Personal Applications".to_string(),
            url: "https://apps.example.com/?a=1&b=2".to_string(),
        }];
        generate(&site);

        let html = read(&site, "index.html");
        assert!(html.contains(r#"class="home-links""#));
        assert!(html.contains(r#"aria-label="Personal Applications""#));
        assert!(html.contains("https:&#x2F;&#x2F;apps.example.com&#x2F;?a=1&amp;b=2"));
    }

    #[test]
    fn test_empty_site_shows_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        generate(&site);

        let html = read(&site, "index.html");
        assert!(html.contains("No blog posts yet"));
        assert_eq!(read(&site, POSTS_JSON).trim(), "[]");
    }

    #[test]
    fn test_stored_preference_sets_initial_theme() {
        let (dir, site) = site_with_posts();
        PreferenceStore::new(dir.path()).save(Theme::Dark).unwrap();
        generate(&site);

        let html = read(&site, "index.html");
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains(r#"data-default-theme="light""#));
    }
}
