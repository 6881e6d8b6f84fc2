//! Generate static files

use anyhow::{Context, Result};
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Site, CONFIG_FILE};

/// Generate the static site
///
/// Posts are read fresh on every pass.
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let posts = site
        .posts()
        .list_all()
        .with_context(|| format!("Failed to load posts from {:?}", site.content_dir))?;
    tracing::info!("Loaded {} posts", posts.len());

    let generator = Generator::new(site)?;
    generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Content and static directories
    for dir in [&site.content_dir, &site.static_dir] {
        if dir.exists() {
            watcher.watch(dir, notify::RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    // Config file
    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = reload(site).and_then(|site| run(&site)) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// Re-read the configuration so config edits apply to the next pass
fn reload(site: &Site) -> Result<Site> {
    Site::new(&site.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_generates_site() {
        let dir = tempfile::tempdir().unwrap();
        let post = dir.path().join("content/blog/hello.md");
        fs::create_dir_all(post.parent().unwrap()).unwrap();
        fs::write(&post, "---\ntitle: Hello\npubDate: 2024-01-01\n---\nHi\n").unwrap();

        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();

        assert!(site.public_dir.join("blog/hello/index.html").is_file());
    }

    #[test]
    fn test_run_fails_on_malformed_post() {
        let dir = tempfile::tempdir().unwrap();
        let post = dir.path().join("content/blog/broken.md");
        fs::create_dir_all(post.parent().unwrap()).unwrap();
        fs::write(&post, "---\ntitle: Broken\n").unwrap();

        let site = Site::new(dir.path()).unwrap();
        let err = run(&site).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.md"));
        assert!(!site.public_dir.join("index.html").exists());
    }
}
