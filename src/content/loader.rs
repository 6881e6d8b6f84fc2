//! Post repository - loads posts from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{sort_newest_first, ContentError, FrontMatter, Post, PostSummary};

/// Recognized content extensions, in slug resolution priority order
pub const CONTENT_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Reads posts from a content directory
///
/// Nothing is cached: every call reads the tree again.
#[derive(Debug, Clone)]
pub struct PostRepository {
    root: PathBuf,
}

impl PostRepository {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All published posts, newest first
    ///
    /// Any unreadable or malformed file aborts the whole listing.
    pub fn list_all(&self) -> Result<Vec<Post>, ContentError> {
        if !self.root.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", self.root);
            return Ok(Vec::new());
        }

        // (extension priority, post) in encounter order
        let mut loaded: Vec<(usize, Post)> = Vec::new();
        let mut by_slug: HashMap<String, usize> = HashMap::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| ContentError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(rank) = extension_rank(path) else {
                continue;
            };
            let Some(slug) = slug_for(&self.root, path) else {
                continue;
            };

            let post = load_post(path, slug)?;

            match by_slug.get(&post.slug) {
                Some(&idx) => {
                    tracing::warn!(
                        "Slug {:?} is defined by more than one file, keeping the .{} source",
                        post.slug,
                        CONTENT_EXTENSIONS[rank.min(loaded[idx].0)]
                    );
                    if rank < loaded[idx].0 {
                        loaded[idx] = (rank, post);
                    }
                }
                None => {
                    by_slug.insert(post.slug.clone(), loaded.len());
                    loaded.push((rank, post));
                }
            }
        }

        let mut posts: Vec<Post> = loaded
            .into_iter()
            .map(|(_, post)| post)
            .filter(|post| !post.draft)
            .collect();
        sort_newest_first(&mut posts);

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.root);
        Ok(posts)
    }

    /// Summaries of all published posts, newest first
    pub fn list_summaries(&self) -> Result<Vec<PostSummary>, ContentError> {
        Ok(self.list_all()?.iter().map(PostSummary::from).collect())
    }

    /// Resolve a slug to a post
    ///
    /// Returns `None` both when no file matches and when the matching file
    /// cannot be parsed; use [`PostRepository::lookup`] to tell them apart.
    /// Slugs that would leave the content directory never resolve.
    pub fn get_by_slug(&self, slug: &str) -> Option<Post> {
        match self.lookup(slug) {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!("Failed to load post {:?}: {}", slug, e);
                None
            }
        }
    }

    /// Resolve a slug, surfacing malformed content as an error
    pub fn lookup(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        if !is_contained(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }

        match self.source_path(slug) {
            Some(path) => load_post(&path, slug.to_string()).map(Some),
            None => Ok(None),
        }
    }

    /// File a slug resolves to, trying [`CONTENT_EXTENSIONS`] in order
    pub fn source_path(&self, slug: &str) -> Option<PathBuf> {
        if !is_contained(slug) {
            return None;
        }
        CONTENT_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
    }
}

/// Read and parse a single post
fn load_post(path: &Path, slug: String) -> Result<Post, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (fm, body) =
        FrontMatter::parse(&raw).map_err(|e| ContentError::MalformedFrontMatter {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let pub_date = match fm.pub_date() {
        Some(Ok(date)) => date,
        Some(Err(value)) => {
            return Err(ContentError::InvalidDate {
                path: path.to_path_buf(),
                value,
            })
        }
        None => {
            return Err(ContentError::MissingField {
                path: path.to_path_buf(),
                field: "pubDate",
            })
        }
    };

    let title = fm
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ContentError::MissingField {
            path: path.to_path_buf(),
            field: "title",
        })?;

    Ok(Post {
        slug,
        title,
        excerpt: fm.description.unwrap_or_default(),
        pub_date,
        content: body.to_string(),
        draft: fm.draft,
    })
}

/// Position of the file's extension in [`CONTENT_EXTENSIONS`]
fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?;
    CONTENT_EXTENSIONS.iter().position(|e| *e == ext)
}

/// Slug from the path relative to the content root
fn slug_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Whether a slug names a path strictly inside the content root
pub(crate) fn is_contained(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.contains('\\')
        && !slug.contains(':')
        && slug
            .split('/')
            .all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}
