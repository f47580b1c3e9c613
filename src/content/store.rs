//! Post store - loads and validates posts from the content directory

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Author, ContentError, FrontMatter, FullPost, PostMetadata};

/// Reading speed used for the reading-time estimate
const WORDS_PER_MINUTE: usize = 200;

/// File extensions recognized as post sources
const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Loads posts from a flat content directory.
///
/// Every call re-reads the directory; records are plain value objects and
/// nothing is cached between calls.
pub struct PostStore {
    source_dir: PathBuf,
}

impl PostStore {
    /// Create a store over a content directory
    pub fn new<P: Into<PathBuf>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// The directory this store reads from
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Load metadata for every post, sorted by date descending.
    ///
    /// A missing content directory yields an empty list. A post with
    /// missing required fields, an unparseable date, or a slug collision
    /// fails the whole listing; partial results are never returned.
    pub fn all_posts(&self) -> Result<Vec<PostMetadata>, ContentError> {
        if !self.source_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        let mut seen = HashSet::new();

        for entry in WalkDir::new(&self.source_dir)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_content_file(path) {
                continue;
            }

            let slug = slug_for(path);
            if !seen.insert(slug.clone()) {
                return Err(ContentError::DuplicateSlug { slug });
            }

            let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
                slug: slug.clone(),
                source,
            })?;
            let (fm, _body) = parse_frontmatter(&slug, &raw)?;
            posts.push(build_metadata(&slug, &fm)?);
        }

        // Stable sort: posts with equal dates keep scan order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load one post with its raw body by slug.
    ///
    /// A missing file, an unreadable file, or invalid metadata all collapse
    /// to `None`; a single broken post is a lookup miss, not a fault.
    pub fn post_by_slug(&self, slug: &str) -> Option<FullPost> {
        let path = self.resolve(slug)?;

        match self.load_full_post(slug, &path) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!("Failed to load post `{}`: {}", slug, e);
                None
            }
        }
    }

    /// Posts with `featured` set, in listing order
    pub fn featured_posts(&self) -> Result<Vec<PostMetadata>, ContentError> {
        Ok(self
            .all_posts()?
            .into_iter()
            .filter(|p| p.featured)
            .collect())
    }

    /// Posts carrying the given tag (case-insensitive), in listing order
    pub fn posts_with_tag(&self, tag: &str) -> Result<Vec<PostMetadata>, ContentError> {
        let tag = tag.to_lowercase();
        Ok(self
            .all_posts()?
            .into_iter()
            .filter(|p| p.tags.iter().any(|t| t.to_lowercase() == tag))
            .collect())
    }

    /// Find the file backing a slug, trying each recognized extension
    fn resolve(&self, slug: &str) -> Option<PathBuf> {
        CONTENT_EXTENSIONS
            .iter()
            .map(|ext| self.source_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.is_file())
    }

    fn load_full_post(&self, slug: &str, path: &Path) -> Result<FullPost, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
            slug: slug.to_string(),
            source,
        })?;
        let (fm, body) = parse_frontmatter(slug, &raw)?;
        let meta = build_metadata(slug, &fm)?;

        Ok(FullPost {
            meta,
            content: body.to_string(),
            reading_time: reading_time(body),
        })
    }
}

/// Estimate reading time from a whitespace-delimited word count,
/// rounded up and never below one minute
fn reading_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

fn parse_frontmatter<'a>(
    slug: &str,
    raw: &'a str,
) -> Result<(FrontMatter, &'a str), ContentError> {
    FrontMatter::parse(raw).map_err(|e| ContentError::Frontmatter {
        slug: slug.to_string(),
        reason: e.to_string(),
    })
}

/// Validate and normalize front-matter into a fully-typed record.
/// Either every required field checks out or the post is rejected.
fn build_metadata(slug: &str, fm: &FrontMatter) -> Result<PostMetadata, ContentError> {
    let title = required_field(slug, "title", &fm.title)?;
    let excerpt = required_field(slug, "excerpt", &fm.excerpt)?;

    let date_raw = required_field(slug, "date", &fm.date)?;
    let date = fm.parse_date().ok_or_else(|| ContentError::InvalidDate {
        slug: slug.to_string(),
        value: date_raw.clone(),
    })?;

    let author = Author {
        name: fm
            .author
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Anonymous")
            .to_string(),
        avatar: fm.author_avatar.clone(),
        bio: fm.author_bio.clone(),
    };

    Ok(PostMetadata {
        slug: slug.to_string(),
        title,
        date,
        excerpt,
        author,
        tags: fm.tags.clone(),
        featured: fm.featured,
    })
}

fn required_field(
    slug: &str,
    field: &'static str,
    value: &Option<String>,
) -> Result<String, ContentError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ContentError::MissingField {
            slug: slug.to_string(),
            field,
        })
}

/// Check if a file has a recognized content extension
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CONTENT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Derive a post slug from its file name
fn slug_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}
