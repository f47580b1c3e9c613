//! inkpost: content pipeline for a markdown-powered personal blog
//!
//! This crate loads markdown posts from a content directory, validates
//! their front-matter, and renders bodies to HTML with GitHub-flavored
//! extensions, syntax highlighting, and a derived table of contents.
//! Presentation (layout, routing, theming) is left to the consumer.

pub mod config;
pub mod content;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::BlogConfig;
use content::{
    generate_toc, ContentError, FullPost, MarkdownRenderer, PostMetadata, PostStore, RenderedPost,
};

/// The main blog application
pub struct Blog {
    /// Site configuration
    pub config: BlogConfig,
    /// Directory holding post markdown files
    pub source_dir: PathBuf,
    store: PostStore,
    renderer: MarkdownRenderer,
}

impl Blog {
    /// Create a new blog instance from a base directory.
    ///
    /// Reads `blog.yml` from the base directory when present, falling back
    /// to defaults otherwise.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join("blog.yml");

        let config = if config_path.exists() {
            BlogConfig::load(&config_path)?
        } else {
            BlogConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let store = PostStore::new(&source_dir);
        let renderer = MarkdownRenderer::with_theme(&config.highlight.theme);

        Ok(Self {
            config,
            source_dir,
            store,
            renderer,
        })
    }

    /// Metadata for all posts, newest first
    pub fn posts(&self) -> Result<Vec<PostMetadata>, ContentError> {
        self.store.all_posts()
    }

    /// Featured posts, newest first
    pub fn featured_posts(&self) -> Result<Vec<PostMetadata>, ContentError> {
        self.store.featured_posts()
    }

    /// Posts carrying the given tag (case-insensitive), newest first
    pub fn posts_with_tag(&self, tag: &str) -> Result<Vec<PostMetadata>, ContentError> {
        self.store.posts_with_tag(tag)
    }

    /// One post with its raw markdown body, or `None` if not found
    pub fn post(&self, slug: &str) -> Option<FullPost> {
        self.store.post_by_slug(slug)
    }

    /// One post rendered for display: HTML body plus table of contents,
    /// or `None` if not found
    pub fn rendered_post(&self, slug: &str) -> Option<RenderedPost> {
        let post = self.store.post_by_slug(slug)?;
        let html = self.renderer.render(&post.content);
        let toc = generate_toc(&post.content);

        Some(RenderedPost {
            meta: post.meta,
            content: html,
            reading_time: post.reading_time,
            toc: Some(toc),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site_with_post(frontmatter: &str, body: &str) -> tempfile::TempDir {
        let tmp = tempfile::TempDir::new().unwrap();
        let posts_dir = tmp.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("first-post.md"),
            format!("---\n{}---\n\n{}", frontmatter, body),
        )
        .unwrap();
        tmp
    }

    #[test]
    fn test_rendered_post_pipeline() {
        let tmp = site_with_post(
            "title: First Post\ndate: 2024-01-15\nexcerpt: The very first\ntags: [rust]\n",
            "# Intro\n\nSome text.\n\n## Details\n\nMore text.\n",
        );

        let blog = Blog::new(tmp.path()).unwrap();
        let rendered = blog.rendered_post("first-post").unwrap();

        assert_eq!(rendered.meta.title, "First Post");
        assert!(rendered.content.contains(r#"<h1 id="intro">"#));
        assert!(rendered.content.contains("<p>Some text.</p>"));

        let toc = rendered.toc.unwrap();
        assert_eq!(toc.items.len(), 2);
        assert_eq!(toc.items[0].url, "#intro");
        assert_eq!(toc.items[1].url, "#details");
    }

    #[test]
    fn test_toc_anchors_match_rendered_heading_ids() {
        let tmp = site_with_post(
            "title: Anchors\ndate: 2024-01-15\nexcerpt: E\n",
            "## Hello, World!\n\nBody.\n",
        );

        let blog = Blog::new(tmp.path()).unwrap();
        let rendered = blog.rendered_post("first-post").unwrap();
        let anchor = &rendered.toc.unwrap().items[0].url;

        assert_eq!(anchor, "#hello-world");
        let id = anchor.trim_start_matches('#');
        assert!(rendered.content.contains(&format!(r#"id="{}""#, id)));
    }

    #[test]
    fn test_missing_post_is_none() {
        let tmp = tempfile::TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        assert!(blog.rendered_post("nope").is_none());
        assert!(blog.posts().unwrap().is_empty());
    }

    #[test]
    fn test_config_source_dir_is_respected() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join("blog.yml"), "source_dir: writing\n").unwrap();
        let posts_dir = tmp.path().join("writing");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("note.md"),
            "---\ntitle: Note\ndate: 2024-02-01\nexcerpt: E\n---\n\nBody\n",
        )
        .unwrap();

        let blog = Blog::new(tmp.path()).unwrap();
        let posts = blog.posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "note");
    }
}
