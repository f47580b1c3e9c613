//! Post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::toc::TableOfContents;

/// Post author information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    pub name: String,

    /// Avatar image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Short biography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "Anonymous".to_string(),
            avatar: None,
            bio: None,
        }
    }
}

/// Metadata for a single post, used by listing pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMetadata {
    /// URL-safe identifier, derived from the file name
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date, serialized as an ISO-8601 timestamp
    pub date: DateTime<Utc>,

    /// Short preview text
    pub excerpt: String,

    /// Author information
    pub author: Author,

    /// Post tags, in source order
    pub tags: Vec<String>,

    /// Whether the post is featured on the front page
    pub featured: bool,
}

impl PostMetadata {
    /// Get the previous post in a listing
    pub fn prev<'a>(&self, posts: &'a [PostMetadata]) -> Option<&'a PostMetadata> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next post in a listing
    pub fn next<'a>(&self, posts: &'a [PostMetadata]) -> Option<&'a PostMetadata> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        if pos < posts.len() - 1 {
            Some(&posts[pos + 1])
        } else {
            None
        }
    }

    /// Get up to `limit` other posts sharing at least one tag with this one,
    /// preserving the listing order
    pub fn related<'a>(&self, posts: &'a [PostMetadata], limit: usize) -> Vec<&'a PostMetadata> {
        posts
            .iter()
            .filter(|p| p.slug != self.slug)
            .filter(|p| p.tags.iter().any(|t| self.tags.contains(t)))
            .take(limit)
            .collect()
    }
}

/// A complete post with its raw markdown body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullPost {
    /// Post metadata
    #[serde(flatten)]
    pub meta: PostMetadata,

    /// Raw markdown body, not yet rendered
    pub content: String,

    /// Estimated reading time, e.g. "3 min read"
    pub reading_time: String,
}

/// A post whose body has been rendered to HTML for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedPost {
    /// Post metadata
    #[serde(flatten)]
    pub meta: PostMetadata,

    /// Rendered HTML body
    pub content: String,

    /// Estimated reading time, e.g. "3 min read"
    pub reading_time: String,

    /// Table of contents extracted from the raw body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<TableOfContents>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(slug: &str, tags: &[&str]) -> PostMetadata {
        PostMetadata {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            excerpt: "excerpt".to_string(),
            author: Author::default(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured: false,
        }
    }

    #[test]
    fn test_prev_next() {
        let posts = vec![post("a", &[]), post("b", &[]), post("c", &[])];
        assert_eq!(posts[1].prev(&posts).unwrap().slug, "a");
        assert_eq!(posts[1].next(&posts).unwrap().slug, "c");
        assert!(posts[0].prev(&posts).is_none());
        assert!(posts[2].next(&posts).is_none());
    }

    #[test]
    fn test_related_shares_tag_and_respects_limit() {
        let posts = vec![
            post("a", &["rust", "blog"]),
            post("b", &["rust"]),
            post("c", &["cooking"]),
            post("d", &["blog"]),
        ];
        let related = posts[0].related(&posts, 3);
        let slugs: Vec<_> = related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "d"]);

        let capped = posts[0].related(&posts, 1);
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].slug, "b");
    }

    #[test]
    fn test_author_defaults_to_anonymous() {
        assert_eq!(Author::default().name, "Anonymous");
    }
}
