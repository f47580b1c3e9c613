//! Content loading errors

use thiserror::Error;

/// Errors surfaced while loading a full post listing.
///
/// Every variant names the offending slug; a listing either returns all
/// posts or fails with one of these, never a partial result.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("post `{slug}` is missing required field `{field}`")]
    MissingField { slug: String, field: &'static str },

    #[error("post `{slug}` has an unparseable date `{value}`")]
    InvalidDate { slug: String, value: String },

    #[error("duplicate slug `{slug}`: two content files map to the same post")]
    DuplicateSlug { slug: String },

    #[error("failed to read post `{slug}`")]
    Read {
        slug: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front-matter in post `{slug}`: {reason}")]
    Frontmatter { slug: String, reason: String },
}
