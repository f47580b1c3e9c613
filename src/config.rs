//! Site configuration (blog.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Site title
    pub title: String,

    /// Site description
    pub description: String,

    /// Default site author
    pub author: String,

    /// Base URL of the published site
    pub url: String,

    /// Directory holding post markdown files, relative to the base dir
    pub source_dir: String,

    /// Code highlighting settings
    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Code highlighting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Syntect theme name
    pub theme: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "A Blog".to_string(),
            description: String::new(),
            author: String::new(),
            url: "http://example.com".to_string(),
            source_dir: "content/posts".to_string(),
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: BlogConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BlogConfig::default();
        assert_eq!(config.source_dir, "content/posts");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_load_partial_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("blog.yml");
        fs::write(&path, "title: My Blog\nsource_dir: posts\n").unwrap();

        let config = BlogConfig::load(&path).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.source_dir, "posts");
        // Absent keys fall back to defaults
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_unknown_keys_retained() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("blog.yml");
        fs::write(&path, "title: My Blog\nanalytics_id: UA-123\n").unwrap();

        let config = BlogConfig::load(&path).unwrap();
        assert!(config.extra.contains_key("analytics_id"));
    }
}
