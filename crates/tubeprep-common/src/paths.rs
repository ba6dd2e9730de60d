//! File categories and the category-extension table.
//!
//! Every file that carries a video identifier is assigned to exactly one
//! [`Category`] by suffix matching against a [`CategoryTable`]. The table is
//! configurable, but its default is the layout produced by yt-dlp downloads.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Category of a file belonging to a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Primary audio/video container.
    Media,
    /// Structured sidecar description (`.info.json`).
    Metadata,
    /// Raster thumbnail.
    Thumb,
    /// Sidecar subtitle file.
    Subtitle,
    /// Plain-text description.
    Description,
}

impl Category {
    /// All categories, in matching order.
    pub const ALL: [Category; 5] = [
        Category::Media,
        Category::Metadata,
        Category::Thumb,
        Category::Subtitle,
        Category::Description,
    ];

    /// Lowercase name used in config files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Media => "media",
            Category::Metadata => "metadata",
            Category::Thumb => "thumb",
            Category::Subtitle => "subtitle",
            Category::Description => "description",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from file category to the filename suffixes that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    #[serde(default = "default_media")]
    pub media: Vec<String>,
    #[serde(default = "default_metadata")]
    pub metadata: Vec<String>,
    #[serde(default = "default_thumb")]
    pub thumb: Vec<String>,
    #[serde(default = "default_subtitle")]
    pub subtitle: Vec<String>,
    #[serde(default = "default_description")]
    pub description: Vec<String>,
}

fn to_owned_list(exts: &[&str]) -> Vec<String> {
    exts.iter().map(|s| s.to_string()).collect()
}

fn default_media() -> Vec<String> {
    to_owned_list(&[".mkv", ".webm", ".mp4"])
}

fn default_metadata() -> Vec<String> {
    to_owned_list(&[".info.json"])
}

fn default_thumb() -> Vec<String> {
    to_owned_list(&[".jpg", ".png", ".webp"])
}

fn default_subtitle() -> Vec<String> {
    to_owned_list(&[".vtt"])
}

fn default_description() -> Vec<String> {
    to_owned_list(&[".description"])
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            media: default_media(),
            metadata: default_metadata(),
            thumb: default_thumb(),
            subtitle: default_subtitle(),
            description: default_description(),
        }
    }
}

impl CategoryTable {
    /// Suffixes configured for a category.
    pub fn extensions(&self, category: Category) -> &[String] {
        match category {
            Category::Media => &self.media,
            Category::Metadata => &self.metadata,
            Category::Thumb => &self.thumb,
            Category::Subtitle => &self.subtitle,
            Category::Description => &self.description,
        }
    }

    /// Assign a filename to a category by suffix.
    ///
    /// Suffixes compare ASCII case-insensitively. When several categories
    /// match, the first in [`Category::ALL`] order wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use tubeprep_common::{Category, CategoryTable};
    ///
    /// let table = CategoryTable::default();
    /// assert_eq!(table.categorize("a [abcdefghij1].webm"), Some(Category::Media));
    /// assert_eq!(table.categorize("a [abcdefghij1].en.vtt"), Some(Category::Subtitle));
    /// assert_eq!(table.categorize("a [abcdefghij1].txt"), None);
    /// ```
    pub fn categorize(&self, file_name: &str) -> Option<Category> {
        let lower = file_name.to_ascii_lowercase();
        Category::ALL.into_iter().find(|&category| {
            self.extensions(category)
                .iter()
                .any(|ext| lower.ends_with(&ext.to_ascii_lowercase()))
        })
    }

    /// Check that every suffix starts with a dot and media suffixes exist.
    pub fn validate(&self) -> Result<()> {
        if self.media.is_empty() {
            return Err(Error::invalid_input("no media extensions configured"));
        }

        for category in Category::ALL {
            for ext in self.extensions(category) {
                if !ext.starts_with('.') || ext.len() < 2 {
                    return Err(Error::invalid_extension(category.as_str(), ext.as_str()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = CategoryTable::default();
        assert_eq!(table.media, vec![".mkv", ".webm", ".mp4"]);
        assert_eq!(table.metadata, vec![".info.json"]);
        assert_eq!(table.thumb, vec![".jpg", ".png", ".webp"]);
        assert_eq!(table.subtitle, vec![".vtt"]);
        assert_eq!(table.description, vec![".description"]);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_categorize() {
        let table = CategoryTable::default();
        assert_eq!(table.categorize("x.mkv"), Some(Category::Media));
        assert_eq!(table.categorize("x.mp4"), Some(Category::Media));
        assert_eq!(table.categorize("x.info.json"), Some(Category::Metadata));
        assert_eq!(table.categorize("x.json"), None);
        assert_eq!(table.categorize("x.png"), Some(Category::Thumb));
        assert_eq!(table.categorize("x.webp"), Some(Category::Thumb));
        assert_eq!(table.categorize("x.de.vtt"), Some(Category::Subtitle));
        assert_eq!(table.categorize("x.description"), Some(Category::Description));
        assert_eq!(table.categorize("x.part"), None);
    }

    #[test]
    fn test_categorize_is_case_insensitive() {
        let table = CategoryTable::default();
        assert_eq!(table.categorize("x.MKV"), Some(Category::Media));
        assert_eq!(table.categorize("x.Info.JSON"), Some(Category::Metadata));
    }

    #[test]
    fn test_validate_rejects_missing_dot() {
        let table = CategoryTable {
            thumb: vec!["jpg".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            table.validate(),
            Err(Error::InvalidExtension { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_media() {
        let table = CategoryTable {
            media: Vec::new(),
            ..Default::default()
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Media.to_string(), "media");
        assert_eq!(Category::Description.to_string(), "description");
    }
}
