//! Static media catalog for the portfolio gallery.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

const BUILTIN_ITEMS: &str = include_str!("../data/items.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse Error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate media item id: {0}")]
    DuplicateId(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Logo,
    Banner,
    Emotes,
    VTubers,
    #[serde(rename = "3D Animation")]
    Animation3D,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Logo,
        Category::Banner,
        Category::Emotes,
        Category::VTubers,
        Category::Animation3D,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Logo => "Logo",
            Category::Banner => "Banner",
            Category::Emotes => "Emotes",
            Category::VTubers => "VTubers",
            Category::Animation3D => "3D Animation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .or_else(|| match wanted.to_ascii_lowercase().as_str() {
                "3d" | "animation" | "3d-animation" => Some(Category::Animation3D),
                "vtuber" => Some(Category::VTubers),
                _ => None,
            })
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u32,
    pub src: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub category: Category,
}

impl MediaItem {
    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }
}

/// Ordered, immutable list of media items. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MediaItem>,
}

impl Catalog {
    pub fn new(items: Vec<MediaItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }
        tracing::debug!(items = items.len(), "Catalog constructed");
        Ok(Self { items })
    }

    /// The catalog bundled with the site.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_ITEMS)
    }

    pub fn from_json_str(data: &str) -> Result<Self, CatalogError> {
        let items: Vec<MediaItem> = serde_json::from_str(data)?;
        Self::new(items)
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument)]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&data)?;
        tracing::info!("Loaded {} media items from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MediaItem> {
        self.items.iter()
    }

    pub fn get(&self, id: u32) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn videos(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(|item| item.is_video())
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.items.iter().filter(|item| item.category == category).count()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MediaItem;
    type IntoIter = std::slice::Iter<'a, MediaItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
