//! Gallery state for the portfolio: category filter, pagination and the
//! lightbox selection over a static catalog.

mod lightbox;
mod showcase;

pub use lightbox::{LightboxKey, UnboundKey};
pub use showcase::{ShowcaseController, ShowcaseMessage, VideoCard, SHOWCASE_PAGE_SIZE};

use catalog::{Catalog, Category, MediaItem, UnknownCategory};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Only(Category),
}

impl Filter {
    pub fn matches(&self, item: &MediaItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(category) => item.category == *category,
        }
    }
}

impl From<Category> for Filter {
    fn from(category: Category) -> Self {
        Filter::Only(category)
    }
}

impl FromStr for Filter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else {
            s.parse::<Category>().map(Filter::Only)
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "All"),
            Filter::Only(category) => write!(f, "{}", category),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    SelectCategory(Filter),
    LoadMore,
    Open(u32),
    Close,
    Next,
    Prev,
    Key(LightboxKey),
}

pub struct GalleryController {
    catalog: Arc<Catalog>,
    active: Filter,
    visible_count: usize,
    /// Id of the item shown in the lightbox, resolved against the catalog.
    selected: Option<u32>,
}

impl GalleryController {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            active: Filter::All,
            visible_count: PAGE_SIZE,
            selected: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn active_category(&self) -> Filter {
        self.active
    }

    /// Always resets pagination, even when the filter is unchanged.
    pub fn set_category(&mut self, filter: impl Into<Filter>) {
        self.active = filter.into();
        self.visible_count = PAGE_SIZE;
        tracing::debug!(category = %self.active, "Category selected");
    }

    pub fn filtered_items(&self) -> Vec<&MediaItem> {
        self.catalog.iter().filter(|item| self.active.matches(item)).collect()
    }

    fn filtered_len(&self) -> usize {
        self.catalog.iter().filter(|item| self.active.matches(item)).count()
    }

    pub fn visible_items(&self) -> Vec<&MediaItem> {
        self.catalog
            .iter()
            .filter(|item| self.active.matches(item))
            .take(self.visible_count)
            .collect()
    }

    /// Number of items currently shown; never more than the filtered length.
    pub fn visible_count(&self) -> usize {
        self.visible_items().len()
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.filtered_len()
    }

    pub fn load_more(&mut self) {
        let total = self.filtered_len();
        if self.visible_count >= total {
            return;
        }
        self.visible_count = (self.visible_count + PAGE_SIZE).min(total);
        tracing::debug!(visible = self.visible_count, total, "Loaded more items");
    }

    pub fn open(&mut self, item: &MediaItem) -> bool {
        self.open_id(item.id)
    }

    /// Open the lightbox on `id`. Ids not in the catalog are ignored.
    pub fn open_id(&mut self, id: u32) -> bool {
        if self.catalog.get(id).is_none() {
            tracing::warn!(id, "Ignoring open for unknown media item");
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected().is_some()
    }

    pub fn selected(&self) -> Option<&MediaItem> {
        self.selected.and_then(|id| self.catalog.get(id))
    }

    /// Step forward through the whole catalog, ignoring the active filter.
    pub fn next(&mut self) {
        self.step(true);
    }

    /// Step backward through the whole catalog, ignoring the active filter.
    pub fn prev(&mut self) {
        self.step(false);
    }

    fn step(&mut self, forward: bool) {
        let Some(id) = self.selected else {
            return;
        };
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let Some(index) = self.catalog.position(id) else {
            tracing::warn!(id, "Selected media item is no longer in the catalog");
            return;
        };
        let target = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.selected = Some(self.catalog.items()[target].id);
    }

    pub fn handle_key(&mut self, key: LightboxKey) {
        if self.selected.is_none() {
            return;
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::ArrowRight => self.next(),
            LightboxKey::ArrowLeft => self.prev(),
        }
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    pub fn update(&mut self, message: Message) {
        match message {
            Message::SelectCategory(filter) => self.set_category(filter),
            Message::LoadMore => self.load_more(),
            Message::Open(id) => {
                self.open_id(id);
            }
            Message::Close => self.close(),
            Message::Next => self.next(),
            Message::Prev => self.prev(),
            Message::Key(key) => self.handle_key(key),
        }
    }
}

impl fmt::Debug for GalleryController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryController")
            .field("active", &self.active)
            .field("visible_count", &self.visible_count)
            .field("selected", &self.selected)
            .finish()
    }
}
