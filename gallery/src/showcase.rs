use catalog::{Catalog, MediaItem};
use std::collections::HashMap;
use std::sync::Arc;

pub const SHOWCASE_PAGE_SIZE: usize = 6;

/// Playback state of one card in the video grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoCard {
    pub playing: bool,
    pub muted: bool,
    pub position_secs: f64,
}

impl Default for VideoCard {
    fn default() -> Self {
        Self {
            playing: false,
            muted: true,
            position_secs: 0.0,
        }
    }
}

impl VideoCard {
    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn hover_enter(&mut self) {
        self.playing = true;
    }

    /// Pause and rewind.
    pub fn hover_leave(&mut self) {
        self.playing = false;
        self.position_secs = 0.0;
    }

    pub fn seek(&mut self, secs: f64) {
        self.position_secs = secs.max(0.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseMessage {
    LoadMore,
    TogglePlay(u32),
    ToggleMute(u32),
    HoverEnter(u32),
    HoverLeave(u32),
}

/// Video-only grid with its own pager.
#[derive(Debug)]
pub struct ShowcaseController {
    catalog: Arc<Catalog>,
    visible_count: usize,
    cards: HashMap<u32, VideoCard>,
}

impl ShowcaseController {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            visible_count: SHOWCASE_PAGE_SIZE,
            cards: HashMap::new(),
        }
    }

    pub fn videos(&self) -> Vec<&MediaItem> {
        self.catalog.videos().collect()
    }

    pub fn visible(&self) -> Vec<&MediaItem> {
        self.catalog.videos().take(self.visible_count).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count.min(self.catalog.videos().count())
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.catalog.videos().count()
    }

    pub fn load_more(&mut self) {
        let total = self.catalog.videos().count();
        if self.visible_count >= total {
            return;
        }
        self.visible_count = (self.visible_count + SHOWCASE_PAGE_SIZE).min(total);
    }

    pub fn card(&self, id: u32) -> Option<VideoCard> {
        self.is_video(id)
            .then(|| self.cards.get(&id).copied().unwrap_or_default())
    }

    pub fn card_mut(&mut self, id: u32) -> Option<&mut VideoCard> {
        if !self.is_video(id) {
            return None;
        }
        Some(self.cards.entry(id).or_default())
    }

    fn is_video(&self, id: u32) -> bool {
        self.catalog.get(id).is_some_and(MediaItem::is_video)
    }

    pub fn update(&mut self, message: ShowcaseMessage) {
        let (id, apply): (u32, fn(&mut VideoCard)) = match message {
            ShowcaseMessage::LoadMore => {
                self.load_more();
                return;
            }
            ShowcaseMessage::TogglePlay(id) => (id, VideoCard::toggle_play),
            ShowcaseMessage::ToggleMute(id) => (id, VideoCard::toggle_mute),
            ShowcaseMessage::HoverEnter(id) => (id, VideoCard::hover_enter),
            ShowcaseMessage::HoverLeave(id) => (id, VideoCard::hover_leave),
        };
        match self.card_mut(id) {
            Some(card) => apply(card),
            None => tracing::debug!(id, "Ignoring showcase event for non-video item"),
        }
    }
}
