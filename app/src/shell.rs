//! Terminal page shell: mounts the access gate, then drives the gallery.

use access::{AccessController, AccessError, QueryParams, SessionStore};
use catalog::{Catalog, MediaItem, MediaType};
use gallery::{Filter, GalleryController, LightboxKey, Message, ShowcaseController, ShowcaseMessage};
use std::io::{self, Write};
use std::sync::Arc;

pub const HELP: &str = "\
Commands:
  unlock <code>        enter the access code
  status               show gate and gallery state
  category <name|All>  filter the gallery
  more                 load more gallery items
  list                 list visible gallery items
  open <id>            open the lightbox
  next | prev | close  navigate the lightbox
  key <name>           send Escape, ArrowLeft or ArrowRight to the lightbox
  showcase [more]      list visible videos
  play <id> | mute <id>
  help | quit";

pub const RESTRICTED: &str =
    "Restricted Access: please enter the access code to view this portfolio.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<S, Q> {
    gate: AccessController<S, Q>,
    gallery: GalleryController,
    showcase: ShowcaseController,
}

impl<S: SessionStore, Q: QueryParams> Shell<S, Q> {
    /// Mount the gate; the gallery only renders once it reports unlocked.
    pub fn mount(mut gate: AccessController<S, Q>, catalog: Arc<Catalog>) -> Self {
        gate.mount();
        Self {
            gate,
            gallery: GalleryController::new(catalog.clone()),
            showcase: ShowcaseController::new(catalog),
        }
    }

    pub fn gate(&self) -> &AccessController<S, Q> {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut AccessController<S, Q> {
        &mut self.gate
    }

    pub fn gallery_mut(&mut self) -> &mut GalleryController {
        &mut self.gallery
    }

    pub fn showcase_mut(&mut self) -> &mut ShowcaseController {
        &mut self.showcase
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }

    pub fn unlock(&mut self, code: &str) -> Result<(), AccessError> {
        self.gate.set_pending_code(code);
        self.gate.submit_pending().map(|_| ())
    }

    pub fn render_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let catalog = self.gallery.catalog();
        writeln!(
            out,
            "Gate: {}",
            if self.gate.is_unlocked() { "unlocked" } else { "locked" }
        )?;
        if self.gate.last_error() {
            writeln!(out, "Invalid Access Code")?;
        }
        writeln!(
            out,
            "Catalog: {} items ({} videos)",
            catalog.len(),
            catalog.videos().count()
        )?;
        if self.gate.is_unlocked() {
            writeln!(
                out,
                "Category: {} | showing {} of {}",
                self.gallery.active_category(),
                self.gallery.visible_count(),
                self.gallery.filtered_items().len()
            )?;
        }
        Ok(())
    }

    pub fn render_gallery<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Gallery [{}]", self.gallery.active_category())?;
        for item in self.gallery.visible_items() {
            writeln!(out, "{}", item_line(item))?;
        }
        writeln!(
            out,
            "Showing {} of {}",
            self.gallery.visible_count(),
            self.gallery.filtered_items().len()
        )?;
        if self.gallery.has_more() {
            writeln!(out, "(more available)")?;
        }
        Ok(())
    }

    pub fn render_lightbox<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.gallery.selected() {
            Some(item) => writeln!(out, "Lightbox: {}", item_line(item)),
            None => writeln!(out, "Lightbox closed"),
        }
    }

    pub fn render_showcase<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Motion Showcase")?;
        for video in self.showcase.visible() {
            let card = self.showcase.card(video.id).unwrap_or_default();
            writeln!(
                out,
                "{} [{}{}]",
                item_line(video),
                if card.playing { "playing" } else { "paused" },
                if card.muted { ", muted" } else { "" }
            )?;
        }
        if self.showcase.has_more() {
            writeln!(out, "(more available)")?;
        }
        Ok(())
    }

    /// Run one shell line.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Flow::Continue);
        };
        let rest: Vec<&str> = parts.collect();
        let arg = rest.join(" ");

        match command {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => writeln!(out, "{}", HELP)?,
            "status" => self.render_status(out)?,
            "unlock" => match self.unlock(&arg) {
                Ok(()) => writeln!(out, "Portfolio unlocked")?,
                Err(AccessError::InvalidCode) => writeln!(out, "Invalid Access Code")?,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to persist session");
                    writeln!(out, "Error: {}", e)?;
                }
            },
            _ if !self.gate.is_unlocked() => writeln!(out, "{}", RESTRICTED)?,
            "category" => match arg.parse::<Filter>() {
                Ok(filter) => {
                    self.gallery.update(Message::SelectCategory(filter));
                    self.render_gallery(out)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            "more" => {
                self.gallery.update(Message::LoadMore);
                self.render_gallery(out)?;
            }
            "list" => self.render_gallery(out)?,
            "open" => match arg.parse::<u32>() {
                Ok(id) if self.gallery.open_id(id) => self.render_lightbox(out)?,
                _ => writeln!(out, "No media item with id {:?}", arg)?,
            },
            "next" | "prev" | "close" => {
                let message = match command {
                    "next" => Message::Next,
                    "prev" => Message::Prev,
                    _ => Message::Close,
                };
                self.gallery.update(message);
                self.render_lightbox(out)?;
            }
            "key" => match arg.parse::<LightboxKey>() {
                Ok(key) => {
                    self.gallery.update(Message::Key(key));
                    self.render_lightbox(out)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            "showcase" => {
                if arg == "more" {
                    self.showcase.update(ShowcaseMessage::LoadMore);
                }
                self.render_showcase(out)?;
            }
            "play" | "mute" => match arg.parse::<u32>() {
                Ok(id) if self.showcase.card(id).is_some() => {
                    let message = if command == "play" {
                        ShowcaseMessage::TogglePlay(id)
                    } else {
                        ShowcaseMessage::ToggleMute(id)
                    };
                    self.showcase.update(message);
                    self.render_showcase(out)?;
                }
                _ => writeln!(out, "No video with id {:?}", arg)?,
            },
            other => writeln!(out, "Unknown command: {} (try `help`)", other)?,
        }
        Ok(Flow::Continue)
    }
}

pub fn item_line(item: &MediaItem) -> String {
    let kind = match item.media_type {
        MediaType::Image => "image",
        MediaType::Video => "video",
    };
    format!("{:>4}  {:<12}  {:<5}  {}", item.id, item.category.label(), kind, item.src)
}
