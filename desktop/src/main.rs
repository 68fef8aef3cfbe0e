use std::fs;
use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::BinaryColor;
use minifb::Key;

use quill_core::display::{Display, RefreshMode};
use quill_core::framebuffer::{Framebuffer, HEIGHT, WIDTH};
use quill_core::i18n::{Lang, StringId, tr};
use quill_core::icons::Icon;
use quill_core::recent::{RecentBook, file_ext_lower};
use quill_core::render::{FbRenderer, FontId, FontStyle, Renderer};
use quill_core::ui::{
    CoverState, Metrics, Rect, RecentCardContext, draw_button_menu, draw_recent_book_card,
};

use crate::display::MinifbDisplay;
use crate::storage::FsStorage;

mod display;
mod storage;

const CATEGORIES: [(StringId, Icon); 6] = [
    (StringId::Library, Icon::Library),
    (StringId::Recent, Icon::Recent),
    (StringId::Files, Icon::Folder),
    (StringId::Transfer, Icon::Transfer),
    (StringId::Wifi, Icon::Wifi),
    (StringId::Settings, Icon::Settings),
];

const GRID_RECT: Rect = Rect::new(0, 48, 480, 420);
const CARD_RECT: Rect = Rect::new(0, 520, 480, 220);

/// Cover pixels saved once so partial redraws can skip the BMP decode.
struct CoverCache {
    region: Rect,
    pixels: Vec<BinaryColor>,
}

impl CoverCache {
    fn new(region: Rect) -> Self {
        Self {
            region,
            pixels: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn store(&mut self, fb: &Framebuffer) {
        self.pixels.clear();
        for dy in 0..self.region.h {
            for dx in 0..self.region.w {
                if let Some(color) = fb.pixel(self.region.x + dx, self.region.y + dy) {
                    self.pixels.push(color);
                }
            }
        }
    }

    fn restore(&self, fb: &mut Framebuffer) {
        if self.pixels.len() != (self.region.w * self.region.h) as usize {
            return;
        }
        for dy in 0..self.region.h {
            for dx in 0..self.region.w {
                let color = self.pixels[(dy * self.region.w + dx) as usize];
                fb.set_pixel(self.region.x + dx, self.region.y + dy, color);
            }
        }
    }
}

/// Matches the cover box the continue-reading card draws into.
fn cover_region(card: Rect, metrics: &Metrics) -> Rect {
    Rect::new(
        card.x + metrics.content_side_padding + 12,
        card.y + 28,
        metrics.home_cover_height * 6 / 10,
        metrics.home_cover_height,
    )
}

fn sample_recents(root: &Path) -> Vec<RecentBook> {
    let mut books = Vec::new();
    if let Ok(entries) = fs::read_dir(root.join("books")) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !matches!(file_ext_lower(name).as_str(), "epub" | "txt") {
                continue;
            }
            let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);
            books.push(RecentBook {
                title: stem.replace(['-', '_'], " "),
                author: String::new(),
                path: format!("books/{name}"),
                cover_bmp_path: format!("covers/{stem}.bmp"),
            });
        }
    }
    books.sort_by(|a, b| a.title.cmp(&b.title));
    if books.is_empty() {
        books.push(RecentBook {
            title: "The Time Machine".into(),
            author: "H. G. Wells".into(),
            path: "books/the-time-machine.epub".into(),
            cover_bmp_path: String::new(),
        });
    }
    books
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    log::info!("Quill desktop home screen, library root {}", root.display());

    let storage = FsStorage::new(root.clone());
    let recents = sample_recents(&root);

    let mut window = minifb::Window::new(
        "Quill Desktop",
        WIDTH,
        HEIGHT,
        minifb::WindowOptions::default(),
    )
    .unwrap_or_else(|e| {
        panic!("Unable to open window: {}", e);
    });
    window.set_target_fps(60);
    let mut display = MinifbDisplay::new(window);

    let mut fb = Box::new(Framebuffer::new());
    let metrics = Metrics::default();
    let mut lang = Lang::En;
    let mut selected = 0usize;
    let mut cover_state = CoverState::default();
    let mut cover_cache = CoverCache::new(cover_region(CARD_RECT, &metrics));

    let mut first = true;
    let mut dirty = true;
    while display.is_open() {
        if display.key_pressed(Key::Left) && selected % 2 == 1 {
            selected -= 1;
            dirty = true;
        }
        if display.key_pressed(Key::Right) && selected % 2 == 0 && selected + 1 < CATEGORIES.len() {
            selected += 1;
            dirty = true;
        }
        if display.key_pressed(Key::Up) && selected >= 2 {
            selected -= 2;
            dirty = true;
        }
        if display.key_pressed(Key::Down) && selected + 2 < CATEGORIES.len() {
            selected += 2;
            dirty = true;
        }
        if display.key_pressed(Key::L) {
            lang = match lang {
                Lang::En => Lang::Es,
                Lang::Es => Lang::En,
            };
            dirty = true;
        }
        if display.key_pressed(Key::Enter) {
            log::info!("opening {}", tr(lang, CATEGORIES[selected].0));
        }

        if dirty {
            fb.clear_screen();
            let mut renderer = FbRenderer::new(&mut fb);
            renderer.draw_text(FontId::Heading, 24, 14, "Quill", FontStyle::Bold);
            draw_button_menu(
                &mut renderer,
                &metrics,
                GRID_RECT,
                CATEGORIES.len(),
                selected,
                |i| tr(lang, CATEGORIES[i].0).into(),
                |i| CATEGORIES[i].1,
            );
            let ctx = RecentCardContext {
                storage: &storage,
                lang,
                metrics,
            };
            draw_recent_book_card(
                &mut renderer,
                &ctx,
                CARD_RECT,
                &recents,
                false,
                &mut cover_state,
                || true,
            );
            if cover_state.cover_buffer_stored && cover_cache.is_empty() {
                cover_cache.store(&fb);
            } else if cover_state.cover_rendered && !cover_cache.is_empty() {
                cover_cache.restore(&mut fb);
            }
            dirty = false;
        }

        let mode = if first {
            RefreshMode::Full
        } else {
            RefreshMode::Fast
        };
        display.flush(&fb, mode);
        first = false;
    }
}
