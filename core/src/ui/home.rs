//! The two home-screen views: the category grid and the
//! continue-reading card.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use log::{debug, warn};

use crate::bmp;
use crate::fs::{Storage, VOLUME_HOME};
use crate::i18n::{Lang, StringId, tr};
use crate::icons::{Icon, icon_mask};
use crate::recent::{RecentBook, basename, cover_thumb_path, file_ext_lower};
use crate::render::{FontId, FontStyle, Renderer, Shade};

use super::geom::Rect;

// Grid layout
const GRID_COLS: i32 = 2;
const TILE_HEIGHT: i32 = 120;
const TILE_GAP: i32 = 12;
const ICON_SIZE: i32 = 32;

const CARD_RADIUS: i32 = 10;
const CARD_PADDING: i32 = 12;

/// Theme metrics shared by the home views.
#[derive(Clone, Copy, Debug)]
pub struct Metrics {
    pub content_side_padding: i32,
    pub home_cover_height: i32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            content_side_padding: 24,
            home_cover_height: 120,
        }
    }
}

/// Cover-render gate. Owned by the caller and carried across partial
/// redraws of the same card so the thumbnail is loaded only once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoverState {
    pub cover_rendered: bool,
    pub cover_buffer_stored: bool,
}

pub struct RecentCardContext<'a, S: Storage> {
    pub storage: &'a S,
    pub lang: Lang,
    pub metrics: Metrics,
}

/// Home category menu: `button_count` tiles in a fixed two-column grid,
/// each with a centered icon and label. The selected tile gets the gray
/// fill; labels are the caller's problem to keep short.
pub fn draw_button_menu<R: Renderer>(
    renderer: &mut R,
    metrics: &Metrics,
    rect: Rect,
    button_count: usize,
    selected_index: usize,
    button_label: impl Fn(usize) -> String,
    button_icon: impl Fn(usize) -> Icon,
) {
    let side_pad = metrics.content_side_padding;
    let x0 = rect.x + side_pad;
    let w0 = rect.w - side_pad * 2;
    let tile_w = (w0 - TILE_GAP) / GRID_COLS;

    for i in 0..button_count {
        let row = i as i32 / GRID_COLS;
        let col = i as i32 % GRID_COLS;
        let x = x0 + col * (tile_w + TILE_GAP);
        let y = rect.y + row * (TILE_HEIGHT + TILE_GAP);

        let fill = if i == selected_index {
            Shade::LightGray
        } else {
            Shade::White
        };
        renderer.fill_rounded_rect(x, y, tile_w, TILE_HEIGHT, CARD_RADIUS, fill);
        renderer.draw_rounded_rect(x, y, tile_w, TILE_HEIGHT, 1, CARD_RADIUS);

        if let Some(mask) = icon_mask(button_icon(i), ICON_SIZE) {
            renderer.draw_icon(
                mask,
                x + (tile_w - ICON_SIZE) / 2,
                y + CARD_PADDING,
                ICON_SIZE,
                ICON_SIZE,
            );
        }

        let label = button_label(i);
        let tw = renderer.text_width(FontId::Heading, &label, FontStyle::Regular);
        renderer.draw_text(
            FontId::Heading,
            x + (tile_w - tw) / 2,
            y + CARD_PADDING + ICON_SIZE + 8,
            &label,
            FontStyle::Regular,
        );
    }
}

/// Continue-reading card for the first entry of `recent_books`. The cover
/// thumbnail is loaded and drawn only while `state.cover_rendered` is
/// unset; title, author and the file metadata line are redrawn every call.
pub fn draw_recent_book_card<R: Renderer, S: Storage>(
    renderer: &mut R,
    ctx: &RecentCardContext<'_, S>,
    rect: Rect,
    recent_books: &[RecentBook],
    selected: bool,
    state: &mut CoverState,
    store_cover_buffer: impl FnOnce() -> bool,
) {
    let side_pad = ctx.metrics.content_side_padding;
    let x = rect.x + side_pad;
    let y = rect.y;
    let w = rect.w - side_pad * 2;
    let h = rect.h;

    let fill = if selected {
        Shade::LightGray
    } else {
        Shade::White
    };
    renderer.fill_rounded_rect(x, y, w, h, CARD_RADIUS, fill);
    renderer.draw_rounded_rect(x, y, w, h, 1, CARD_RADIUS);

    renderer.draw_text(
        FontId::Body,
        x + CARD_PADDING,
        y + 8,
        tr(ctx.lang, StringId::ContinueReading),
        FontStyle::Regular,
    );

    let Some(book) = recent_books.first() else {
        renderer.draw_text(
            FontId::Heading,
            x + CARD_PADDING,
            y + h / 2,
            tr(ctx.lang, StringId::NoOpenBook),
            FontStyle::Bold,
        );
        return;
    };

    let cover_h = ctx.metrics.home_cover_height;
    let cover_w = cover_h * 6 / 10;
    let cover_x = x + CARD_PADDING;
    let cover_y = y + 28;

    if !state.cover_rendered {
        let has_cover = !book.cover_bmp_path.is_empty()
            && draw_cover_thumb(
                renderer,
                ctx.storage,
                &book.cover_bmp_path,
                cover_x,
                cover_y,
                cover_w,
                cover_h,
            );

        // frame
        renderer.draw_rect(cover_x, cover_y, cover_w, cover_h);

        if !has_cover {
            renderer.fill_rect(
                cover_x,
                cover_y + cover_h / 3,
                cover_w,
                2 * cover_h / 3,
                Shade::LightGray,
            );
            if let Some(mask) = icon_mask(Icon::Cover, ICON_SIZE) {
                renderer.draw_icon(mask, cover_x + 24, cover_y + 24, ICON_SIZE, ICON_SIZE);
            }
        }

        // Gate even after a failed load: no retry on every redraw.
        state.cover_buffer_stored = store_cover_buffer();
        state.cover_rendered = true;
    }

    let text_x = cover_x + cover_w + 16;
    let mut text_y = cover_y + 8;
    let text_w = x + w - text_x - CARD_PADDING;

    let title = renderer.truncated_text(FontId::Heading, &book.title, text_w, FontStyle::Bold);
    renderer.draw_text(FontId::Heading, text_x, text_y, &title, FontStyle::Bold);
    text_y += renderer.line_height(FontId::Heading) + 4;

    if !book.author.is_empty() {
        let author = renderer.truncated_text(FontId::Body, &book.author, text_w, FontStyle::Regular);
        renderer.draw_text(FontId::Body, text_x, text_y, &author, FontStyle::Regular);
        text_y += renderer.line_height(FontId::Body) + 6;
    }

    let ext = file_ext_lower(&book.path);
    let meta = if ext.is_empty() {
        String::from(basename(&book.path))
    } else {
        format!(".{ext} · {}", basename(&book.path))
    };
    let meta = renderer.truncated_text(FontId::Small, &meta, text_w, FontStyle::Regular);
    renderer.draw_text(FontId::Small, text_x, text_y, &meta, FontStyle::Regular);
}

fn draw_cover_thumb<R: Renderer, S: Storage>(
    renderer: &mut R,
    storage: &S,
    cover_path: &str,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
) -> bool {
    let thumb = cover_thumb_path(cover_path, h);
    let mut file = match storage.open_read(VOLUME_HOME, &thumb) {
        Ok(file) => file,
        Err(_) => {
            debug!("no cover thumbnail at {thumb}");
            return false;
        }
    };
    match bmp::decode(&mut file) {
        Ok(image) => {
            renderer.draw_bitmap(&image, x, y, w, h);
            true
        }
        Err(err) => {
            warn!("cover thumbnail {thumb} failed to decode: {err:?}");
            false
        }
    }
}
