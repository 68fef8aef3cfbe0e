extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::{
    Drawable,
    mono_font::{
        MonoFont, MonoTextStyle,
        iso_8859_1::{FONT_6X10, FONT_7X13, FONT_7X13_BOLD, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::{Point, Primitive, Size},
    primitives::{ContainsPoint, PrimitiveStyle, Rectangle, RoundedRectangle},
    text::{Baseline, Text},
};

use crate::framebuffer::Framebuffer;

/// 8-bit grayscale image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontId {
    Small,
    Body,
    Heading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    White,
    LightGray,
    Black,
}

/// Drawing capability set consumed by the home views. Coordinates are
/// pixels; text positions name the top-left of the first glyph cell.
pub trait Renderer {
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, shade: Shade);
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn fill_rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, shade: Shade);
    fn draw_rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, stroke: i32, radius: i32);
    fn draw_icon(&mut self, mask: &[u8], x: i32, y: i32, w: i32, h: i32);
    fn draw_bitmap(&mut self, image: &ImageData, x: i32, y: i32, w: i32, h: i32);
    fn draw_text(&mut self, font: FontId, x: i32, y: i32, text: &str, style: FontStyle);
    fn text_width(&self, font: FontId, text: &str, style: FontStyle) -> i32;
    fn line_height(&self, font: FontId) -> i32;

    /// Longest prefix of `text` that fits in `max_width`, with a trailing
    /// ellipsis when anything was cut. Empty when not even the ellipsis fits.
    fn truncated_text(&self, font: FontId, text: &str, max_width: i32, style: FontStyle) -> String {
        if self.text_width(font, text, style) <= max_width {
            return String::from(text);
        }
        const ELLIPSIS: &str = "...";
        let mut end = text.len();
        while end > 0 {
            end -= 1;
            while end > 0 && !text.is_char_boundary(end) {
                end -= 1;
            }
            let mut candidate = String::with_capacity(end + ELLIPSIS.len());
            candidate.push_str(&text[..end]);
            candidate.push_str(ELLIPSIS);
            if self.text_width(font, &candidate, style) <= max_width {
                return candidate;
            }
        }
        String::new()
    }
}

/// `Renderer` over the 1-bpp framebuffer using embedded-graphics mono
/// fonts and primitives.
pub struct FbRenderer<'a> {
    fb: &'a mut Framebuffer,
}

impl<'a> FbRenderer<'a> {
    pub fn new(fb: &'a mut Framebuffer) -> Self {
        Self { fb }
    }

    fn font(font: FontId, style: FontStyle) -> &'static MonoFont<'static> {
        match (font, style) {
            (FontId::Small, _) => &FONT_6X10,
            (FontId::Body, FontStyle::Regular) => &FONT_7X13,
            (FontId::Body, FontStyle::Bold) => &FONT_7X13_BOLD,
            (FontId::Heading, _) => &FONT_10X20,
        }
    }

    // Sparse checkerboard reads as light gray on the panel.
    fn shade_pixel(x: i32, y: i32, shade: Shade) -> BinaryColor {
        match shade {
            Shade::White => BinaryColor::On,
            Shade::Black => BinaryColor::Off,
            Shade::LightGray => {
                if x % 2 == 0 && y % 2 == 0 {
                    BinaryColor::Off
                } else {
                    BinaryColor::On
                }
            }
        }
    }
}

impl Renderer for FbRenderer<'_> {
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, shade: Shade) {
        if w <= 0 || h <= 0 {
            return;
        }
        for yy in y..y + h {
            for xx in x..x + w {
                self.fb.set_pixel(xx, yy, Self::shade_pixel(xx, yy, shade));
            }
        }
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::Off, 1))
            .draw(self.fb)
            .ok();
    }

    fn fill_rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, shade: Shade) {
        if w <= 0 || h <= 0 {
            return;
        }
        let radius = radius.max(0) as u32;
        let shape = RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32)),
            Size::new(radius, radius),
        );
        for yy in y..y + h {
            for xx in x..x + w {
                if shape.contains(Point::new(xx, yy)) {
                    self.fb.set_pixel(xx, yy, Self::shade_pixel(xx, yy, shade));
                }
            }
        }
    }

    fn draw_rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, stroke: i32, radius: i32) {
        if w <= 0 || h <= 0 || stroke <= 0 {
            return;
        }
        let radius = radius.max(0) as u32;
        RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32)),
            Size::new(radius, radius),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::Off, stroke as u32))
        .draw(self.fb)
        .ok();
    }

    fn draw_icon(&mut self, mask: &[u8], x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let width = w as usize;
        let height = h as usize;
        if mask.len() != (width * height + 7) / 8 {
            return;
        }
        for yy in 0..height {
            for xx in 0..width {
                let idx = yy * width + xx;
                let byte = idx / 8;
                let bit = 7 - (idx % 8);
                if (mask[byte] >> bit) & 1 == 1 {
                    self.fb
                        .set_pixel(x + xx as i32, y + yy as i32, BinaryColor::Off);
                }
            }
        }
    }

    fn draw_bitmap(&mut self, image: &ImageData, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 || image.width == 0 || image.height == 0 {
            return;
        }
        let img_w = image.width as u64;
        let img_h = image.height as u64;
        let box_w = w as u64;
        let box_h = h as u64;

        // Aspect-fit inside the box, centered.
        let (scaled_w, scaled_h) = if img_w * box_h > img_h * box_w {
            (box_w, (img_h * box_w / img_w).max(1))
        } else {
            ((img_w * box_h / img_h).max(1), box_h)
        };
        let offset_x = x + ((box_w - scaled_w) / 2) as i32;
        let offset_y = y + ((box_h - scaled_h) / 2) as i32;

        let bayer: [[u8; 4]; 4] = [
            [0, 8, 2, 10],
            [12, 4, 14, 6],
            [3, 11, 1, 9],
            [15, 7, 13, 5],
        ];

        for yy in 0..scaled_h {
            let src_y = (yy * img_h / scaled_h) as usize;
            for xx in 0..scaled_w {
                let src_x = (xx * img_w / scaled_w) as usize;
                let idx = src_y * image.width as usize + src_x;
                let Some(&lum) = image.pixels.get(idx) else {
                    continue;
                };
                let threshold = bayer[(yy as usize) & 3][(xx as usize) & 3] * 16 + 8;
                let color = if lum < threshold {
                    BinaryColor::Off
                } else {
                    BinaryColor::On
                };
                self.fb
                    .set_pixel(offset_x + xx as i32, offset_y + yy as i32, color);
            }
        }
    }

    fn draw_text(&mut self, font: FontId, x: i32, y: i32, text: &str, style: FontStyle) {
        let mono = Self::font(font, style);
        let text_style = MonoTextStyle::new(mono, BinaryColor::Off);
        Text::with_baseline(text, Point::new(x, y), text_style, Baseline::Top)
            .draw(self.fb)
            .ok();
        // Fonts without a bold variant get a 1px double strike.
        if style == FontStyle::Bold && font != FontId::Body {
            Text::with_baseline(text, Point::new(x + 1, y), text_style, Baseline::Top)
                .draw(self.fb)
                .ok();
        }
    }

    fn text_width(&self, font: FontId, text: &str, style: FontStyle) -> i32 {
        let mono = Self::font(font, style);
        let chars = text.chars().count() as i32;
        if chars == 0 {
            return 0;
        }
        let advance = (mono.character_size.width + mono.character_spacing) as i32;
        chars * advance - mono.character_spacing as i32
    }

    fn line_height(&self, font: FontId) -> i32 {
        Self::font(font, FontStyle::Regular).character_size.height as i32
    }
}
