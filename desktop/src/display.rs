use minifb::{Key, KeyRepeat, Window};

use quill_core::display::{Display, RefreshMode};
use quill_core::framebuffer::{Framebuffer, HEIGHT, WIDTH};

/// Presents the 1-bpp framebuffer in a minifb window.
pub struct MinifbDisplay {
    window: Window,
    pixels: Vec<u32>,
}

impl MinifbDisplay {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            pixels: vec![0xFFFFFFFF; WIDTH * HEIGHT],
        }
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }
}

impl Display for MinifbDisplay {
    fn flush(&mut self, fb: &Framebuffer, _mode: RefreshMode) {
        for (i, byte) in fb.buffer().iter().enumerate() {
            for bit in 0..8 {
                let white = (byte >> (7 - bit)) & 1 == 1;
                self.pixels[i * 8 + bit] = if white { 0xFFFFFFFF } else { 0xFF000000 };
            }
        }
        self.window
            .update_with_buffer(&self.pixels, WIDTH, HEIGHT)
            .unwrap_or_else(|e| {
                panic!("Unable to update window: {}", e);
            });
    }
}
