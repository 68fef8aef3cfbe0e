use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};

pub const WIDTH: usize = 480;
pub const HEIGHT: usize = 800;
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT / 8;

/// Portrait 1-bpp framebuffer for the e-paper panel. Bit set = white.
pub struct Framebuffer {
    bits: [u8; BUFFER_SIZE],
}

impl Framebuffer {
    pub fn new() -> Self {
        // Clear screen to white
        Self {
            bits: [0xFF; BUFFER_SIZE],
        }
    }

    pub fn clear_screen(&mut self) {
        self.bits.fill(0xFF);
    }

    pub fn buffer(&self) -> &[u8; BUFFER_SIZE] {
        &self.bits
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return;
        }
        let index = y as usize * WIDTH + x as usize;
        let byte_index = index / 8;
        let bit_index = 7 - (index % 8);
        match color {
            BinaryColor::On => self.bits[byte_index] |= 1 << bit_index,
            BinaryColor::Off => self.bits[byte_index] &= !(1 << bit_index),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return None;
        }
        let index = y as usize * WIDTH + x as usize;
        let byte_index = index / 8;
        let bit_index = 7 - (index % 8);
        Some(if (self.bits[byte_index] >> bit_index) & 1 == 1 {
            BinaryColor::On
        } else {
            BinaryColor::Off
        })
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}
