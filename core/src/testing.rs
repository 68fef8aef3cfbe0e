//! Test doubles shared by the unit tests: an in-memory storage volume and
//! a renderer that records every call instead of drawing.

use std::cell::Cell;

use embedded_io::{ErrorKind, ErrorType, Read, Seek, SeekFrom};

use crate::fs::{File, Storage, VOLUME_HOME};
use crate::render::{FontId, FontStyle, ImageData, Renderer, Shade};

pub struct SliceFile<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceFile<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ErrorType for SliceFile<'_> {
    type Error = ErrorKind;
}

impl Read for SliceFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = &self.data[self.pos.min(self.data.len())..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl Seek for SliceFile<'_> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        let base = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::End(offset) => self.data.len() as i64 + offset,
            SeekFrom::Current(offset) => self.pos as i64 + offset,
        };
        if base < 0 {
            return Err(ErrorKind::InvalidInput);
        }
        self.pos = base as usize;
        Ok(base as u64)
    }
}

impl File for SliceFile<'_> {
    fn size(&self) -> usize {
        self.data.len()
    }
}

#[derive(Default)]
pub struct MemStorage {
    files: Vec<(String, Vec<u8>)>,
    opens: Cell<usize>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, data: Vec<u8>) {
        self.files.push((path.to_string(), data));
    }

    pub fn opens(&self) -> usize {
        self.opens.get()
    }
}

impl ErrorType for MemStorage {
    type Error = ErrorKind;
}

impl Storage for MemStorage {
    type File<'a> = SliceFile<'a>;

    fn open_read(&self, volume: &str, path: &str) -> Result<Self::File<'_>, Self::Error> {
        self.opens.set(self.opens.get() + 1);
        if volume != VOLUME_HOME {
            return Err(ErrorKind::NotFound);
        }
        self.files
            .iter()
            .find(|(name, _)| name == path)
            .map(|(_, data)| SliceFile::new(data))
            .ok_or(ErrorKind::NotFound)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    FillRect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        shade: Shade,
    },
    DrawRect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },
    FillRounded {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        radius: i32,
        shade: Shade,
    },
    DrawRounded {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        stroke: i32,
        radius: i32,
    },
    Icon {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },
    Bitmap {
        src_w: u32,
        src_h: u32,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },
    Text {
        font: FontId,
        x: i32,
        y: i32,
        text: String,
        style: FontStyle,
    },
}

/// Fixed-metrics renderer recording calls: every glyph is
/// `char_width` wide in every font.
pub struct RecordingRenderer {
    pub ops: Vec<Op>,
    pub char_width: i32,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            char_width: 8,
        }
    }

    pub fn texts(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Text { .. }))
            .collect()
    }

    pub fn count(&self, matcher: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| matcher(op)).count()
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, shade: Shade) {
        self.ops.push(Op::FillRect { x, y, w, h, shade });
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(Op::DrawRect { x, y, w, h });
    }

    fn fill_rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, shade: Shade) {
        self.ops.push(Op::FillRounded {
            x,
            y,
            w,
            h,
            radius,
            shade,
        });
    }

    fn draw_rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, stroke: i32, radius: i32) {
        self.ops.push(Op::DrawRounded {
            x,
            y,
            w,
            h,
            stroke,
            radius,
        });
    }

    fn draw_icon(&mut self, _mask: &[u8], x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(Op::Icon { x, y, w, h });
    }

    fn draw_bitmap(&mut self, image: &ImageData, x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(Op::Bitmap {
            src_w: image.width,
            src_h: image.height,
            x,
            y,
            w,
            h,
        });
    }

    fn draw_text(&mut self, font: FontId, x: i32, y: i32, text: &str, style: FontStyle) {
        self.ops.push(Op::Text {
            font,
            x,
            y,
            text: text.to_string(),
            style,
        });
    }

    fn text_width(&self, _font: FontId, text: &str, _style: FontStyle) -> i32 {
        text.chars().count() as i32 * self.char_width
    }

    fn line_height(&self, _font: FontId) -> i32 {
        16
    }
}

/// Minimal uncompressed 24-bpp BMP: `pixels` are `[r, g, b]` rows given
/// top-down, written bottom-up as the format expects.
pub fn bmp_24(width: u32, height: u32, pixels: &[[u8; 3]]) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);
    let stride = ((width * 3 + 3) & !3) as usize;
    let data_offset = 54u32;
    let file_size = data_offset + stride as u32 * height;

    let mut out = Vec::with_capacity(file_size as usize);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&data_offset.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&[0; 24]);
    for row in (0..height).rev() {
        let mut line = Vec::with_capacity(stride);
        for x in 0..width {
            let [r, g, b] = pixels[(row * width + x) as usize];
            line.extend_from_slice(&[b, g, r]);
        }
        line.resize(stride, 0);
        out.extend_from_slice(&line);
    }
    out
}
