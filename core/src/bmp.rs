extern crate alloc;

use alloc::vec;

use embedded_io::SeekFrom;

use crate::fs::File;
use crate::render::ImageData;

// Largest thumbnail dimension we accept; anything above is a corrupt or
// hostile header.
const MAX_DIMENSION: u32 = 2048;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmpError {
    Io,
    BadMagic,
    Unsupported,
    Truncated,
}

/// Parse the BMP file + info headers and decode the pixel array to 8-bit
/// grayscale. Uncompressed 24-bpp BGR and 8-bpp paletted files only.
pub fn decode<F: File>(file: &mut F) -> Result<ImageData, BmpError> {
    let mut header = [0u8; 54];
    read_exact(file, &mut header)?;
    if &header[0..2] != b"BM" {
        return Err(BmpError::BadMagic);
    }

    let data_offset = u32le(&header[10..14]);
    let dib_size = u32le(&header[14..18]);
    if dib_size < 40 {
        return Err(BmpError::Unsupported);
    }
    let width = i32le(&header[18..22]);
    let height_raw = i32le(&header[22..26]);
    let planes = u16le(&header[26..28]);
    let bpp = u16le(&header[28..30]);
    let compression = u32le(&header[30..34]);

    if planes != 1 || compression != 0 {
        return Err(BmpError::Unsupported);
    }
    if width <= 0 || height_raw == 0 {
        return Err(BmpError::Unsupported);
    }
    let top_down = height_raw < 0;
    let width = width as u32;
    let height = height_raw.unsigned_abs();
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(BmpError::Unsupported);
    }

    let palette = match bpp {
        24 => None,
        8 => Some(read_palette(file, &header, dib_size)?),
        _ => return Err(BmpError::Unsupported),
    };

    file.seek(SeekFrom::Start(data_offset as u64))
        .map_err(|_| BmpError::Io)?;

    let bytes_per_px = (bpp / 8) as u32;
    let row_stride = ((width * bytes_per_px + 3) & !3) as usize;
    let mut row = vec![0u8; row_stride];
    let mut pixels = vec![0u8; width as usize * height as usize];

    for r in 0..height {
        read_exact(file, &mut row)?;
        let y = if top_down { r } else { height - 1 - r };
        let dst = &mut pixels[(y * width) as usize..][..width as usize];
        match palette {
            None => {
                for (x, px) in dst.iter_mut().enumerate() {
                    let bgr = &row[x * 3..x * 3 + 3];
                    *px = luma(bgr[2], bgr[1], bgr[0]);
                }
            }
            Some(table) => {
                for (x, px) in dst.iter_mut().enumerate() {
                    *px = table[row[x] as usize];
                }
            }
        }
    }

    Ok(ImageData {
        width,
        height,
        pixels,
    })
}

fn read_palette<F: File>(
    file: &mut F,
    header: &[u8; 54],
    dib_size: u32,
) -> Result<[u8; 256], BmpError> {
    let colors_used = u32le(&header[46..50]);
    let entries = if colors_used == 0 {
        256
    } else {
        colors_used.min(256) as usize
    };

    // The palette sits right after the DIB header, BGRA entries.
    file.seek(SeekFrom::Start(14 + dib_size as u64))
        .map_err(|_| BmpError::Io)?;
    let mut raw = vec![0u8; entries * 4];
    read_exact(file, &mut raw)?;

    let mut table = [0u8; 256];
    for (i, entry) in raw.chunks_exact(4).enumerate() {
        table[i] = luma(entry[2], entry[1], entry[0]);
    }
    Ok(table)
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 151 * g as u32 + 28 * b as u32) >> 8) as u8
}

fn read_exact<F: File>(file: &mut F, buf: &mut [u8]) -> Result<(), BmpError> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..]).map_err(|_| BmpError::Io)?;
        if n == 0 {
            return Err(BmpError::Truncated);
        }
        filled += n;
    }
    Ok(())
}

fn u16le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

fn u32le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn i32le(bytes: &[u8]) -> i32 {
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bmp_24, SliceFile};

    #[test]
    fn decodes_24bpp_bottom_up() {
        // 2x2, bottom row red, top row white
        let data = bmp_24(2, 2, &[[255, 255, 255], [255, 255, 255], [255, 0, 0], [255, 0, 0]]);
        let mut file = SliceFile::new(&data);
        let image = decode(&mut file).unwrap();
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.pixels[0], 255); // top-left white
        assert_eq!(image.pixels[2], luma(255, 0, 0)); // bottom-left red
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = bmp_24(1, 1, &[[0, 0, 0]]);
        data[0] = b'X';
        let mut file = SliceFile::new(&data);
        assert_eq!(decode(&mut file), Err(BmpError::BadMagic));
    }

    #[test]
    fn rejects_compressed() {
        let mut data = bmp_24(1, 1, &[[0, 0, 0]]);
        data[30] = 1; // BI_RLE8
        let mut file = SliceFile::new(&data);
        assert_eq!(decode(&mut file), Err(BmpError::Unsupported));
    }

    #[test]
    fn short_pixel_array_is_truncated() {
        let data = bmp_24(4, 4, &[[9, 9, 9]; 16]);
        let mut file = SliceFile::new(&data[..data.len() - 8]);
        assert_eq!(decode(&mut file), Err(BmpError::Truncated));
    }

    #[test]
    fn rejects_unreasonable_dimensions() {
        let mut data = bmp_24(1, 1, &[[0, 0, 0]]);
        data[18..22].copy_from_slice(&40_000i32.to_le_bytes());
        let mut file = SliceFile::new(&data);
        assert_eq!(decode(&mut file), Err(BmpError::Unsupported));
    }

    #[test]
    fn decodes_8bpp_paletted() {
        // 1x1, palette entry 0 = mid gray
        let mut data = Vec::new();
        let palette_len = 256 * 4;
        let data_offset = 54 + palette_len as u32;
        data.extend_from_slice(b"BM");
        data.extend_from_slice(&(data_offset + 4).to_le_bytes());
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&data_offset.to_le_bytes());
        data.extend_from_slice(&40u32.to_le_bytes());
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&8u16.to_le_bytes());
        data.extend_from_slice(&[0; 24]); // compression .. important colors
        for _ in 0..256 {
            data.extend_from_slice(&[128, 128, 128, 0]);
        }
        data.extend_from_slice(&[0, 0, 0, 0]); // one padded row
        let mut file = SliceFile::new(&data);
        let image = decode(&mut file).unwrap();
        assert_eq!((image.width, image.height), (1, 1));
        assert_eq!(image.pixels, vec![luma(128, 128, 128)]);
    }
}
