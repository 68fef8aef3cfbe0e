use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let icon_dir = Path::new("icons");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let out_path = out_dir.join("icons.rs");

    // (name, sizes) — the 24px set decorates file listings, the 32px set
    // the home grid and cover placeholder.
    let icons: [(&str, &[u32]); 12] = [
        ("folder", &[24, 32]),
        ("text", &[24]),
        ("image", &[24]),
        ("book", &[24, 32]),
        ("file", &[24]),
        ("recent", &[32]),
        ("settings", &[32]),
        ("transfer", &[32]),
        ("library", &[32]),
        ("wifi", &[32]),
        ("hotspot", &[32]),
        ("cover", &[32]),
    ];

    let mut output = String::new();
    for (name, sizes) in icons {
        let path = icon_dir.join(format!("{name}.svg"));
        println!("cargo:rerun-if-changed={}", path.display());
        for &size in sizes {
            let mask = render_svg_mask(&path, size, size);
            output.push_str(&format!(
                "pub const {}_{}: &[u8] = &[\n",
                name.to_uppercase(),
                size
            ));
            for chunk in mask.chunks(16) {
                output.push_str("    ");
                for byte in chunk {
                    output.push_str(&format!("0x{:02X}, ", byte));
                }
                output.push('\n');
            }
            output.push_str("];\n\n");
        }
    }

    fs::write(&out_path, output).unwrap();
}

fn render_svg_mask(path: &Path, width: u32, height: u32) -> Vec<u8> {
    let data = fs::read(path).unwrap();
    let options = usvg::Options::default();
    let fontdb = usvg::fontdb::Database::new();
    let tree = usvg::Tree::from_data(&data, &options, &fontdb).unwrap();
    let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
    let mut pixmap_mut = pixmap.as_mut();
    let scale_x = width as f32 / tree.size().width();
    let scale_y = height as f32 / tree.size().height();
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale_x, scale_y),
        &mut pixmap_mut,
    );

    let mut mask = vec![0u8; ((width * height) as usize + 7) / 8];
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            let byte = idx / 8;
            let bit = 7 - (idx % 8);
            let px = pixmap.pixel(x, y).unwrap();
            if px.alpha() > 0 {
                mask[byte] |= 1 << bit;
            }
        }
    }
    mask
}
