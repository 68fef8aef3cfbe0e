extern crate alloc;

use alloc::format;
use alloc::string::String;

/// Read-only snapshot of a recently opened book.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecentBook {
    pub title: String,
    pub author: String,
    pub path: String,
    pub cover_bmp_path: String,
}

/// Last path component; the whole path when it has no separator.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Lowercased extension of the last path component, empty when absent.
pub fn file_ext_lower(path: &str) -> String {
    let name = basename(path);
    match name.rfind('.') {
        Some(pos) if pos + 1 < name.len() => name[pos + 1..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Sibling thumbnail file for a cover image, keyed by target height.
pub fn cover_thumb_path(cover_path: &str, height: i32) -> String {
    format!("{cover_path}.t{height}.bmp")
}
