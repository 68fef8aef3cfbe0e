mod generated {
    include!(concat!(env!("OUT_DIR"), "/icons.rs"));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Folder,
    Text,
    Image,
    Book,
    File,
    Recent,
    Settings,
    Transfer,
    Library,
    Wifi,
    Hotspot,
    Cover,
}

/// 1-bpp mask for the icon at the requested pixel size. `None` when the
/// asset table has no bitmap for the combination; callers skip drawing.
pub fn icon_mask(icon: Icon, size: i32) -> Option<&'static [u8]> {
    match size {
        24 => match icon {
            Icon::Folder => Some(generated::FOLDER_24),
            Icon::Text => Some(generated::TEXT_24),
            Icon::Image => Some(generated::IMAGE_24),
            Icon::Book => Some(generated::BOOK_24),
            Icon::File => Some(generated::FILE_24),
            _ => None,
        },
        32 => match icon {
            Icon::Folder => Some(generated::FOLDER_32),
            Icon::Book => Some(generated::BOOK_32),
            Icon::Recent => Some(generated::RECENT_32),
            Icon::Settings => Some(generated::SETTINGS_32),
            Icon::Transfer => Some(generated::TRANSFER_32),
            Icon::Library => Some(generated::LIBRARY_32),
            Icon::Wifi => Some(generated::WIFI_32),
            Icon::Hotspot => Some(generated::HOTSPOT_32),
            Icon::Cover => Some(generated::COVER_32),
            _ => None,
        },
        _ => None,
    }
}
