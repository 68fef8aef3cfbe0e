use embedded_io::{ErrorType, Read, Seek};

/// Logical volume holding home-screen data (cover thumbnails).
pub const VOLUME_HOME: &str = "HOME";

pub trait File: Read + Seek {
    fn size(&self) -> usize;
}

/// Read-only storage seam: open a file by logical volume name + path.
pub trait Storage: ErrorType {
    type File<'a>: File
    where
        Self: 'a;

    fn open_read(&self, volume: &str, path: &str) -> Result<Self::File<'_>, Self::Error>;
}
