use std::fs;
use std::io::{Read as _, Seek as _};
use std::path::{Component, Path, PathBuf};

use embedded_io::{ErrorType, Read, Seek, SeekFrom};

use quill_core::fs::{File, Storage, VOLUME_HOME};

/// `Storage` over a host directory standing in for the device volume.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, volume: &str, path: &str) -> Option<PathBuf> {
        if volume != VOLUME_HOME {
            return None;
        }
        let rel = Path::new(path);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(rel))
    }
}

impl ErrorType for FsStorage {
    type Error = std::io::Error;
}

impl Storage for FsStorage {
    type File<'a> = FsFile;

    fn open_read(&self, volume: &str, path: &str) -> Result<FsFile, std::io::Error> {
        let full = self
            .resolve(volume, path)
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))?;
        let file = fs::File::open(full)?;
        let size = file.metadata()?.len() as usize;
        Ok(FsFile { file, size })
    }
}

pub struct FsFile {
    file: fs::File,
    size: usize,
}

impl ErrorType for FsFile {
    type Error = std::io::Error;
}

impl Read for FsFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, std::io::Error> {
        self.file.read(buf)
    }
}

impl Seek for FsFile {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, std::io::Error> {
        let pos = match pos {
            SeekFrom::Start(n) => std::io::SeekFrom::Start(n),
            SeekFrom::End(n) => std::io::SeekFrom::End(n),
            SeekFrom::Current(n) => std::io::SeekFrom::Current(n),
        };
        self.file.seek(pos)
    }
}

impl File for FsFile {
    fn size(&self) -> usize {
        self.size
    }
}
