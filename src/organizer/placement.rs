use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::sanitize::{self, Sanitizer};

/// Which level of the `Artist/Album` hierarchy a folder belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Artist,
    Album,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artist => f.write_str("artist"),
            Self::Album => f.write_str("album"),
        }
    }
}

/// One level of the target hierarchy: the tag value it came from, the
/// sanitized folder name, and the full path.
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub kind: SegmentKind,
    pub name: String,
    pub segment: String,
    pub path: PathBuf,
}

impl Folder {
    fn new(kind: SegmentKind, parent: &Path, name: &str, sanitizer: &Sanitizer) -> Self {
        let segment = sanitizer.sanitize(name);
        let path = parent.join(&segment);
        Self {
            kind,
            name: name.to_string(),
            segment,
            path,
        }
    }

    /// Fails when the sanitized name can't stand alone as a folder.
    pub fn validate(&self) -> io::Result<()> {
        if sanitize::is_usable_segment(&self.segment) {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "name could not be cleaned to a valid directory name",
            ))
        }
    }
}

/// Where a single file is headed.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub artist: Folder,
    pub album: Folder,
    pub destination: PathBuf,
}

impl Placement {
    pub fn new(
        root: &Path,
        sanitizer: &Sanitizer,
        artist: &str,
        album: &str,
        file_name: &str,
    ) -> Self {
        let artist = Folder::new(SegmentKind::Artist, root, artist, sanitizer);
        let album = Folder::new(SegmentKind::Album, &artist.path, album, sanitizer);
        let destination = album.path.join(file_name);
        Self {
            artist,
            album,
            destination,
        }
    }

    /// Artist folder first, then album folder.
    pub fn folders(&self) -> [&Folder; 2] {
        [&self.artist, &self.album]
    }
}

/// Create `path` and any missing parents. A directory that already exists
/// counts as success; anything else in the way is an error.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(_) if path.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Error for a path that is taken by something other than a directory.
/// Returns `None` when the path is free or already a directory.
pub fn occupied_by_non_dir(path: &Path) -> Option<io::Error> {
    match fs::symlink_metadata(path) {
        Ok(meta) if !path.is_dir() => Some(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("a {} with that name already exists", describe(&meta)),
        )),
        _ => None,
    }
}

/// Error for a move destination that already exists.
pub fn destination_taken(to: &Path) -> Option<io::Error> {
    fs::symlink_metadata(to).ok().map(|_| {
        io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists")
    })
}

/// Move a file, refusing to overwrite. Falls back to copy + remove when the
/// destination is on another filesystem.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(e) = destination_taken(to) {
        return Err(e);
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!("Cross-device move of {}, copying instead", from.display());
            copy_then_remove(from, to)
        }
        Err(e) => Err(e),
    }
}

/// Copy `from` to `to`, then delete `from`. On any failure `to` is removed
/// again so the file only ever exists at its original location.
pub fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(e) = destination_taken(to) {
        return Err(e);
    }
    if let Err(e) = fs::copy(from, to) {
        fs::remove_file(to).ok();
        return Err(e);
    }
    if let Err(e) = fs::remove_file(from) {
        fs::remove_file(to).ok();
        return Err(e);
    }
    Ok(())
}

fn describe(meta: &fs::Metadata) -> &'static str {
    if meta.file_type().is_symlink() {
        "symlink"
    } else {
        "file"
    }
}
