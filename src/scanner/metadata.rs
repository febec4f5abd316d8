use lofty::file::TaggedFileExt;
use lofty::prelude::*;
use std::path::Path;

/// The tag fields used for folder placement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagInfo {
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl TagInfo {
    /// Artist tag, or `None` when absent, empty, or only whitespace.
    pub fn artist(&self) -> Option<&str> {
        non_blank(self.artist.as_deref())
    }

    /// Album tag, or `None` when absent, empty, or only whitespace.
    pub fn album(&self) -> Option<&str> {
        non_blank(self.album.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Source of artist/album tags for a file.
///
/// Implementations never fail: unreadable or unsupported files yield an
/// empty [`TagInfo`].
pub trait TagReader {
    fn read_tags(&self, path: &Path) -> TagInfo;
}

/// Reads embedded tags with lofty (ID3, Vorbis comments, MP4 atoms, ASF...).
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path) -> TagInfo {
        read_tags(path)
    }
}

/// Read tags from an audio file. Returns empty tags on failure.
pub fn read_tags(path: &Path) -> TagInfo {
    let tagged_file = match lofty::read_from_path(path) {
        Ok(f) => f,
        Err(e) => {
            log::debug!("Could not read tags from {}: {}", path.display(), e);
            return TagInfo::default();
        }
    };

    // Try primary tag, then fall back
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let Some(tag) = tag else {
        log::debug!("No tags in {}", path.display());
        return TagInfo::default();
    };

    TagInfo {
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
    }
}
