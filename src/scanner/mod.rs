pub mod metadata;

use crate::AUDIO_EXTENSIONS;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot list {}: {source}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file directly inside the root that looks like audio.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEntry {
    pub source_path: PathBuf,
    pub file_name: String,
}

/// Whether `file_name` ends with one of [`AUDIO_EXTENSIONS`].
///
/// Case-sensitive: `SONG.MP3` is not a candidate.
pub fn is_audio_candidate(file_name: &str) -> bool {
    AUDIO_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// List the audio candidates directly inside `root`, sorted by file name.
///
/// Subdirectories are neither descended into nor returned, and symlinks are
/// not followed. The whole listing is collected up front so a root that
/// cannot be read fails before anything is touched.
pub fn list_candidates(root: &Path) -> Result<Vec<AudioEntry>, ScanError> {
    let access_error = |source: io::Error| ScanError::DirectoryAccess {
        path: root.to_path_buf(),
        source,
    };

    let meta = std::fs::metadata(root).map_err(access_error)?;
    if !meta.is_dir() {
        return Err(access_error(io::Error::new(
            io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 || e.path() == Some(root) => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory listing failed"));
                return Err(access_error(source));
            }
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            log::debug!("Skipping non-UTF-8 file name: {}", entry.path().display());
            continue;
        };

        if is_audio_candidate(file_name) {
            candidates.push(AudioEntry {
                source_path: entry.path().to_path_buf(),
                file_name: file_name.to_string(),
            });
        }
    }

    Ok(candidates)
}
