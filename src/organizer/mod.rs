pub mod placement;

use crate::config::AppConfig;
use crate::sanitize::Sanitizer;
use crate::scanner::metadata::{LoftyTagReader, TagReader};
use crate::scanner::{self, AudioEntry, ScanError};
use indicatif::{ProgressBar, ProgressStyle};
use placement::{Folder, Placement, SegmentKind};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Could not create {segment} folder {} ({segment} name {value:?}): {source}", path.display())]
    DirectoryCreation {
        segment: SegmentKind,
        value: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OrganizeError {
    fn directory_creation(folder: &Folder, source: io::Error) -> Self {
        Self::DirectoryCreation {
            segment: folder.kind,
            value: folder.name.clone(),
            path: folder.path.clone(),
            source,
        }
    }

    /// Whether this error stops the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Scan(_))
    }
}

/// Counters for one organize run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeResult {
    pub total_candidates: u64,
    pub moved: u64,
    pub failed: u64,
}

impl OrganizeResult {
    pub fn summary(&self) -> String {
        format!(
            "Done! {} out of {} detected audio files were moved",
            self.moved, self.total_candidates
        )
    }
}

/// Sorts the audio files of one folder into `Artist/Album` subfolders.
pub struct Organizer<R = LoftyTagReader> {
    reader: R,
    sanitizer: Sanitizer,
    unknown_artist: String,
    unknown_album: String,
    dry_run: bool,
}

impl Organizer<LoftyTagReader> {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_reader(LoftyTagReader, config)
    }
}

impl<R: TagReader> Organizer<R> {
    pub fn with_reader(reader: R, config: &AppConfig) -> Self {
        Self {
            reader,
            sanitizer: Sanitizer::default(),
            unknown_artist: config.unknown_artist.clone(),
            unknown_album: config.unknown_album.clone(),
            dry_run: false,
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Plan placements without creating folders or moving files.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Organize every audio file directly inside `root`.
    ///
    /// Only an unreadable root is an error; per-file failures are logged,
    /// counted in [`OrganizeResult::failed`], and the run continues.
    pub fn organize(&self, root: &Path) -> Result<OrganizeResult, OrganizeError> {
        let candidates = scanner::list_candidates(root)?;
        log::info!(
            "Found {} audio files in {}",
            candidates.len(),
            root.display()
        );

        let pb = ProgressBar::new(candidates.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut result = OrganizeResult::default();

        for entry in &candidates {
            result.total_candidates += 1;
            pb.set_message(entry.file_name.clone());

            match self.organize_file(root, entry) {
                Ok(placement) => {
                    let verb = if self.dry_run { "Would move" } else { "Moving" };
                    pb.suspend(|| {
                        println!(
                            "{} {} to {}",
                            verb,
                            entry.file_name,
                            placement.destination.display()
                        )
                    });
                    result.moved += 1;
                }
                Err(e) => {
                    pb.suspend(|| log::warn!("Skipping {}: {}", entry.file_name, e));
                    result.failed += 1;
                }
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(result)
    }

    /// Work out where `entry` goes: read tags, substitute placeholders,
    /// sanitize, and reject segments that can't name a folder.
    pub fn plan(&self, root: &Path, entry: &AudioEntry) -> Result<Placement, OrganizeError> {
        let tags = self.reader.read_tags(&entry.source_path);

        let artist = tags.artist().unwrap_or_else(|| {
            log::debug!("{}: no artist tag, using {:?}", entry.file_name, self.unknown_artist);
            self.unknown_artist.as_str()
        });
        let album = tags.album().unwrap_or_else(|| {
            log::debug!("{}: no album tag, using {:?}", entry.file_name, self.unknown_album);
            self.unknown_album.as_str()
        });

        let placement = Placement::new(root, &self.sanitizer, artist, album, &entry.file_name);
        for folder in placement.folders() {
            folder
                .validate()
                .map_err(|source| OrganizeError::directory_creation(folder, source))?;
        }

        Ok(placement)
    }

    fn organize_file(&self, root: &Path, entry: &AudioEntry) -> Result<Placement, OrganizeError> {
        let target = self.plan(root, entry)?;

        if self.dry_run {
            return check_dry_run(target, entry);
        }

        for folder in target.folders() {
            placement::ensure_dir(&folder.path)
                .map_err(|source| OrganizeError::directory_creation(folder, source))?;
        }

        placement::move_file(&entry.source_path, &target.destination).map_err(|source| {
            OrganizeError::Move {
                from: entry.source_path.clone(),
                to: target.destination.clone(),
                source,
            }
        })?;

        Ok(target)
    }
}

/// Report the failures a real run would hit, without touching anything.
fn check_dry_run(target: Placement, entry: &AudioEntry) -> Result<Placement, OrganizeError> {
    for folder in target.folders() {
        if let Some(source) = placement::occupied_by_non_dir(&folder.path) {
            return Err(OrganizeError::directory_creation(folder, source));
        }
    }

    if let Some(source) = placement::destination_taken(&target.destination) {
        return Err(OrganizeError::Move {
            from: entry.source_path.clone(),
            to: target.destination.clone(),
            source,
        });
    }

    Ok(target)
}
