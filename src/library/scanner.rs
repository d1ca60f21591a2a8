//! Discovery of audiobooks inside the configured folders.
//!
//! Every direct subdirectory of an audiobook folder that contains audio is one
//! book; loose audio files directly in the folder are books of their own.

use std::{
    fs::{read_dir, symlink_metadata},
    io::Error as IoError,
    path::{Path, PathBuf},
};

use {
    thiserror::Error,
    tracing::{debug, warn},
};

use crate::library::models::NewBook;

/// File extensions treated as audio.
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "m4a", "m4b", "aac", "flac", "ogg", "oga", "opus", "wav", "wma", "mka",
];

/// Error type for folder scanning.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A folder could not be listed.
    #[error("Cannot read {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

/// Scans audiobook folders for books.
#[derive(Debug, Clone, Default)]
pub struct BookScanner {
    directories: Vec<PathBuf>,
}

impl BookScanner {
    /// Creates a scanner over the given folders.
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
        }
    }

    /// Folders this scanner looks at.
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Lists every book found in the configured folders, sorted by name.
    ///
    /// Missing folders are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `ScanError` if an existing configured folder cannot be read.
    /// Unreadable folders below it are skipped with a warning.
    pub fn scan(&self) -> Result<Vec<NewBook>, ScanError> {
        let mut books = Vec::new();

        for dir in &self.directories {
            if !dir.is_dir() {
                warn!("Skipping missing audiobook folder {:?}", dir);
                continue;
            }
            books.extend(scan_folder(dir)?);
        }

        books.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.root.cmp(&b.root))
        });
        debug!("Scan found {} books", books.len());
        Ok(books)
    }
}

fn scan_folder(dir: &Path) -> Result<Vec<NewBook>, ScanError> {
    let mut books = Vec::new();

    for path in visible_entries(dir)? {
        if path.is_dir() {
            if contains_audio(&path) {
                books.push(new_book(&path, file_name(&path)));
            }
        } else if is_audio_file(&path) {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            books.push(new_book(&path, name));
        }
    }

    Ok(books)
}

/// Whether `dir` holds audio at any depth. Unreadable folders count as empty.
fn contains_audio(dir: &Path) -> bool {
    let entries = match visible_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Skipping unreadable folder: {}", e);
            return false;
        }
    };

    entries.iter().any(|path| {
        // Do not follow directory symlinks; they may loop.
        let is_link = symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        if path.is_dir() {
            !is_link && contains_audio(path)
        } else {
            is_audio_file(path)
        }
    })
}

fn visible_entries(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let entries = read_dir(dir).map_err(|source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    Ok(entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| !file_name(path).starts_with('.'))
        .collect())
}

/// Whether the path has one of the known audio extensions.
#[must_use]
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn new_book(root: &Path, name: String) -> NewBook {
    NewBook {
        name,
        author: None,
        root: root.to_string_lossy().into_owned(),
        duration_ms: 0,
    }
}
