//! File sources for file-indirection lookups.

use std::collections::HashMap;
use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use super::FileSource;

/// Strips root and prefix components so `path` can be joined under another
/// directory. `/var/run/token` becomes `var/run/token`.
pub(super) fn relative_to_root(path: &Utf8Path) -> Utf8PathBuf {
    path.components()
        .filter(|component| !matches!(component, Utf8Component::RootDir | Utf8Component::Prefix(_)))
        .collect()
}

/// Reads from the real filesystem.
///
/// Reads under a root go through a `cap-std` directory handle, so the
/// re-anchored path cannot climb out of the root with `..` or symlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFiles;

impl FileSource for OsFiles {
    fn read_all(&self, path: &Utf8Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_under(&self, root: &Utf8Path, path: &Utf8Path) -> io::Result<String> {
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        dir.read_to_string(relative_to_root(path))
    }
}

/// In-memory files keyed by path.
///
/// # Examples
///
/// ```rust
/// use camino::Utf8Path;
/// use envflag::{FileSource, MapFiles};
///
/// let files = MapFiles::new().with("/run/secrets/token", "s3cret");
/// let token = files.read_all(Utf8Path::new("/run/secrets/token"));
/// assert_eq!(token.ok().as_deref(), Some("s3cret"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapFiles {
    files: HashMap<Utf8PathBuf, String>,
}

impl MapFiles {
    /// Creates an empty file set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file, builder style.
    #[must_use]
    pub fn with(mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Removes a file, returning its previous contents.
    pub fn remove(&mut self, path: &Utf8Path) -> Option<String> {
        self.files.remove(path)
    }
}

impl FileSource for MapFiles {
    fn read_all(&self, path: &Utf8Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
        })
    }
}
