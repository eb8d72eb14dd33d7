//! On-disk secret files for file-indirection tests.
//!
//! [`SecretDir`] owns a temporary directory. Files can be written at plain
//! relative paths, or at container-style absolute paths such as
//! `/var/run/secrets/token`, which land beneath the directory so it can
//! stand in for a mounted filesystem root.
//!
//! # Examples
//!
//! ```
//! use test_helpers::secrets::SecretDir;
//!
//! let dir = SecretDir::new()?;
//! let mounted = dir.mount("/run/secrets/port", "8080")?;
//! assert_eq!(mounted.as_str(), "/run/secrets/port");
//! assert!(dir.root().join("run/secrets/port").is_file());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory holding secret files; removed on drop.
#[derive(Debug)]
pub struct SecretDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl SecretDir {
    /// Creates an empty directory.
    ///
    /// # Errors
    ///
    /// Fails when the temporary directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create secret directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("non-UTF-8 temp path: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// The directory's absolute path.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative` and returns the absolute host path.
    ///
    /// # Errors
    ///
    /// Fails when the file or its parent directories cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative.trim_start_matches('/'));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Writes `contents` at the container path `absolute` beneath the root.
    ///
    /// Returns `absolute` unchanged: the path a process would see if this
    /// directory were mounted at `/`.
    ///
    /// # Errors
    ///
    /// Fails when `absolute` is not absolute or the file cannot be written.
    pub fn mount(&self, absolute: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = Utf8Path::new(absolute);
        if !path.is_absolute() {
            return Err(anyhow!("mount path must be absolute: {absolute}"));
        }
        self.write(absolute, contents)?;
        Ok(path.to_path_buf())
    }
}
