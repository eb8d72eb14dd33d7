//! Capabilities the resolver reads from and registers with.
//!
//! Each external collaborator sits behind a small trait so tests can swap
//! process-wide state for in-memory fakes:
//!
//! - [`ArgSource`]: look up a flag value by name.
//! - [`EnvSource`]: look up an environment variable.
//! - [`FileSource`]: read a whole file.
//! - [`FlagRegistry`]: make flags known to the argument parser.

mod args;
mod env;
mod files;
mod registry;

pub use args::ArgList;
pub use env::{MapEnv, ProcessEnv};
pub use files::{MapFiles, OsFiles};
pub use registry::{ClapRegistry, FlagSpec, RecordingRegistry};

use camino::Utf8Path;

/// Looks up command-line flag values.
pub trait ArgSource {
    /// Returns the value bound to flag `name`, or `None` when the flag is
    /// absent.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Looks up environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` when it is unset.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads files referenced by file-indirection variables.
pub trait FileSource {
    /// Reads the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; the resolver treats any error as an
    /// absent value.
    fn read_all(&self, path: &Utf8Path) -> std::io::Result<String>;

    /// Reads `path` relative to `root`.
    ///
    /// Absolute paths are re-anchored under `root`. The default
    /// implementation joins the two and delegates to [`FileSource::read_all`].
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn read_under(&self, root: &Utf8Path, path: &Utf8Path) -> std::io::Result<String> {
        self.read_all(&root.join(files::relative_to_root(path)))
    }
}

/// Makes flags known to the process's argument parser.
pub trait FlagRegistry {
    /// Returns `true` when a flag called `name` is already registered.
    fn is_registered(&self, name: &str) -> bool;

    /// Registers `spec`. Registering a name twice leaves the first
    /// registration in place.
    fn register(&mut self, spec: FlagSpec);
}

impl<T: ArgSource + ?Sized> ArgSource for &T {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
