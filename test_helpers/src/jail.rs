//! Shared helpers for working with `figment::Jail` in tests.
//!
//! A jail gives the closure a fresh working directory and restores any
//! environment variables it sets, which is what end-to-end resolution tests
//! against the real process environment and filesystem need.

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it returns an
/// error.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to `name` inside the jail and returns its absolute path.
///
/// # Errors
///
/// Returns an error if the file cannot be written or the jail directory is
/// not valid UTF-8.
pub fn secret_file(
    jail: &mut figment::Jail,
    name: &str,
    contents: &str,
) -> figment::error::Result<Utf8PathBuf> {
    jail.create_file(name, contents)?;
    let dir = Utf8Path::from_path(jail.directory())
        .ok_or_else(|| figment_error("jail directory is not UTF-8"))?;
    Ok(dir.join(name))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers often own the error and passing by value avoids extra clones"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
