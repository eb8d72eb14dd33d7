//! Core crate for the `envflag` configuration resolver.
//!
//! A configuration record is populated field by field from three sources, in
//! fixed order of precedence:
//!
//! 1. a command-line flag (`-database.url=...`),
//! 2. an environment variable (`DATABASE_URL`),
//! 3. a file whose path is held by an environment variable
//!    (`DATABASE_URL_FILE=/run/secrets/db`).
//!
//! When no source yields a value the field keeps whatever it held before the
//! call, so defaults are simply the initial values of the record.
//!
//! Records opt in with `#[derive(Configure)]`, which builds a static field
//! descriptor table and the write-back glue. The derive lives in the companion
//! `envflag_macros` crate.
//!
//! ```rust,no_run
//! use envflag::{ClapRegistry, Configure};
//!
//! #[derive(Configure)]
//! struct Settings {
//!     pub database_url: String,
//!     #[envflag(separator = ";")]
//!     pub peers: Vec<String>,
//! }
//!
//! let mut settings = Settings {
//!     database_url: "postgres://localhost/app".to_owned(),
//!     peers: Vec::new(),
//! };
//! let mut registry = ClapRegistry::new("app");
//! envflag::resolve(&mut settings, &mut registry, &[])?;
//! # Ok::<(), envflag::TargetKindError>(())
//! ```

extern crate self as envflag;

pub use envflag_macros::Configure;

mod coerce;
pub mod docs;
mod error;
pub mod naming;
mod record;
mod resolve;
pub mod sources;
mod walker;

pub use coerce::{
    DEFAULT_SEPARATOR, FromValue, ScalarKind, Shape, Value, coerce, coerce_list, parse_duration,
};
pub use error::TargetKindError;
pub use naming::{CanonicalNames, SKIP_MARKER};
pub use record::{FieldDescriptor, Record, Target};
pub use resolve::{ROOT_ENV, ResolveOption, Settings, SourceResolver};
pub use sources::{
    ArgList, ArgSource, ClapRegistry, EnvSource, FileSource, FlagRegistry, FlagSpec, MapEnv,
    MapFiles, OsFiles, ProcessEnv, RecordingRegistry,
};
pub use walker::Resolver;

pub use serde_json;

/// Resolves `target` from the process arguments, environment and filesystem.
///
/// Flags are registered with `registry` before lookup so a later argument
/// parse recognises them.
///
/// # Errors
///
/// Returns a [`TargetKindError`] when `target` is not a mutable reference to
/// a record. No field is touched in that case.
pub fn resolve<T: Target>(
    target: T,
    registry: &mut dyn FlagRegistry,
    options: &[ResolveOption],
) -> Result<(), TargetKindError> {
    let args = ArgList::from_env();
    Resolver::new(&args, &ProcessEnv, &OsFiles, registry).resolve(target, options)
}

/// Like [`resolve`], additionally emitting a `tracing` event for every source
/// consulted.
///
/// # Errors
///
/// Returns a [`TargetKindError`] when `target` is not a mutable reference to
/// a record.
pub fn resolve_with_trace<T: Target>(
    target: T,
    registry: &mut dyn FlagRegistry,
    options: &[ResolveOption],
) -> Result<(), TargetKindError> {
    let args = ArgList::from_env();
    Resolver::new(&args, &ProcessEnv, &OsFiles, registry).resolve_with_trace(target, options)
}
