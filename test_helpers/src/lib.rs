//! Test helpers shared across the envflag workspace.
//!
//! - [`env`] serialises process environment mutations behind RAII guards.
//! - [`jail`] wraps `figment::Jail` for tests that need a scratch working
//!   directory alongside environment overrides.
//! - [`secrets`] lays out secret files on disk, optionally beneath a fake
//!   mount root.

pub mod env;
pub mod jail;
pub mod secrets;
