//! Library facade for the `hello_world` demo so the binaries and integration
//! tests share configuration types and helpers.

pub mod config;
pub mod error;
pub mod message;
