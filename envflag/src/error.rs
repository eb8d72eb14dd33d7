//! Error types produced by the resolver.

use thiserror::Error;

/// Structural errors: the call was pointed at something that is not a
/// mutable reference to a record.
///
/// This is the only failure a resolution pass reports. Missing sources,
/// unreadable files and unparseable values fall back to the field's existing
/// value instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TargetKindError {
    /// The record was passed by value, so results could not be written back.
    #[error("cannot resolve into `{type_name}`: expected a mutable reference, got a value")]
    NotReference {
        /// Type of the rejected target.
        type_name: &'static str,
    },

    /// The reference does not point at a record.
    #[error("cannot resolve into `{type_name}`: expected a configuration record")]
    NotRecord {
        /// Type of the rejected target.
        type_name: &'static str,
    },
}
