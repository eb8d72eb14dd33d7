//! Error types for the `hello_world` demo.
//!
//! Resolution itself only fails on a wrong call shape; everything else the
//! binary reports comes from argument parsing or validation of the resolved
//! values.
use thiserror::Error;

/// Errors raised by the hello world demo.
#[derive(Debug, Error)]
pub enum HelloWorldError {
    /// The resolver was handed something other than a record reference.
    #[error("failed to resolve configuration: {0}")]
    Resolution(#[from] envflag::TargetKindError),
    /// The command line contained flags the resolver never registered.
    #[error(transparent)]
    Cli(#[from] clap::Error),
    /// Resolved values were inconsistent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Validation issues detected in the resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No greeting words were provided.
    #[error("at least one salutation must be provided")]
    MissingSalutation,
    /// A provided salutation collapsed to nothing after trimming.
    #[error("salutations must contain visible characters (index {0})")]
    BlankSalutation(usize),
    /// The recipient collapsed to nothing after trimming.
    #[error("the recipient must contain visible characters")]
    BlankRecipient,
    /// Mutually exclusive delivery modes were enabled simultaneously.
    #[error("cannot combine --is.excited with --is.quiet")]
    ConflictingDeliveryModes,
    /// The greeting would never be printed.
    #[error("repeat must be at least one")]
    ZeroRepeat,
}
