//! Configuration for the demo, resolved from flags, environment variables
//! and secret files.
//!
//! Every public field of [`HelloWorldConfig`] can be set three ways. For
//! `recipient`:
//!
//! - `--recipient Ada`
//! - `RECIPIENT=Ada`
//! - `RECIPIENT_FILE=/run/secrets/recipient`

use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, Command};
use envflag::{
    ArgList, ArgSource, ClapRegistry, Configure, DEFAULT_SEPARATOR, ResolveOption, ScalarKind,
    Shape, Value,
};
use url::Url;

use crate::error::HelloWorldError;

/// Flag that switches on resolution tracing.
pub const TRACE_FLAG: &str = "trace.config";

/// Flag that enables rewriting secret paths under the presence root.
pub const MOUNTED_FLAG: &str = "mounted";

/// Settings for the greeting.
#[derive(Debug, Clone, PartialEq, Configure)]
pub struct HelloWorldConfig {
    /// Who to greet.
    pub recipient: String,
    /// Words preceding the recipient, semicolon separated.
    #[envflag(separator = ";")]
    pub salutations: Vec<String>,
    /// Shout the greeting.
    pub is_excited: bool,
    /// Whisper the greeting.
    pub is_quiet: bool,
    /// How many times to print the greeting.
    pub repeat: u8,
    /// Pause between repeated greetings.
    pub pause: Duration,
    /// Link printed after the greeting.
    #[envflag(env = "HELLO_WORLD_HOMEPAGE")]
    pub homepage: Option<Url>,
    /// Signature only ever read from a secret file.
    #[envflag(flag = "-", env = "-", file_env = "SIGNATURE_FILE")]
    pub signature: String,
}

impl Default for HelloWorldConfig {
    fn default() -> Self {
        Self {
            recipient: "World".to_owned(),
            salutations: vec!["Hello".to_owned()],
            is_excited: false,
            is_quiet: false,
            repeat: 1,
            pause: Duration::ZERO,
            homepage: None,
            signature: String::new(),
        }
    }
}

/// Builds the command the resolver registers its flags with.
#[must_use]
pub fn command() -> Command {
    Command::new("hello-world")
        .about("Greets someone, configured by flags, environment or secret files")
        .arg(switch(
            TRACE_FLAG,
            "Log every source consulted while resolving configuration",
        ))
        .arg(switch(
            MOUNTED_FLAG,
            "Read secret files under the TELEPRESENCE_ROOT mount",
        ))
}

/// A boolean switch that also takes an explicit `true` or `false` value.
fn switch(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .num_args(0..=1)
        .default_missing_value("true")
        .default_value("false")
        .value_parser(BoolishValueParser::new())
        .action(ArgAction::Set)
}

/// Whether `flag` is present on the command line with a true value.
fn switch_enabled(args: &impl ArgSource, flag: &str) -> bool {
    args.lookup(flag).is_some_and(|raw| {
        matches!(
            envflag::coerce(&raw, Shape::Scalar(ScalarKind::Bool), DEFAULT_SEPARATOR),
            Some(Value::Bool(true))
        )
    })
}

/// Resolves a [`HelloWorldConfig`] from the process, then validates the
/// command line against the registered flags.
///
/// # Errors
///
/// Returns a [`HelloWorldError`] when the command line contains unknown
/// flags, or asks for help or the version.
pub fn load() -> Result<HelloWorldConfig, HelloWorldError> {
    let args = ArgList::from_env();
    let mut options = Vec::new();
    if switch_enabled(&args, MOUNTED_FLAG) {
        options.push(ResolveOption::RootRewrite);
    }

    let mut config = HelloWorldConfig::default();
    let mut registry = ClapRegistry::from_command(command());
    if switch_enabled(&args, TRACE_FLAG) {
        envflag::resolve_with_trace(&mut config, &mut registry, &options)?;
    } else {
        envflag::resolve(&mut config, &mut registry, &options)?;
    }
    registry.try_get_matches_from(std::env::args_os())?;
    Ok(config)
}
