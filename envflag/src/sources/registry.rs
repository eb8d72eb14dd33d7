//! Flag registries.
//!
//! Registration tells the process's argument parser about every flag the
//! resolver may read, so that parsing does not reject them and help output
//! can list their environment and file-indirection alternatives.

use std::ffi::{OsStr, OsString};

use clap::{Arg, ArgAction, ArgMatches, Command};

use super::FlagRegistry;

const TERMINATOR: &str = "--";

/// Everything known about a flag at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Flag name without leading dashes.
    pub name: String,
    /// Record field the flag populates.
    pub label: String,
    /// Environment variable consulted after the flag, unless disabled.
    pub env: Option<String>,
    /// File-indirection variable consulted last, unless disabled.
    pub file_env: Option<String>,
    /// Rendering of the field's value before resolution.
    pub default: Option<String>,
}

impl FlagSpec {
    /// One-line help describing the fallbacks for this flag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use envflag::FlagSpec;
    ///
    /// let spec = FlagSpec {
    ///     name: "port".to_owned(),
    ///     label: "port".to_owned(),
    ///     env: Some("PORT".to_owned()),
    ///     file_env: None,
    ///     default: Some("8080".to_owned()),
    /// };
    /// assert_eq!(spec.help(), "field `port` (env: PORT) [default: 8080]");
    /// ```
    #[must_use]
    pub fn help(&self) -> String {
        let mut help = format!("field `{}`", self.label);
        let sources: Vec<String> = [
            self.env.as_ref().map(|env| format!("env: {env}")),
            self.file_env.as_ref().map(|file| format!("file env: {file}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !sources.is_empty() {
            help.push_str(&format!(" ({})", sources.join(", ")));
        }
        if let Some(default) = &self.default {
            help.push_str(&format!(" [default: {default}]"));
        }
        help
    }
}

/// Registry backed by a [`clap::Command`].
///
/// Each flag becomes an optional long argument taking at most one value; a
/// bare `--flag` parses as `true`. The single-dash spelling `-flag` that the
/// resolver reads is accepted too. Finish every resolution pass before
/// calling [`ClapRegistry::try_get_matches_from`].
#[derive(Debug, Clone, Default)]
pub struct ClapRegistry {
    command: Command,
}

impl ClapRegistry {
    /// Creates a registry around an empty command called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            command: Command::new(name.into()),
        }
    }

    /// Wraps an existing command, keeping the arguments it already defines.
    #[must_use]
    pub const fn from_command(command: Command) -> Self {
        Self { command }
    }

    /// The command with every registered flag.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Consumes the registry, returning the command.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command
    }

    /// Finalises argument parsing.
    ///
    /// `-name` and `-name=value` are rewritten to their `--` form when `name`
    /// is a long argument of the command, up to a bare `--`.
    ///
    /// # Errors
    ///
    /// Returns the [`clap::Error`] produced by parsing `args`.
    pub fn try_get_matches_from<I, T>(self, args: I) -> Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut terminated = false;
        let normalised: Vec<OsString> = args
            .into_iter()
            .map(Into::into)
            .map(|arg: OsString| {
                if terminated {
                    return arg;
                }
                if arg == TERMINATOR {
                    terminated = true;
                    return arg;
                }
                self.long_spelling(&arg).unwrap_or(arg)
            })
            .collect();
        self.command.try_get_matches_from(normalised)
    }

    /// Double-dash form of a single-dash `arg` naming a known long argument.
    fn long_spelling(&self, arg: &OsStr) -> Option<OsString> {
        let text = arg.to_str()?;
        let body = text.strip_prefix('-').filter(|body| !body.starts_with('-'))?;
        let name = body.split_once('=').map_or(body, |(name, _)| name);
        self.command
            .get_arguments()
            .any(|known| known.get_long() == Some(name))
            .then(|| OsString::from(format!("-{text}")))
    }
}

impl FlagRegistry for ClapRegistry {
    fn is_registered(&self, name: &str) -> bool {
        self.command
            .get_arguments()
            .any(|arg| arg.get_id().as_str() == name)
    }

    fn register(&mut self, spec: FlagSpec) {
        if self.is_registered(&spec.name) {
            return;
        }
        let arg = Arg::new(spec.name.clone())
            .long(spec.name.clone())
            .value_name("VALUE")
            .num_args(0..=1)
            .default_missing_value("true")
            .allow_negative_numbers(true)
            .action(ArgAction::Set)
            .help(spec.help());
        self.command = std::mem::take(&mut self.command).arg(arg);
    }
}

/// Registry that only records what was registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingRegistry {
    specs: Vec<FlagSpec>,
}

impl RecordingRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered flags, in registration order.
    #[must_use]
    pub fn specs(&self) -> &[FlagSpec] {
        &self.specs
    }

    /// Names of the registered flags, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.name.as_str())
    }
}

impl FlagRegistry for RecordingRegistry {
    fn is_registered(&self, name: &str) -> bool {
        self.specs.iter().any(|spec| spec.name == name)
    }

    fn register(&mut self, spec: FlagSpec) {
        if !self.is_registered(&spec.name) {
            self.specs.push(spec);
        }
    }
}
