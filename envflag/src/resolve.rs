//! Source precedence for a single field.
//!
//! A field's raw value comes from the first source that yields a non-empty
//! string, in this order:
//!
//! 1. the command-line flag,
//! 2. the environment variable,
//! 3. the file named by the file-indirection variable.
//!
//! An empty result means "keep the default".

use camino::Utf8Path;
use tracing::debug;

use crate::CanonicalNames;
use crate::sources::{ArgSource, EnvSource, FileSource};

/// Presence variable whose value is the mount root for rewritten
/// file-indirection paths.
pub const ROOT_ENV: &str = "TELEPRESENCE_ROOT";

const TRACE_TARGET: &str = "envflag::resolve";

/// Per-call options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveOption {
    /// Read file-indirection paths under the directory named by
    /// [`ROOT_ENV`], when that variable is set.
    RootRewrite,
    /// Emit a `tracing` event for every source consulted.
    Trace,
}

/// Settings for one resolution pass, built from a list of
/// [`ResolveOption`]s.
///
/// ```rust
/// use envflag::{ResolveOption, Settings};
///
/// let settings = Settings::from_options(&[ResolveOption::RootRewrite]);
/// assert!(settings.root_rewrite);
/// assert!(!settings.trace);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Re-anchor file-indirection paths under [`ROOT_ENV`].
    pub root_rewrite: bool,
    /// Emit diagnostic trace events.
    pub trace: bool,
}

impl Settings {
    /// Builds settings from `options`.
    #[must_use]
    pub fn from_options(options: &[ResolveOption]) -> Self {
        options.iter().copied().collect()
    }

    /// Applies a single option.
    #[must_use]
    pub const fn with(mut self, option: ResolveOption) -> Self {
        match option {
            ResolveOption::RootRewrite => self.root_rewrite = true,
            ResolveOption::Trace => self.trace = true,
        }
        self
    }
}

impl FromIterator<ResolveOption> for Settings {
    fn from_iter<I: IntoIterator<Item = ResolveOption>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

/// Queries the argument, environment and file sources in precedence order.
#[derive(Clone, Copy)]
pub struct SourceResolver<'a> {
    args: &'a dyn ArgSource,
    env: &'a dyn EnvSource,
    files: &'a dyn FileSource,
}

impl<'a> SourceResolver<'a> {
    /// Creates a resolver over the given sources.
    #[must_use]
    pub const fn new(
        args: &'a dyn ArgSource,
        env: &'a dyn EnvSource,
        files: &'a dyn FileSource,
    ) -> Self {
        Self { args, env, files }
    }

    /// Returns the first non-empty raw value for the field `label`, or an
    /// empty string when no source has one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use envflag::{ArgList, CanonicalNames, MapEnv, MapFiles, Settings, SourceResolver};
    ///
    /// let args = ArgList::default();
    /// let env = MapEnv::new().with("DATABASE_URL", "pg://env");
    /// let files = MapFiles::new();
    /// let resolver = SourceResolver::new(&args, &env, &files);
    /// let names = CanonicalNames::derive("DatabaseURL");
    /// assert_eq!(resolver.resolve("DatabaseURL", &names, Settings::default()), "pg://env");
    /// ```
    #[must_use]
    pub fn resolve(&self, label: &str, names: &CanonicalNames, settings: Settings) -> String {
        self.from_args(label, names.active_flag(), settings)
            .or_else(|| self.from_env(label, names.active_env(), settings))
            .or_else(|| self.from_file(label, names.active_file_env(), settings))
            .unwrap_or_default()
    }

    fn from_args(&self, label: &str, flag: Option<&str>, settings: Settings) -> Option<String> {
        let Some(flag) = flag else {
            trace_skip(settings, label, "flag");
            return None;
        };
        let found = non_empty(self.args.lookup(flag));
        trace_lookup(settings, label, "flag", flag, found.as_deref());
        found
    }

    fn from_env(&self, label: &str, env: Option<&str>, settings: Settings) -> Option<String> {
        let Some(env) = env else {
            trace_skip(settings, label, "env");
            return None;
        };
        let found = non_empty(self.env.get(env));
        trace_lookup(settings, label, "env", env, found.as_deref());
        found
    }

    fn from_file(&self, label: &str, file_env: Option<&str>, settings: Settings) -> Option<String> {
        let Some(file_env) = file_env else {
            trace_skip(settings, label, "file env");
            return None;
        };
        let raw_path = non_empty(self.env.get(file_env));
        trace_lookup(settings, label, "file env", file_env, raw_path.as_deref());
        let owned = raw_path?;
        let path = Utf8Path::new(&owned);

        let result = match self.rewrite_root(settings) {
            Some(root) => self.files.read_under(Utf8Path::new(&root), path),
            None => self.files.read_all(path),
        };
        match result {
            Ok(content) => {
                let found = non_empty(Some(content));
                trace_lookup(settings, label, "file", path.as_str(), found.as_deref());
                found
            }
            Err(err) => {
                if settings.trace {
                    debug!(
                        target: TRACE_TARGET,
                        field = label,
                        path = %path,
                        error = %err,
                        "file-indirection read failed"
                    );
                }
                None
            }
        }
    }

    fn rewrite_root(&self, settings: Settings) -> Option<String> {
        if !settings.root_rewrite {
            return None;
        }
        let root = non_empty(self.env.get(ROOT_ENV));
        if settings.trace {
            debug!(
                target: TRACE_TARGET,
                root = root.as_deref(),
                "file-indirection root rewrite"
            );
        }
        root
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn trace_lookup(settings: Settings, label: &str, source: &str, name: &str, found: Option<&str>) {
    if settings.trace {
        debug!(
            target: TRACE_TARGET,
            field = label,
            source,
            name,
            value = found,
            "looked up {source} `{name}`"
        );
    }
}

fn trace_skip(settings: Settings, label: &str, source: &str) {
    if settings.trace {
        debug!(target: TRACE_TARGET, field = label, source, "{source} lookup disabled");
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for source precedence.

    use super::*;
    use crate::{ArgList, MapEnv, MapFiles};
    use rstest::{fixture, rstest};

    struct Sources {
        args: ArgList,
        env: MapEnv,
        files: MapFiles,
    }

    impl Sources {
        fn resolve(&self, names: &CanonicalNames, settings: Settings) -> String {
            SourceResolver::new(&self.args, &self.env, &self.files).resolve("x", names, settings)
        }
    }

    #[fixture]
    fn all_sources() -> Sources {
        Sources {
            args: ArgList::new(["-x=A"]),
            env: MapEnv::new()
                .with("X", "B")
                .with("X_FILE", "/run/secrets/x"),
            files: MapFiles::new().with("/run/secrets/x", "C"),
        }
    }

    #[fixture]
    fn names() -> CanonicalNames {
        CanonicalNames::derive("x")
    }

    #[rstest]
    fn precedence_cascades(mut all_sources: Sources, names: CanonicalNames) {
        let settings = Settings::default();
        assert_eq!(all_sources.resolve(&names, settings), "A");

        all_sources.args = ArgList::default();
        assert_eq!(all_sources.resolve(&names, settings), "B");

        all_sources.env.remove("X");
        assert_eq!(all_sources.resolve(&names, settings), "C");

        all_sources.files.remove(Utf8Path::new("/run/secrets/x"));
        assert_eq!(all_sources.resolve(&names, settings), "");
    }

    #[rstest]
    fn empty_values_fall_through(mut all_sources: Sources, names: CanonicalNames) {
        all_sources.args = ArgList::new(["-x="]);
        all_sources.env.set("X", "");
        assert_eq!(all_sources.resolve(&names, Settings::default()), "C");
    }

    #[rstest]
    fn skipped_sources_are_not_queried(all_sources: Sources) {
        let names = CanonicalNames {
            flag: "-".to_owned(),
            env: "-".to_owned(),
            file_env: "X_FILE".to_owned(),
        };
        assert_eq!(all_sources.resolve(&names, Settings::default()), "C");

        let none = CanonicalNames {
            flag: "-".to_owned(),
            env: "-".to_owned(),
            file_env: "-".to_owned(),
        };
        assert_eq!(all_sources.resolve(&none, Settings::default()), "");
    }

    #[rstest]
    fn root_rewrite_reads_under_presence_root(mut all_sources: Sources, names: CanonicalNames) {
        all_sources.args = ArgList::default();
        all_sources.env.remove("X");
        all_sources.env.set(ROOT_ENV, "/mnt/remote");
        all_sources
            .files
            .insert("/mnt/remote/run/secrets/x", "rooted");

        let rewritten = Settings::from_options(&[ResolveOption::RootRewrite]);
        assert_eq!(all_sources.resolve(&names, rewritten), "rooted");
        assert_eq!(all_sources.resolve(&names, Settings::default()), "C");
    }

    #[rstest]
    fn root_rewrite_without_presence_variable_uses_plain_path(
        mut all_sources: Sources,
        names: CanonicalNames,
    ) {
        all_sources.args = ArgList::default();
        all_sources.env.remove("X");
        let rewritten = Settings::from_options(&[ResolveOption::RootRewrite]);
        assert_eq!(all_sources.resolve(&names, rewritten), "C");
    }

    #[rstest]
    fn unreadable_file_is_absent(mut all_sources: Sources, names: CanonicalNames) {
        all_sources.args = ArgList::default();
        all_sources.env.remove("X");
        all_sources.env.set("X_FILE", "/does/not/exist");
        let traced = Settings::from_options(&[ResolveOption::Trace]);
        assert_eq!(all_sources.resolve(&names, traced), "");
    }

    #[test]
    fn settings_collect_options() {
        let settings = Settings::from_options(&[ResolveOption::Trace, ResolveOption::RootRewrite]);
        assert_eq!(
            settings,
            Settings {
                root_rewrite: true,
                trace: true
            }
        );
        assert_eq!(Settings::from_options(&[]), Settings::default());
    }
}
