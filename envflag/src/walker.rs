//! The field walker: drives name derivation, flag registration, source
//! resolution and coercion over every field of a record.

use tracing::debug;

use crate::naming::CanonicalNames;
use crate::resolve::{ResolveOption, Settings, SourceResolver};
use crate::sources::{ArgSource, EnvSource, FileSource, FlagRegistry, FlagSpec};
use crate::{FieldDescriptor, Record, Target, TargetKindError, coerce};

const TRACE_TARGET: &str = "envflag::walker";

/// Populates records from a fixed set of sources.
///
/// # Examples
///
/// ```rust
/// use envflag::{ArgList, Configure, MapEnv, MapFiles, RecordingRegistry, Resolver};
///
/// #[derive(Configure)]
/// struct Server {
///     pub port: u16,
///     pub verbose: bool,
/// }
///
/// let args = ArgList::new(["-verbose"]);
/// let env = MapEnv::new().with("PORT", "9090");
/// let files = MapFiles::new();
/// let mut registry = RecordingRegistry::new();
///
/// let mut server = Server { port: 8080, verbose: false };
/// Resolver::new(&args, &env, &files, &mut registry).resolve(&mut server, &[])?;
/// assert_eq!(server.port, 9090);
/// assert!(server.verbose);
/// # Ok::<(), envflag::TargetKindError>(())
/// ```
pub struct Resolver<'a> {
    sources: SourceResolver<'a>,
    registry: &'a mut dyn FlagRegistry,
}

impl<'a> Resolver<'a> {
    /// Creates a walker over the given sources and registry.
    #[must_use]
    pub const fn new(
        args: &'a dyn ArgSource,
        env: &'a dyn EnvSource,
        files: &'a dyn FileSource,
        registry: &'a mut dyn FlagRegistry,
    ) -> Self {
        Self {
            sources: SourceResolver::new(args, env, files),
            registry,
        }
    }

    /// Resolves every writable field of `target`.
    ///
    /// Fields with no value from any source, or whose value fails to parse,
    /// keep their current contents.
    ///
    /// # Errors
    ///
    /// Returns [`TargetKindError`] without touching any field when `target`
    /// is not a mutable reference to a record.
    pub fn resolve<T: Target>(
        &mut self,
        target: T,
        options: &[ResolveOption],
    ) -> Result<(), TargetKindError> {
        self.walk(target, Settings::from_options(options))
    }

    /// Like [`Resolver::resolve`], with tracing enabled for this call.
    ///
    /// # Errors
    ///
    /// Returns [`TargetKindError`] when `target` is not a mutable reference
    /// to a record.
    pub fn resolve_with_trace<T: Target>(
        &mut self,
        target: T,
        options: &[ResolveOption],
    ) -> Result<(), TargetKindError> {
        self.walk(
            target,
            Settings::from_options(options).with(ResolveOption::Trace),
        )
    }

    fn walk<T: Target>(&mut self, mut target: T, settings: Settings) -> Result<(), TargetKindError> {
        let record = match target.as_record() {
            Ok(record) => record,
            Err(err) => {
                if settings.trace {
                    debug!(target: TRACE_TARGET, error = %err, "rejected resolution target");
                }
                return Err(err);
            }
        };
        let name = record.record_name();
        for (index, field) in record.fields().iter().enumerate() {
            if !field.is_writable() {
                if settings.trace {
                    debug!(target: TRACE_TARGET, record = name, field = field.ident(), "skipping read-only field");
                }
                continue;
            }
            self.resolve_field(record, index, field, settings);
        }
        Ok(())
    }

    fn resolve_field(
        &mut self,
        record: &mut dyn Record,
        index: usize,
        field: &FieldDescriptor,
        settings: Settings,
    ) {
        let label = field.ident();
        let names = CanonicalNames::for_field(field);
        self.register(record, index, label, &names);

        let raw = self.sources.resolve(label, &names, settings);
        if raw.is_empty() {
            if settings.trace {
                debug!(target: TRACE_TARGET, field = label, "no source matched, keeping default");
            }
            return;
        }
        let assigned = coerce(&raw, field.shape(), field.separator())
            .is_some_and(|value| record.assign(index, value));
        if settings.trace {
            debug!(
                target: TRACE_TARGET,
                field = label,
                shape = ?field.shape(),
                assigned,
                "coerced resolved value"
            );
        }
    }

    fn register(&mut self, record: &dyn Record, index: usize, label: &str, names: &CanonicalNames) {
        let Some(flag) = names.active_flag() else {
            return;
        };
        if self.registry.is_registered(flag) {
            return;
        }
        self.registry.register(FlagSpec {
            name: flag.to_owned(),
            label: label.to_owned(),
            env: names.active_env().map(str::to_owned),
            file_env: names.active_file_env().map(str::to_owned),
            default: record.default_display(index),
        });
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the field walker using a hand-written record.

    use super::*;
    use crate::{ArgList, FromValue, MapEnv, MapFiles, RecordingRegistry, ScalarKind, Shape, Value};

    #[derive(Debug, Default, PartialEq)]
    struct Manual {
        port: u16,
        hosts: Vec<String>,
        secret: String,
    }

    const MANUAL_FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::new("port", Shape::Scalar(ScalarKind::U16)),
        FieldDescriptor::new("hosts", Shape::List(ScalarKind::String)).with_separator(";"),
        FieldDescriptor::new("secret", Shape::Scalar(ScalarKind::String)).read_only(),
    ];

    impl Record for Manual {
        fn record_name(&self) -> &'static str {
            "Manual"
        }

        fn fields(&self) -> &'static [FieldDescriptor] {
            MANUAL_FIELDS
        }

        fn assign(&mut self, index: usize, value: Value) -> bool {
            match index {
                0 => FromValue::from_value(value).map(|v| self.port = v).is_some(),
                1 => FromValue::from_value(value).map(|v| self.hosts = v).is_some(),
                2 => FromValue::from_value(value).map(|v| self.secret = v).is_some(),
                _ => false,
            }
        }

        fn default_display(&self, index: usize) -> Option<String> {
            match index {
                0 => Some(format!("{:?}", self.port)),
                1 => Some(format!("{:?}", self.hosts)),
                2 => Some(format!("{:?}", self.secret)),
                _ => None,
            }
        }
    }

    #[test]
    fn walks_fields_and_skips_read_only() {
        let args = ArgList::new(["-port", "81"]);
        let env = MapEnv::new()
            .with("HOSTS", "a;b")
            .with("SECRET", "leaked");
        let files = MapFiles::new();
        let mut registry = RecordingRegistry::new();

        let mut manual = Manual {
            secret: "kept".to_owned(),
            ..Manual::default()
        };
        let result = Resolver::new(&args, &env, &files, &mut registry).resolve(&mut manual, &[]);
        assert_eq!(result, Ok(()));
        assert_eq!(
            manual,
            Manual {
                port: 81,
                hosts: vec!["a".to_owned(), "b".to_owned()],
                secret: "kept".to_owned(),
            }
        );
        assert_eq!(registry.names().collect::<Vec<_>>(), ["port", "hosts"]);
    }

    #[test]
    fn unparseable_scalar_keeps_default() {
        let args = ArgList::default();
        let env = MapEnv::new().with("PORT", "eighty");
        let files = MapFiles::new();
        let mut registry = RecordingRegistry::new();

        let mut manual = Manual {
            port: 8080,
            ..Manual::default()
        };
        let result =
            Resolver::new(&args, &env, &files, &mut registry).resolve_with_trace(&mut manual, &[]);
        assert_eq!(result, Ok(()));
        assert_eq!(manual.port, 8080);
    }

    #[test]
    fn registration_records_defaults_before_resolution() {
        let args = ArgList::new(["-port=1"]);
        let env = MapEnv::new();
        let files = MapFiles::new();
        let mut registry = RecordingRegistry::new();

        let mut manual = Manual {
            port: 8080,
            ..Manual::default()
        };
        let result = Resolver::new(&args, &env, &files, &mut registry).resolve(&mut manual, &[]);
        assert_eq!(result, Ok(()));
        let port = registry.specs().first().cloned();
        assert_eq!(
            port,
            Some(FlagSpec {
                name: "port".to_owned(),
                label: "port".to_owned(),
                env: Some("PORT".to_owned()),
                file_env: Some("PORT_FILE".to_owned()),
                default: Some("8080".to_owned()),
            })
        );
    }

    #[test]
    fn rejects_non_record_targets() {
        let args = ArgList::default();
        let env = MapEnv::new().with("PORT", "1");
        let files = MapFiles::new();
        let mut registry = RecordingRegistry::new();
        let mut resolver = Resolver::new(&args, &env, &files, &mut registry);

        let mut port = 7_u16;
        assert!(matches!(
            resolver.resolve(&mut port, &[]),
            Err(TargetKindError::NotRecord { .. })
        ));
        assert!(matches!(
            resolver.resolve(port, &[]),
            Err(TargetKindError::NotReference { .. })
        ));
        assert_eq!(port, 7);
        assert_eq!(registry.specs().len(), 0);
    }
}
