//! End-to-end resolution through `#[derive(Configure)]` with in-memory
//! sources.

use std::time::Duration;

use anyhow::{Result, ensure};
use envflag::{ArgList, Configure, MapEnv, MapFiles, RecordingRegistry, ResolveOption, Resolver};
use rstest::{fixture, rstest};
use url::Url;

#[derive(Debug, Clone, PartialEq, Configure)]
struct Service {
    pub x: String,
    #[envflag(flag = "listen.port")]
    pub port: u16,
    pub enabled: bool,
    pub text: String,
    #[envflag(separator = ";")]
    pub peers: Vec<String>,
    pub timeout: Duration,
    pub endpoint: Option<Url>,
    #[envflag(env = "-", file_env = "-")]
    pub flag_only: String,
    #[envflag(flag = "-")]
    pub env_only: i64,
    token: String,
}

impl Default for Service {
    fn default() -> Self {
        Self {
            x: "default".to_owned(),
            port: 8080,
            enabled: false,
            text: String::new(),
            peers: Vec::new(),
            timeout: Duration::from_secs(5),
            endpoint: None,
            flag_only: "flag-default".to_owned(),
            env_only: -1,
            token: "untouched".to_owned(),
        }
    }
}

#[fixture]
fn service() -> Service {
    Service::default()
}

fn run(args: &ArgList, env: &MapEnv, files: &MapFiles, target: &mut Service) -> Result<()> {
    let mut registry = RecordingRegistry::new();
    Resolver::new(args, env, files, &mut registry).resolve(target, &[])?;
    Ok(())
}

#[rstest]
#[case::argument_wins(&["-x=A"], Some("B"), Some("C"), "A")]
#[case::env_after_argument(&[], Some("B"), Some("C"), "B")]
#[case::file_after_env(&[], None, Some("C"), "C")]
#[case::default_when_nothing(&[], None, None, "default")]
#[case::empty_env_falls_through(&[], Some(""), Some("C"), "C")]
#[case::empty_file_keeps_default(&[], None, Some(""), "default")]
fn precedence_cascades(
    mut service: Service,
    #[case] args: &[&str],
    #[case] env_value: Option<&str>,
    #[case] file_value: Option<&str>,
    #[case] expected: &str,
) -> Result<()> {
    let args = ArgList::new(args.iter().copied());
    let mut env = MapEnv::new().with("X_FILE", "/run/secrets/x");
    if let Some(value) = env_value {
        env.set("X", value);
    }
    let mut files = MapFiles::new();
    if let Some(value) = file_value {
        files.insert("/run/secrets/x", value);
    }
    run(&args, &env, &files, &mut service)?;
    ensure!(service.x == expected, "expected {expected}, got {}", service.x);
    Ok(())
}

#[rstest]
fn every_shape_is_populated(mut service: Service) -> Result<()> {
    let args = ArgList::new(["--listen.port", "9000", "-enabled", "-text", "hello"]);
    let env = MapEnv::new()
        .with("PEERS", "a;b;c")
        .with("TIMEOUT", "1m30s")
        .with("ENDPOINT", "https://example.com/api")
        .with("ENV_ONLY", "42")
        .with("TOKEN", "leaked");
    run(&args, &env, &MapFiles::new(), &mut service)?;

    let expected = Service {
        port: 9000,
        enabled: true,
        text: "hello".to_owned(),
        peers: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
        timeout: Duration::from_secs(90),
        endpoint: Some(Url::parse("https://example.com/api")?),
        env_only: 42,
        ..Service::default()
    };
    ensure!(service == expected, "unexpected record {service:?}");
    Ok(())
}

#[rstest]
#[case::bare(&["-enabled"], true)]
#[case::explicit_false(&["-enabled", "false"], false)]
#[case::followed_by_flag(&["-enabled", "-text", "x"], true)]
#[case::joined(&["--enabled=true"], true)]
fn boolean_shorthand(
    mut service: Service,
    #[case] args: &[&str],
    #[case] expected: bool,
) -> Result<()> {
    service.enabled = !expected;
    let args = ArgList::new(args.iter().copied());
    run(&args, &MapEnv::new(), &MapFiles::new(), &mut service)?;
    ensure!(service.enabled == expected, "enabled should be {expected}");
    Ok(())
}

#[rstest]
fn negative_flag_values_are_consumed() -> Result<()> {
    #[derive(Debug, Default, Configure)]
    struct Offsets {
        pub offset: i64,
        pub ratio: f64,
    }

    let args = ArgList::new(["-offset", "-5", "--ratio", "-0.5"]);
    let mut offsets = Offsets {
        offset: 1,
        ratio: 1.0,
    };
    let mut registry = RecordingRegistry::new();
    Resolver::new(&args, &MapEnv::new(), &MapFiles::new(), &mut registry)
        .resolve(&mut offsets, &[])?;
    ensure!(offsets.offset == -5, "unexpected offset {}", offsets.offset);
    ensure!(
        offsets.ratio.to_string() == "-0.5",
        "unexpected ratio {}",
        offsets.ratio
    );
    Ok(())
}

#[rstest]
#[case::digit_on("1", true)]
#[case::digit_off("0", false)]
#[case::letter("T", true)]
#[case::upper("FALSE", false)]
#[case::title("True", true)]
fn boolean_words_from_env(
    mut service: Service,
    #[case] raw: &str,
    #[case] expected: bool,
) -> Result<()> {
    service.enabled = !expected;
    let env = MapEnv::new().with("ENABLED", raw);
    run(&ArgList::default(), &env, &MapFiles::new(), &mut service)?;
    ensure!(service.enabled == expected, "ENABLED={raw} should give {expected}");
    Ok(())
}

#[rstest]
fn skip_markers_disable_sources(mut service: Service) -> Result<()> {
    let args = ArgList::new(["-env.only=7"]);
    let env = MapEnv::new()
        .with("FLAG_ONLY", "from-env")
        .with("FLAG_ONLY_FILE", "/run/flag_only");
    let files = MapFiles::new().with("/run/flag_only", "from-file");
    run(&args, &env, &files, &mut service)?;
    ensure!(service.flag_only == "flag-default", "flag-only field read env or file");
    ensure!(service.env_only == -1, "flag disabled but still consulted");
    Ok(())
}

#[rstest]
fn list_drops_unparseable_elements() -> Result<()> {
    #[derive(Debug, Default, Configure)]
    struct Ports {
        pub ports: Vec<i32>,
    }

    let env = MapEnv::new().with("PORTS", "1,abc,3");
    let mut ports = Ports::default();
    let mut registry = RecordingRegistry::new();
    Resolver::new(&ArgList::default(), &env, &MapFiles::new(), &mut registry)
        .resolve(&mut ports, &[])?;
    ensure!(ports.ports == [1, 3], "unexpected list {:?}", ports.ports);
    Ok(())
}

#[rstest]
#[case::not_a_number("PORT", "eighty")]
#[case::out_of_range("PORT", "70000")]
#[case::negative_duration("TIMEOUT", "-5s")]
#[case::relative_url("ENDPOINT", "/relative")]
#[case::not_a_bool("ENABLED", "yes")]
fn unparseable_values_keep_defaults(
    mut service: Service,
    #[case] key: &str,
    #[case] value: &str,
) -> Result<()> {
    let env = MapEnv::new().with(key, value);
    run(&ArgList::default(), &env, &MapFiles::new(), &mut service)?;
    ensure!(service == Service::default(), "field changed for {key}={value}");
    Ok(())
}

#[rstest]
fn resolution_is_idempotent(mut service: Service) -> Result<()> {
    let args = ArgList::new(["-x", "A", "-enabled"]);
    let env = MapEnv::new()
        .with("PEERS", "p1;p2")
        .with("TIMEOUT", "250ms");
    let files = MapFiles::new();
    run(&args, &env, &files, &mut service)?;
    let first = service.clone();
    run(&args, &env, &files, &mut service)?;
    ensure!(service == first, "second pass changed the record");
    Ok(())
}

#[rstest]
fn private_fields_are_not_resolved(mut service: Service) -> Result<()> {
    let args = ArgList::new(["-token=flag"]);
    let env = MapEnv::new().with("TOKEN", "env");
    let mut registry = RecordingRegistry::new();
    Resolver::new(&args, &env, &MapFiles::new(), &mut registry).resolve(&mut service, &[])?;
    ensure!(service.token == "untouched", "private field was written");
    ensure!(
        registry.names().all(|name| name != "token"),
        "private field was registered"
    );
    Ok(())
}

#[rstest]
fn registration_uses_overrides_and_skips(mut service: Service) -> Result<()> {
    let mut registry = RecordingRegistry::new();
    Resolver::new(&ArgList::default(), &MapEnv::new(), &MapFiles::new(), &mut registry)
        .resolve(&mut service, &[ResolveOption::Trace])?;
    let names: Vec<&str> = registry.names().collect();
    let expected = [
        "x",
        "listen.port",
        "enabled",
        "text",
        "peers",
        "timeout",
        "endpoint",
        "flag.only",
    ];
    ensure!(names == expected, "unexpected registrations {names:?}");
    Ok(())
}
