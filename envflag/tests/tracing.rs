//! Diagnostic trace output is opt-in per call.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Result, ensure};
use envflag::{ArgList, Configure, MapEnv, MapFiles, RecordingRegistry, ResolveOption, Resolver};
use rstest::rstest;
use tracing::Level;

#[derive(Debug, Default, Configure)]
struct Probe {
    pub level: String,
    pub secret_path: String,
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

fn resolve(options: &[ResolveOption], traced: bool) -> String {
    let env = MapEnv::new()
        .with("LEVEL", "debug")
        .with("SECRET_PATH_FILE", "/missing/secret");
    capture(|| {
        let args = ArgList::default();
        let files = MapFiles::new();
        let mut probe = Probe::default();
        let mut registry = RecordingRegistry::new();
        let mut resolver = Resolver::new(&args, &env, &files, &mut registry);
        let outcome = if traced {
            resolver.resolve_with_trace(&mut probe, options)
        } else {
            resolver.resolve(&mut probe, options)
        };
        assert!(outcome.is_ok());
    })
}

#[rstest]
#[case::trace_entry_point(&[], true)]
#[case::trace_option(&[ResolveOption::Trace], false)]
fn tracing_reports_each_source(
    #[case] options: &[ResolveOption],
    #[case] traced: bool,
) -> Result<()> {
    let output = resolve(options, traced);
    ensure!(output.contains("envflag::resolve"), "missing resolve events:\n{output}");
    ensure!(output.contains("envflag::walker"), "missing walker events:\n{output}");
    ensure!(output.contains("LEVEL"), "env lookup not traced:\n{output}");
    ensure!(
        output.contains("file-indirection read failed"),
        "file failure not traced:\n{output}"
    );
    Ok(())
}

#[rstest]
fn untraced_resolution_is_silent() -> Result<()> {
    let output = resolve(&[], false);
    ensure!(output.is_empty(), "unexpected trace output:\n{output}");
    Ok(())
}
