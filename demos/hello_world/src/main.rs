//! Hello World demo entry-point: resolve config, build the greeting, print it.

use clap::error::ErrorKind;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use hello_world::config;
use hello_world::error::HelloWorldError;
use hello_world::message::{build_plan, print_plan};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    let settings = match config::load() {
        Ok(settings) => settings,
        Err(HelloWorldError::Cli(err))
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
        {
            err.exit()
        }
        Err(err) => return Err(err.into()),
    };
    let plan = build_plan(&settings).map_err(HelloWorldError::from)?;
    print_plan(&plan, &settings)?;
    Ok(())
}

/// Resolution traces are emitted at debug level, so `--trace.config` output
/// only appears with `RUST_LOG=debug` or finer.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
