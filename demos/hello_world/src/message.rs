//! Greeting planning and rendering for the `hello_world` demo.
use std::io::{self, Write};
use std::thread;

use crate::config::HelloWorldConfig;
use crate::error::ValidationError;

/// Tone of the greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Plain greeting ending in `!`.
    Standard,
    /// Upper-cased greeting.
    Enthusiastic,
    /// Greeting trailing off with an ellipsis.
    Quiet,
}

/// Computed greeting ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingPlan {
    message: String,
    mode: DeliveryMode,
    footer: Vec<String>,
}

impl GreetingPlan {
    /// Returns the formatted greeting message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the delivery mode.
    #[must_use]
    pub const fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Lines printed once after the greetings.
    #[must_use]
    pub fn footer(&self) -> &[String] {
        &self.footer
    }
}

fn validate(config: &HelloWorldConfig) -> Result<Vec<&str>, ValidationError> {
    if config.salutations.is_empty() {
        return Err(ValidationError::MissingSalutation);
    }
    let mut words = Vec::with_capacity(config.salutations.len());
    for (index, salutation) in config.salutations.iter().enumerate() {
        let word = salutation.trim();
        if word.is_empty() {
            return Err(ValidationError::BlankSalutation(index));
        }
        words.push(word);
    }
    if config.recipient.trim().is_empty() {
        return Err(ValidationError::BlankRecipient);
    }
    if config.is_excited && config.is_quiet {
        return Err(ValidationError::ConflictingDeliveryModes);
    }
    if config.repeat == 0 {
        return Err(ValidationError::ZeroRepeat);
    }
    Ok(words)
}

/// Builds a [`GreetingPlan`] from the resolved configuration.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the configuration is inconsistent.
///
/// # Examples
///
/// ```rust
/// use hello_world::config::HelloWorldConfig;
/// use hello_world::message::build_plan;
///
/// let config = HelloWorldConfig {
///     recipient: "Ada Lovelace".to_owned(),
///     ..HelloWorldConfig::default()
/// };
/// let plan = build_plan(&config)?;
/// assert_eq!(plan.message(), "Hello, Ada Lovelace!");
/// # Ok::<(), hello_world::error::ValidationError>(())
/// ```
pub fn build_plan(config: &HelloWorldConfig) -> Result<GreetingPlan, ValidationError> {
    let salutation = validate(config)?.join(" ");
    let base = format!("{salutation}, {}", config.recipient.trim());
    let mode = match (config.is_excited, config.is_quiet) {
        (true, _) => DeliveryMode::Enthusiastic,
        (_, true) => DeliveryMode::Quiet,
        _ => DeliveryMode::Standard,
    };
    let message = match mode {
        DeliveryMode::Standard => format!("{base}!"),
        DeliveryMode::Enthusiastic => format!("{}!", base.to_uppercase()),
        DeliveryMode::Quiet => format!("{base}..."),
    };
    let footer = [
        config.homepage.as_ref().map(|url| format!("See {url}")),
        Some(config.signature.trim_end().to_owned()).filter(|line| !line.is_empty()),
    ]
    .into_iter()
    .flatten()
    .collect();
    Ok(GreetingPlan {
        message,
        mode,
        footer,
    })
}

/// Prints the greeting `config.repeat` times, pausing between repeats.
///
/// # Errors
///
/// Returns an [`io::Error`] if writing to stdout fails.
pub fn print_plan(plan: &GreetingPlan, config: &HelloWorldConfig) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for round in 0..config.repeat {
        if round > 0 && !config.pause.is_zero() {
            thread::sleep(config.pause);
        }
        writeln!(stdout, "{}", plan.message())?;
    }
    for line in plan.footer() {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for greeting planning.

    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::{fixture, rstest};
    use url::Url;

    #[fixture]
    fn config() -> HelloWorldConfig {
        HelloWorldConfig {
            recipient: "Ada".to_owned(),
            ..HelloWorldConfig::default()
        }
    }

    #[rstest]
    #[case::standard(false, false, "Hello, Ada!", DeliveryMode::Standard)]
    #[case::excited(true, false, "HELLO, ADA!", DeliveryMode::Enthusiastic)]
    #[case::quiet(false, true, "Hello, Ada...", DeliveryMode::Quiet)]
    fn delivery_modes_shape_the_message(
        mut config: HelloWorldConfig,
        #[case] excited: bool,
        #[case] quiet: bool,
        #[case] expected: &str,
        #[case] mode: DeliveryMode,
    ) -> Result<()> {
        config.is_excited = excited;
        config.is_quiet = quiet;
        let plan = build_plan(&config)?;
        ensure!(plan.message() == expected, "got {}", plan.message());
        ensure!(plan.mode() == mode, "got {:?}", plan.mode());
        Ok(())
    }

    #[rstest]
    fn salutations_are_trimmed_and_joined(mut config: HelloWorldConfig) -> Result<()> {
        config.salutations = vec![" Hi ".to_owned(), "there".to_owned()];
        let plan = build_plan(&config)?;
        ensure!(plan.message() == "Hi there, Ada!", "got {}", plan.message());
        Ok(())
    }

    #[rstest]
    fn footer_lists_homepage_and_signature(mut config: HelloWorldConfig) -> Result<()> {
        config.homepage = Some(Url::parse("https://example.org/")?);
        config.signature = "-- envflag\n".to_owned();
        let plan = build_plan(&config)?;
        ensure!(
            plan.footer() == ["See https://example.org/", "-- envflag"],
            "got {:?}",
            plan.footer()
        );
        Ok(())
    }

    #[rstest]
    #[case::no_salutations(|c: &mut HelloWorldConfig| c.salutations.clear(), ValidationError::MissingSalutation)]
    #[case::blank_salutation(
        |c: &mut HelloWorldConfig| c.salutations.push("  ".to_owned()),
        ValidationError::BlankSalutation(1)
    )]
    #[case::blank_recipient(|c: &mut HelloWorldConfig| c.recipient = " ".to_owned(), ValidationError::BlankRecipient)]
    #[case::conflicting(
        |c: &mut HelloWorldConfig| {
            c.is_excited = true;
            c.is_quiet = true;
        },
        ValidationError::ConflictingDeliveryModes
    )]
    #[case::zero_repeat(|c: &mut HelloWorldConfig| c.repeat = 0, ValidationError::ZeroRepeat)]
    fn invalid_configs_are_rejected(
        mut config: HelloWorldConfig,
        #[case] mutate: fn(&mut HelloWorldConfig),
        #[case] expected: ValidationError,
    ) -> Result<()> {
        mutate(&mut config);
        let Err(err) = build_plan(&config) else {
            return Err(anyhow!("expected {expected:?}"));
        };
        ensure!(err == expected, "expected {expected:?}, got {err:?}");
        Ok(())
    }
}
