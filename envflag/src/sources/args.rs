//! Flag lookup over a raw argument list.

use super::ArgSource;

const TERMINATOR: &str = "--";
const IMPLIED_VALUE: &str = "true";

/// Raw command-line arguments, excluding the program name.
///
/// Lookup accepts `-name` and `--name`, with the value either joined by `=`
/// or given as the next argument. A flag followed by nothing, by `--`, or by
/// another flag reads as `"true"`. A following argument only counts as a flag
/// when a letter comes straight after its dashes, so `-offset -5` binds
/// `"-5"`. The first occurrence wins and scanning stops at a bare `--`.
///
/// # Examples
///
/// ```rust
/// use envflag::{ArgList, ArgSource};
///
/// let args = ArgList::new(["-enabled", "--port=8080", "-name", "demo"]);
/// assert_eq!(args.lookup("enabled").as_deref(), Some("true"));
/// assert_eq!(args.lookup("port").as_deref(), Some("8080"));
/// assert_eq!(args.lookup("name").as_deref(), Some("demo"));
/// assert_eq!(args.lookup("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList {
    args: Vec<String>,
}

impl ArgList {
    /// Wraps an explicit argument list.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Captures the current process arguments, skipping the program name.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::args().skip(1))
    }

    /// The wrapped arguments.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }
}

impl ArgSource for ArgList {
    fn lookup(&self, name: &str) -> Option<String> {
        let mut iter = self.args.iter().peekable();
        while let Some(arg) = iter.next() {
            if arg == TERMINATOR {
                break;
            }
            let Some(body) = flag_body(arg) else {
                continue;
            };
            let (key, inline) = match body.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (body, None),
            };
            if key != name {
                continue;
            }
            if let Some(value) = inline {
                return Some(value.to_owned());
            }
            let value = iter
                .peek()
                .filter(|next| next.as_str() != TERMINATOR && !is_flag_shaped(next))
                .map_or_else(|| IMPLIED_VALUE.to_owned(), |next| (*next).clone());
            return Some(value);
        }
        None
    }
}

/// Strips one or two leading dashes, rejecting arguments that are not flags.
fn flag_body(arg: &str) -> Option<&str> {
    let body = arg
        .strip_prefix(TERMINATOR)
        .or_else(|| arg.strip_prefix('-'))?;
    (!body.is_empty() && !body.starts_with('-')).then_some(body)
}

/// Whether `arg` names a flag rather than carrying a value such as `-5`.
fn is_flag_shaped(arg: &str) -> bool {
    arg.strip_prefix(TERMINATOR)
        .or_else(|| arg.strip_prefix('-'))
        .and_then(|body| body.chars().next())
        .is_some_and(|first| first.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    //! Unit tests for flag lookup semantics.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::single_dash_equals(&["-x=A"], "x", Some("A"))]
    #[case::double_dash_equals(&["--x=A"], "x", Some("A"))]
    #[case::single_dash_space(&["-x", "A"], "x", Some("A"))]
    #[case::double_dash_space(&["--x", "A"], "x", Some("A"))]
    #[case::empty_inline(&["-x="], "x", Some(""))]
    #[case::inline_keeps_equals(&["-dsn=a=b"], "dsn", Some("a=b"))]
    #[case::bare_flag(&["-enabled"], "enabled", Some("true"))]
    #[case::explicit_false(&["-enabled", "false"], "enabled", Some("false"))]
    #[case::next_is_flag(&["-enabled", "-text", "x"], "enabled", Some("true"))]
    #[case::value_after_other_flag(&["-enabled", "-text", "x"], "text", Some("x"))]
    #[case::first_wins(&["-x=1", "-x=2"], "x", Some("1"))]
    #[case::dotted(&["--database.url", "pg://h"], "database.url", Some("pg://h"))]
    #[case::absent(&["-y=1"], "x", None)]
    #[case::positional_not_a_flag(&["x"], "x", None)]
    #[case::prefix_is_not_match(&["-xy=1"], "x", None)]
    #[case::after_terminator(&["--", "-x=1"], "x", None)]
    #[case::negative_value(&["-offset", "-5"], "offset", Some("-5"))]
    #[case::negative_fraction(&["--ratio", "-1.5"], "ratio", Some("-1.5"))]
    #[case::lone_dash_value(&["-input", "-"], "input", Some("-"))]
    #[case::double_dash_flag_follows(&["-enabled", "--port=1"], "enabled", Some("true"))]
    #[case::terminator_follows(&["-enabled", "--", "x"], "enabled", Some("true"))]
    #[case::triple_dash(&["---x=1"], "x", None)]
    fn looks_up_flags(#[case] args: &[&str], #[case] name: &str, #[case] expected: Option<&str>) {
        let list = ArgList::new(args.iter().copied());
        assert_eq!(list.lookup(name).as_deref(), expected);
    }
}
