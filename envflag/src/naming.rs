//! Canonical external names for configuration fields.
//!
//! A field identifier is split into words and re-joined three ways:
//!
//! | identifier    | flag           | env            | file env            |
//! |---------------|----------------|----------------|---------------------|
//! | `DatabaseURL` | `database.url` | `DATABASE_URL` | `DATABASE_URL_FILE` |
//! | `peer_count`  | `peer.count`   | `PEER_COUNT`   | `PEER_COUNT_FILE`   |

use crate::FieldDescriptor;

/// Override value that disables a source for a field.
pub const SKIP_MARKER: &str = "-";

const FILE_SUFFIX: &str = "_FILE";

/// Splits `identifier` into case-delimited words.
///
/// A lower-to-upper transition starts a new word. An upper-to-lower transition
/// moves the last capital of an acronym run onto the following word, so
/// `DBEndpoints` yields `DB` and `Endpoints`. Digits never start or end a
/// word, so `Md5sum` stays whole. Underscores separate words and are not part
/// of any of them.
///
/// # Examples
///
/// ```rust
/// use envflag::naming::tokenize;
///
/// assert_eq!(tokenize("DatabaseURL"), ["Database", "URL"]);
/// assert_eq!(tokenize("DBEndpoints"), ["DB", "Endpoints"]);
/// assert_eq!(tokenize("peer_count"), ["peer", "count"]);
/// ```
#[must_use]
pub fn tokenize(identifier: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for segment in identifier.split('_') {
        split_case(segment, &mut tokens);
    }
    tokens
}

fn split_case<'a>(segment: &'a str, tokens: &mut Vec<&'a str>) {
    let mut start = 0;
    let mut previous: Option<(usize, char)> = None;
    for (idx, ch) in segment.char_indices() {
        if let Some((prev_idx, prev_ch)) = previous {
            if prev_ch.is_lowercase() && ch.is_uppercase() {
                push_token(segment, start, idx, tokens);
                start = idx;
            } else if prev_ch.is_uppercase() && ch.is_lowercase() {
                push_token(segment, start, prev_idx, tokens);
                start = prev_idx;
            }
        }
        previous = Some((idx, ch));
    }
    push_token(segment, start, segment.len(), tokens);
}

fn push_token<'a>(segment: &'a str, start: usize, end: usize, tokens: &mut Vec<&'a str>) {
    if let Some(token) = segment.get(start..end).filter(|token| !token.is_empty()) {
        tokens.push(token);
    }
}

/// Derives the command-line flag name: words joined by `.`, lower-cased.
#[must_use]
pub fn flag_name(identifier: &str) -> String {
    tokenize(identifier).join(".").to_lowercase()
}

/// Derives the environment variable name: words joined by `_`, upper-cased.
#[must_use]
pub fn env_name(identifier: &str) -> String {
    tokenize(identifier).join("_").to_uppercase()
}

/// Derives the name of the variable holding a path to the value's file.
#[must_use]
pub fn file_env_name(identifier: &str) -> String {
    let mut name = env_name(identifier);
    name.push_str(FILE_SUFFIX);
    name
}

/// Returns `true` when `name` disables its source.
#[must_use]
pub fn is_skipped(name: &str) -> bool {
    name == SKIP_MARKER
}

/// The three external names a field is looked up under.
///
/// Any of them may be [`SKIP_MARKER`] when the field opts out of a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalNames {
    /// Command-line flag name, without leading dashes.
    pub flag: String,
    /// Environment variable holding the value.
    pub env: String,
    /// Environment variable holding a path to a file with the value.
    pub file_env: String,
}

impl CanonicalNames {
    /// Derives all three names from `identifier`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use envflag::CanonicalNames;
    ///
    /// let names = CanonicalNames::derive("DatabaseURL");
    /// assert_eq!(names.flag, "database.url");
    /// assert_eq!(names.env, "DATABASE_URL");
    /// assert_eq!(names.file_env, "DATABASE_URL_FILE");
    /// ```
    #[must_use]
    pub fn derive(identifier: &str) -> Self {
        Self {
            flag: flag_name(identifier),
            env: env_name(identifier),
            file_env: file_env_name(identifier),
        }
    }

    /// Names for `field`, honouring its explicit overrides.
    #[must_use]
    pub fn for_field(field: &FieldDescriptor) -> Self {
        let ident = field.ident();
        Self {
            flag: field
                .flag_override()
                .map_or_else(|| flag_name(ident), str::to_owned),
            env: field
                .env_override()
                .map_or_else(|| env_name(ident), str::to_owned),
            file_env: field
                .file_env_override()
                .map_or_else(|| file_env_name(ident), str::to_owned),
        }
    }

    /// The flag name, unless the flag source is disabled.
    #[must_use]
    pub fn active_flag(&self) -> Option<&str> {
        active(&self.flag)
    }

    /// The environment name, unless the environment source is disabled.
    #[must_use]
    pub fn active_env(&self) -> Option<&str> {
        active(&self.env)
    }

    /// The file-indirection name, unless that source is disabled.
    #[must_use]
    pub fn active_file_env(&self) -> Option<&str> {
        active(&self.file_env)
    }
}

fn active(name: &str) -> Option<&str> {
    (!is_skipped(name)).then_some(name)
}
