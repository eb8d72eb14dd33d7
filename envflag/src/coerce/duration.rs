//! Parser for unit-suffixed duration strings.
//!
//! The grammar is an optional sign followed by one or more `<number><unit>`
//! components, e.g. `300ms`, `-1.5h` or `2h45m`. Numbers may carry a decimal
//! fraction. Recognised units are `ns`, `us` (also `µs`/`μs`), `ms`, `s`, `m`
//! and `h`. A bare `0` is accepted without a unit.

const UNITS: [(&str, u64); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

/// Longest fraction kept when scaling; further digits are below a nanosecond
/// for every unit.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses `input` into a signed count of nanoseconds.
///
/// Returns `None` for malformed input, unknown or missing units, and values
/// outside the `i64` range.
///
/// # Examples
///
/// ```rust
/// use envflag::parse_duration;
///
/// assert_eq!(parse_duration("90m"), Some(5_400_000_000_000));
/// assert_eq!(parse_duration("1h30m"), Some(5_400_000_000_000));
/// assert_eq!(parse_duration("-1.5s"), Some(-1_500_000_000));
/// assert_eq!(parse_duration("15"), None);
/// ```
#[must_use]
pub fn parse_duration(input: &str) -> Option<i64> {
    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(unsigned) => (true, unsigned),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if rest == "0" {
        return Some(0);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = take_digits(rest);
        let (fraction, after_fraction) = match after_whole.strip_prefix('.') {
            Some(tail) => take_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let unit_end = after_fraction
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_fraction.len());
        let (unit, tail) = after_fraction.split_at_checked(unit_end)?;
        let scale = unit_scale(unit)?;

        let whole_nanos = if whole.is_empty() {
            0
        } else {
            whole.parse::<u64>().ok()?.checked_mul(scale)?
        };
        let component = whole_nanos.checked_add(fraction_nanos(fraction, scale)?)?;
        total = total.checked_add(component)?;
        rest = tail;
    }

    let magnitude = i64::try_from(total).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn take_digits(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    input.split_at_checked(end).unwrap_or((input, ""))
}

fn unit_scale(unit: &str) -> Option<u64> {
    UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, scale)| *scale)
}

fn fraction_nanos(fraction: &str, scale: u64) -> Option<u64> {
    let digits = fraction.get(..MAX_FRACTION_DIGITS).unwrap_or(fraction);
    if digits.is_empty() {
        return Some(0);
    }
    let numerator: u128 = digits.parse().ok()?;
    let denominator = 10_u128.checked_pow(u32::try_from(digits.len()).ok()?)?;
    let scaled = numerator
        .checked_mul(u128::from(scale))?
        .checked_div(denominator)?;
    u64::try_from(scaled).ok()
}
