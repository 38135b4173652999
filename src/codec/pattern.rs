//! Lazily compiled regexes for the string formats checked by the codec.

use std::sync::OnceLock;

use regex::Regex;

/// A regex compiled on first use and shared by every call afterwards.
pub(crate) struct Pattern {
    source: &'static str,
    compiled: OnceLock<Option<Regex>>,
}

impl Pattern {
    pub(crate) const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceLock::new(),
        }
    }

    /// A pattern that fails to compile matches nothing.
    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.compiled
            .get_or_init(|| Regex::new(self.source).ok())
            .as_ref()
            .is_some_and(|re| re.is_match(text))
    }
}

pub(crate) static HEX: Pattern = Pattern::new(r"^(?:[A-Fa-f0-9]{2})*$");

pub(crate) static UUID: Pattern = Pattern::new(
    r"^[A-Fa-f0-9]{8}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{12}$",
);

pub(crate) static DATE: Pattern = Pattern::new(r"^[0-9]{4}-[01][0-9]-[0123][0-9]$");

pub(crate) static DATETIME: Pattern = Pattern::new(
    r"^[0-9]{4}-[01][0-9]-[0123][0-9]T[012][0-9]:[0-6][0-9]:[0-6][0-9](\.[0-9]{1,6})?Z?$",
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest(
        input,
        expected,
        case("", true),
        case("00ff", true),
        case("ABcd", true),
        case("abc", false),
        case("zz", false)
    )]
    fn hex(input: &str, expected: bool) {
        assert_eq!(HEX.is_match(input), expected);
    }

    #[rstest(
        input,
        expected,
        case("2024-01-05T10:20:30", true),
        case("2024-01-05T10:20:30Z", true),
        case("2024-01-05T10:20:30.123456Z", true),
        case("2024-01-05T10:20:30.1234567", false),
        case("2024-01-05 10:20:30", false),
        case("2024-01-05T10:20", false)
    )]
    fn datetime(input: &str, expected: bool) {
        assert_eq!(DATETIME.is_match(input), expected);
    }

    #[test]
    fn date_and_uuid() {
        assert!(DATE.is_match("2024-01-05"));
        assert!(!DATE.is_match("2024-1-5"));
        assert!(UUID.is_match("A1B2C3D4-0000-0000-0000-000000000000"));
        assert!(!UUID.is_match("A1B2C3D4000000000000000000000000"));
    }
}
