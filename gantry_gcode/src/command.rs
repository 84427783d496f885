//! Command identifiers.

use std::fmt;

/// Normalize a raw command spelling.
///
/// Trims, upper-cases, and drops the middle `0` of a three-character
/// identifier (`G01` → `G1`, `m05` → `M5`). Other lengths pass through.
/// Idempotent.
pub fn normalize(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let mut chars = upper.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some(family), Some('0'), Some(code), None) => {
            let mut out = String::with_capacity(2);
            out.push(family);
            out.push(code);
            out
        }
        _ => upper,
    }
}

/// A normalized command identifier, the dispatch key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Command(String);

impl Command {
    /// Normalize a raw spelling into a command.
    pub fn parse(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading family character, `None` for the empty command.
    pub fn family(&self) -> Option<char> {
        self.0.chars().next()
    }

    /// Whether the family is `G` or `M`.
    pub fn is_dispatchable(&self) -> bool {
        matches!(self.family(), Some('G' | 'M'))
    }

    /// True for the command produced by an empty line.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Command {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collapses_three_char_zero() {
        assert_eq!(normalize("G01"), "G1");
        assert_eq!(normalize("G1"), "G1");
        assert_eq!(normalize("M05"), "M5");
        assert_eq!(normalize("  g00 "), "G0");
    }

    #[test]
    fn other_lengths_pass_through() {
        assert_eq!(normalize("G10"), "G10");
        assert_eq!(normalize("G001"), "G001");
        assert_eq!(normalize("m150"), "M150");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn family() {
        assert_eq!(Command::parse("g28").family(), Some('G'));
        assert!(Command::parse("M150").is_dispatchable());
        assert!(!Command::parse("T1").is_dispatchable());
        assert!(!Command::parse("").is_dispatchable());
        assert!(Command::parse("").is_empty());
    }

    #[test]
    fn equal_after_normalization() {
        assert_eq!(Command::from("G01"), Command::from("g1"));
        assert_eq!(Command::from("G01").to_string(), "G1");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "[ a-zA-Z0-9]{0,6}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
