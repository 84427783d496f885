//! Parameter sets and value parsing.
//!
//! Two parsing disciplines exist side by side:
//! - strict ([`ParameterSet::number`]): a malformed value is an error, used
//!   where acting on a guess would move the machine;
//! - lenient ([`ParameterSet::lenient`]): a malformed value becomes a
//!   documented default plus a [`ParamWarning`] the caller can surface.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::command::Command;
use crate::error::InterpreterError;

/// Parameters of one line, keyed by upper-case letter.
///
/// Keys are unique; when a line repeats a key the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: HashMap<char, String>,
}

impl ParameterSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one `<Key><Value>` token. Empty tokens are skipped.
    pub fn insert_token(&mut self, token: &str) {
        let token = token.trim().to_uppercase();
        let mut chars = token.chars();
        if let Some(key) = chars.next() {
            self.values.insert(key, chars.as_str().to_string());
        }
    }

    /// Set a value directly.
    pub fn insert(&mut self, key: char, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Raw value of a key.
    pub fn get(&self, key: char) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Whether the key was given (possibly with an empty value).
    pub fn contains(&self, key: char) -> bool {
        self.values.contains_key(&key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<char> {
        let mut keys: Vec<char> = self.values.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Strictly parse a finite number.
    ///
    /// Absent key → `Ok(None)`. Present but empty, non-numeric or
    /// non-finite → `MalformedParameter`.
    pub fn number(&self, command: &Command, key: char) -> Result<Option<f64>, InterpreterError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(InterpreterError::MalformedParameter {
                command: command.to_string(),
                key,
                value: raw.to_string(),
            }),
        }
    }

    /// Leniently parse a value, falling back to `default`.
    ///
    /// Absent key → `Parsed::Value(default)` with no warning.
    pub fn lenient<T>(&self, key: char, default: T) -> Parsed<T>
    where
        T: FromStr + fmt::Display,
    {
        match self.get(key) {
            None => Parsed::Value(default),
            Some(raw) => match raw.parse::<T>() {
                Ok(v) => Parsed::Value(v),
                Err(_) => Parsed::Fallback {
                    warning: ParamWarning {
                        key,
                        raw: raw.to_string(),
                        fallback: default.to_string(),
                    },
                    value: default,
                },
            },
        }
    }

    /// Lenient parse of a finite `f64`; non-finite values fall back too.
    pub fn lenient_finite(&self, key: char, default: f64) -> Parsed<f64> {
        match self.lenient(key, default) {
            Parsed::Value(v) if !v.is_finite() => Parsed::Fallback {
                warning: ParamWarning {
                    key,
                    raw: self.get(key).unwrap_or_default().to_string(),
                    fallback: default.to_string(),
                },
                value: default,
            },
            other => other,
        }
    }
}

impl<'a> FromIterator<&'a str> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(tokens: I) -> Self {
        let mut set = Self::new();
        for token in tokens {
            set.insert_token(token);
        }
        set
    }
}

/// A malformed value that was replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamWarning {
    /// Parameter key.
    pub key: char,
    /// Raw value as received.
    pub raw: String,
    /// Default used instead, formatted.
    pub fallback: String,
}

impl fmt::Display for ParamWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid value '{}' for {}, using {}",
            self.raw, self.key, self.fallback
        )
    }
}

/// Outcome of a lenient parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    /// The value parsed (or the key was absent and the default applies silently).
    Value(T),
    /// The value was malformed; `value` is the default.
    Fallback {
        /// Default in effect.
        value: T,
        /// What was replaced.
        warning: ParamWarning,
    },
}

impl<T> Parsed<T> {
    /// The value in effect, pushing any warning onto `warnings`.
    pub fn collect_into(self, warnings: &mut Vec<ParamWarning>) -> T {
        match self {
            Parsed::Value(v) => v,
            Parsed::Fallback { value, warning } => {
                warnings.push(warning);
                value
            }
        }
    }

    /// The value in effect.
    pub fn value(self) -> T {
        match self {
            Parsed::Value(v) | Parsed::Fallback { value: v, .. } => v,
        }
    }

    pub fn warning(&self) -> Option<&ParamWarning> {
        match self {
            Parsed::Value(_) => None,
            Parsed::Fallback { warning, .. } => Some(warning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(line: &str) -> ParameterSet {
        line.split_whitespace().collect()
    }

    #[test]
    fn tokens_are_uppercased_and_split() {
        let p = set("x50.0 Y25.0");
        assert_eq!(p.get('X'), Some("50.0"));
        assert_eq!(p.get('Y'), Some("25.0"));
        assert_eq!(p.keys(), vec!['X', 'Y']);
    }

    #[test]
    fn last_duplicate_wins() {
        let p = set("X1 X2 X3");
        assert_eq!(p.len(), 1);
        assert_eq!(p.get('X'), Some("3"));
    }

    #[test]
    fn bare_key_has_empty_value() {
        let p = set("X");
        assert!(p.contains('X'));
        assert_eq!(p.get('X'), Some(""));
    }

    #[test]
    fn strict_number() {
        let cmd = Command::parse("G1");
        let p = set("X10 Y Zabc Finf");
        assert_eq!(p.number(&cmd, 'X').unwrap(), Some(10.0));
        assert_eq!(p.number(&cmd, 'W').unwrap(), None);
        assert!(matches!(
            p.number(&cmd, 'Y'),
            Err(InterpreterError::MalformedParameter { key: 'Y', .. })
        ));
        assert!(p.number(&cmd, 'Z').is_err());
        assert!(p.number(&cmd, 'F').is_err());
    }

    #[test]
    fn lenient_absent_is_silent_default() {
        let p = set("");
        assert_eq!(p.lenient('R', 0u8), Parsed::Value(0));
    }

    #[test]
    fn lenient_malformed_falls_back_with_warning() {
        let p = set("Rxyz G300");
        let r = p.lenient('R', 0u8);
        assert_eq!(r.warning().unwrap().raw, "XYZ");
        assert_eq!(r.value(), 0);

        let mut warnings = Vec::new();
        let g = p.lenient('G', 0u8).collect_into(&mut warnings);
        assert_eq!(g, 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].to_string(), "invalid value '300' for G, using 0");
    }

    #[test]
    fn lenient_finite_rejects_nan() {
        let p = set("INAN I");
        // Last I wins: empty value.
        assert!(p.lenient_finite('I', 1.0).warning().is_some());

        let p = set("INAN");
        let parsed = p.lenient_finite('I', 1.0);
        assert_eq!(parsed.warning().unwrap().raw, "NAN");
        assert_eq!(parsed.value(), 1.0);
    }
}
