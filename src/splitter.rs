//! Array boundary recovery.
//!
//! The export writes its three JSON arrays back to back, separated by a
//! `]`/`[` pair with inconsistent whitespace. Each [`SplitStrategy`] is a pure
//! function from the raw text to exactly three parts; the first strategy that
//! succeeds wins. The brackets at the boundaries are consumed by the split and
//! restored by [`crate::metadata`].

use crate::error::{GenerateError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Literal `" ] ["`
    Spaced,
    /// Literal `"]["`
    Adjacent,
    /// `]`, optional whitespace, `[`
    Pattern,
}

impl SplitStrategy {
    /// Strategies in the order they are tried.
    pub const CHAIN: [SplitStrategy; 3] = [
        SplitStrategy::Spaced,
        SplitStrategy::Adjacent,
        SplitStrategy::Pattern,
    ];

    /// All parts produced by this strategy, however many there are.
    pub fn parts<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            SplitStrategy::Spaced => text.split(" ] [").collect(),
            SplitStrategy::Adjacent => text.split("][").collect(),
            SplitStrategy::Pattern => boundary_pattern().split(text).collect(),
        }
    }

    /// The three arrays, or `None` when this strategy finds any other count.
    pub fn split<'a>(&self, text: &'a str) -> Option<[&'a str; 3]> {
        match self.parts(text).as_slice() {
            [columns, foreign_keys, triggers] => Some([*columns, *foreign_keys, *triggers]),
            _ => None,
        }
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitStrategy::Spaced => write!(f, "spaced separator"),
            SplitStrategy::Adjacent => write!(f, "adjacent separator"),
            SplitStrategy::Pattern => write!(f, "whitespace pattern"),
        }
    }
}

fn boundary_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\]\s*\[").expect("boundary pattern is valid"))
}

/// Split the raw export into its column, foreign-key and trigger arrays.
///
/// # Errors
///
/// Returns [`GenerateError::Split`] with the part count of the last strategy
/// tried when no strategy yields exactly three parts.
pub fn split_arrays(text: &str) -> Result<(SplitStrategy, [&str; 3])> {
    let mut found = 0;
    for strategy in SplitStrategy::CHAIN {
        match strategy.parts(text).as_slice() {
            [columns, foreign_keys, triggers] => {
                log::debug!("split export using {}", strategy);
                return Ok((strategy, [*columns, *foreign_keys, *triggers]));
            }
            parts => found = parts.len(),
        }
    }
    Err(GenerateError::Split { parts: found })
}
