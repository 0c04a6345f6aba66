//! Ordered classification rules.
//!
//! A rule set expands into one list evaluated top to bottom: every known
//! code as an exact match, then every known code case-folded, then the fuzzy
//! substrings against a normalized form of the input. The first match wins;
//! a miss falls back to the set's default with a warning.

use std::fmt::Debug;

use tracing::warn;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Lower-case, strip diacritics, drop `_`, `-` and whitespace.
pub fn normalize(code: &str) -> String {
    code.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matcher {
    Exact(&'static str),
    CaseFolded(&'static str),
    Normalized(&'static str),
}

struct Subject<'a> {
    raw: &'a str,
    folded: String,
    normalized: String,
}

impl Matcher {
    fn matches(&self, subject: &Subject<'_>) -> bool {
        match *self {
            Matcher::Exact(code) => subject.raw == code,
            Matcher::CaseFolded(code) => subject.folded == code.to_lowercase(),
            Matcher::Normalized(needle) => {
                !subject.normalized.is_empty() && subject.normalized.contains(needle)
            }
        }
    }
}

pub struct RuleSet<C: 'static> {
    pub domain: &'static str,
    pub codes: &'static [(&'static str, C)],
    pub fuzzy: &'static [(&'static str, C)],
    pub fallback: C,
}

impl<C: Copy + Debug> RuleSet<C> {
    /// Rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = (Matcher, C)> + '_ {
        let exact = self.codes.iter().map(|&(code, c)| (Matcher::Exact(code), c));
        let folded = self.codes.iter().map(|&(code, c)| (Matcher::CaseFolded(code), c));
        let fuzzy = self.fuzzy.iter().map(|&(needle, c)| (Matcher::Normalized(needle), c));

        exact.chain(folded).chain(fuzzy)
    }

    /// First matching category, if any.
    pub fn lookup(&self, code: &str) -> Option<C> {
        let raw = code.trim();
        let subject = Subject {
            raw,
            folded: raw.to_lowercase(),
            normalized: normalize(raw),
        };

        self.rules()
            .find(|(matcher, _)| matcher.matches(&subject))
            .map(|(_, category)| category)
    }

    pub fn classify(&self, code: &str) -> C {
        self.lookup(code).unwrap_or_else(|| {
            warn!(domain = self.domain, code, "unrecognised code, using default style");
            self.fallback
        })
    }
}
