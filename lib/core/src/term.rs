//! Academic terms and their recency ordering.
//!
//! A term key such as `js2-1-2425` names one term of one cohort in one
//! academic year: class segment, term number within the year, and the
//! two-year pair the session spans. Recency ordering compares academic
//! year first, then term, then cohort, so the newest report a subject
//! has is always the maximum of their term keys.

use crate::error::ParseKeyError;
use crate::level::ClassLevel;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An academic year pair, e.g. 2024/2025, keyed by its starting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct AcademicYear(u16);

impl AcademicYear {
    /// Creates an academic year from its starting calendar year.
    #[must_use]
    pub const fn starting(year: u16) -> Self {
        Self(year)
    }

    /// Returns the starting calendar year, e.g. 2024 for 2024/2025.
    #[must_use]
    pub fn start(&self) -> u16 {
        self.0
    }

    /// Returns the long form, e.g. `2024/2025`.
    #[must_use]
    pub fn display_long(&self) -> String {
        format!("{}/{}", self.0, self.0 + 1)
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.0 % 100, (self.0 + 1) % 100)
    }
}

impl FromStr for AcademicYear {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseKeyError::new(
                "AcademicYear",
                format!("expected four digits, got {code:?}"),
            ));
        }
        let first: u16 = code[..2].parse().map_err(|_| {
            ParseKeyError::new("AcademicYear", format!("invalid year pair {code:?}"))
        })?;
        let second: u16 = code[2..].parse().map_err(|_| {
            ParseKeyError::new("AcademicYear", format!("invalid year pair {code:?}"))
        })?;
        if second != (first + 1) % 100 {
            return Err(ParseKeyError::new(
                "AcademicYear",
                format!("years not consecutive in {code:?}"),
            ));
        }
        Ok(Self(2000 + first))
    }
}

impl TryFrom<String> for AcademicYear {
    type Error = ParseKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AcademicYear> for String {
    fn from(year: AcademicYear) -> Self {
        year.to_string()
    }
}

/// One of the three terms of an academic year, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    First,
    Second,
    Third,
}

impl Term {
    /// The term's number within the year, 1 to 3.
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            Term::First => 1,
            Term::Second => 2,
            Term::Third => 3,
        }
    }

    /// The ordinal name used on report cards, e.g. `First Term`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Term::First => "First Term",
            Term::Second => "Second Term",
            Term::Third => "Third Term",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for Term {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Term::First),
            "2" => Ok(Term::Second),
            "3" => Ok(Term::Third),
            other => Err(ParseKeyError::new(
                "Term",
                format!("term number {other:?} out of range 1..=3"),
            )),
        }
    }
}

/// A term key: one cohort's term within one academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct TermId {
    level: ClassLevel,
    term: Term,
    year: AcademicYear,
}

impl TermId {
    /// Creates a term key.
    #[must_use]
    pub const fn new(level: ClassLevel, term: Term, year: AcademicYear) -> Self {
        Self { level, term, year }
    }

    #[must_use]
    pub fn level(&self) -> ClassLevel {
        self.level
    }

    #[must_use]
    pub fn term(&self) -> Term {
        self.term
    }

    #[must_use]
    pub fn year(&self) -> AcademicYear {
        self.year
    }

    /// Returns the display label shown in term pickers, e.g.
    /// `First Term 2024/2025`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.term.name(), self.year.display_long())
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.level.key_segment(), self.term, self.year)
    }
}

impl FromStr for TermId {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '-');
        let (Some(level), Some(term), Some(year)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseKeyError::new(
                "TermId",
                format!("expected level-term-year, got {s:?}"),
            ));
        };
        let level: ClassLevel = level.parse()?;
        let term: Term = term.parse()?;
        let year: AcademicYear = year.parse()?;
        Ok(Self::new(level, term, year))
    }
}

impl PartialOrd for TermId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Recency ordering: academic year, then term, then cohort.
impl Ord for TermId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then(self.term.cmp(&other.term))
            .then(self.level.cmp(&other.level))
    }
}

impl TryFrom<String> for TermId {
    type Error = ParseKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TermId> for String {
    fn from(term: TermId) -> Self {
        term.to_string()
    }
}
