//! Class levels and cohort ordering.
//!
//! Class levels are compact codes such as `JS2` or `SS1`: a stage
//! prefix followed by a year within that stage. Ordering is numeric by
//! cohort seniority, never lexicographic on the code, so `JS2 < JS10`
//! and every junior class sorts before every senior one.

use crate::error::ParseKeyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two stages of the school, in ascending seniority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Junior,
    Senior,
}

impl Stage {
    /// Returns the two-letter code prefix for this stage.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Stage::Junior => "JS",
            Stage::Senior => "SS",
        }
    }
}

/// A class level: a stage plus a year within it.
///
/// The derived ordering ranks cohorts by seniority, stage first and
/// then year, which is what dependent-selection defaults and term
/// recency rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct ClassLevel {
    stage: Stage,
    year: u8,
}

impl ClassLevel {
    /// Creates a class level. Years start at 1; the parser enforces
    /// this for external input.
    #[must_use]
    pub const fn new(stage: Stage, year: u8) -> Self {
        Self { stage, year }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn year(&self) -> u8 {
        self.year
    }

    /// Returns the lowercase code used in term keys, e.g. `js2`.
    #[must_use]
    pub fn key_segment(&self) -> String {
        format!("{}{}", self.prefix_lowercase(), self.year)
    }

    fn prefix_lowercase(&self) -> &'static str {
        match self.stage {
            Stage::Junior => "js",
            Stage::Senior => "ss",
        }
    }
}

impl fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stage.prefix(), self.year)
    }
}

impl FromStr for ClassLevel {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() < 3 {
            return Err(ParseKeyError::new(
                "ClassLevel",
                format!("code too short: {code:?}"),
            ));
        }
        let (Some(prefix), Some(digits)) = (code.get(..2), code.get(2..)) else {
            return Err(ParseKeyError::new(
                "ClassLevel",
                format!("non-ascii stage prefix in {code:?}"),
            ));
        };
        let stage = match prefix.to_ascii_uppercase().as_str() {
            "JS" => Stage::Junior,
            "SS" => Stage::Senior,
            other => {
                return Err(ParseKeyError::new(
                    "ClassLevel",
                    format!("unknown stage prefix {other:?}"),
                ));
            }
        };
        let year: u8 = digits.parse().map_err(|_| {
            ParseKeyError::new("ClassLevel", format!("invalid year digits {digits:?}"))
        })?;
        if year == 0 {
            return Err(ParseKeyError::new("ClassLevel", "year must be at least 1"));
        }
        Ok(Self::new(stage, year))
    }
}

impl TryFrom<String> for ClassLevel {
    type Error = ParseKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClassLevel> for String {
    fn from(level: ClassLevel) -> Self {
        level.to_string()
    }
}
