//! Shared primitive types used across the engine.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar quarter of the reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Quarter containing the given calendar month (1..=12).
    pub fn from_month(month: u32) -> Quarter {
        match (month.clamp(1, 12) - 1) / 3 {
            0 => Quarter::Q1,
            1 => Quarter::Q2,
            2 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    pub fn months(&self) -> [u32; 3] {
        match self {
            Quarter::Q1 => [1, 2, 3],
            Quarter::Q2 => [4, 5, 6],
            Quarter::Q3 => [7, 8, 9],
            Quarter::Q4 => [10, 11, 12],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quarter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" | "1" => Ok(Quarter::Q1),
            "Q2" | "2" => Ok(Quarter::Q2),
            "Q3" | "3" => Ok(Quarter::Q3),
            "Q4" | "4" => Ok(Quarter::Q4),
            other => Err(EngineError::InvalidQuarter(other.to_string())),
        }
    }
}

/// The replace-by-period key: one calculation run fully supersedes prior
/// stored records under the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    pub team: crate::team::TeamKind,
    pub quarter: Quarter,
    pub year: i32,
}

impl PeriodKey {
    pub fn new(team: crate::team::TeamKind, quarter: Quarter, year: i32) -> Self {
        Self {
            team,
            quarter,
            year,
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.team, self.quarter, self.year)
    }
}
