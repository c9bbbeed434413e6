//! Collector-number range model.
//!
//! Booster pools declare card eligibility as range strings, either a single
//! number ("301") or an inclusive span ("1-269"). Membership checks stay
//! O(ranges); full enumeration is only done for superset reconciliation.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// An inclusive collector-number interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CnRange {
    pub start: u32,
    pub end: u32,
}

/// Why a range string was rejected.
///
/// The three kinds are reported separately by the schema validator, so they
/// stay distinguishable all the way to the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Not of the form "N" or "N-M"
    Malformed(String),
    /// "N-M" with N > M
    Inverted(String),
    /// Start below 1 (collector numbers are 1-based)
    BelowOne(String),
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Malformed(s) => write!(f, "invalid range format: \"{}\"", s),
            RangeError::Inverted(s) => write!(f, "range \"{}\" has start > end", s),
            RangeError::BelowOne(s) => write!(f, "range \"{}\" starts below 1", s),
        }
    }
}

impl std::error::Error for RangeError {}

impl FromStr for CnRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = match s.split_once('-') {
            Some((a, b)) => {
                let start = parse_cn(a).ok_or_else(|| RangeError::Malformed(s.to_string()))?;
                let end = parse_cn(b).ok_or_else(|| RangeError::Malformed(s.to_string()))?;
                (start, end)
            }
            None => {
                let n = parse_cn(s).ok_or_else(|| RangeError::Malformed(s.to_string()))?;
                (n, n)
            }
        };

        if start > end {
            return Err(RangeError::Inverted(s.to_string()));
        }
        if start < 1 {
            return Err(RangeError::BelowOne(s.to_string()));
        }

        Ok(CnRange { start, end })
    }
}

/// Strict decimal parse, no sign, no surrounding whitespace.
fn parse_cn(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl CnRange {
    /// True iff `cn` falls inside the interval, boundaries included.
    pub fn contains(&self, cn: u32) -> bool {
        self.start <= cn && cn <= self.end
    }

    /// Membership check for collector numbers as they appear in card data.
    ///
    /// Non-numeric collector numbers ("12a", "123★") are simply not in any
    /// range; callers probe arbitrary external card numbers and expect a
    /// graceful `false` rather than an error.
    pub fn contains_str(&self, cn: &str) -> bool {
        match parse_cn(cn) {
            Some(n) => self.contains(n),
            None => false,
        }
    }

    /// Materialize every collector number in the interval into `out`.
    ///
    /// Used by the collector-superset reconciliation only; plain membership
    /// never enumerates.
    pub fn expand_into(&self, out: &mut HashSet<u32>) {
        for cn in self.start..=self.end {
            out.insert(cn);
        }
    }
}

impl fmt::Display for CnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
