use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar year, used to restrict daily views to trips started in that year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize)]
pub struct Year(pub i32);

impl Year {
    pub fn get(self) -> i32 {
        self.0
    }

    /// Returns `true` when `date` falls inside this year.
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl From<i32> for Year {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl FromStr for Year {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(Year)
    }
}

/// Inclusive span of calendar dates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct StartEndDate {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Display for StartEndDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
