//! Climate record models

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DOMAIN_LOCATION;
use crate::validation::ValidationError;

/// Climate variable carried by the dataset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    /// Near-surface air temperature
    Tas,
    /// Precipitation
    Pr,
}

impl Variable {
    pub const ALL: [Variable; 2] = [Variable::Tas, Variable::Pr];

    /// Column key used in data files and selections
    pub fn key(&self) -> &'static str {
        match self {
            Variable::Tas => "tas",
            Variable::Pr => "pr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variable::Tas => "Temperature",
            Variable::Pr => "Precipitation",
        }
    }

    /// Axis title for plotted values
    pub fn units(&self) -> &'static str {
        match self {
            Variable::Tas => "Degrees Celsius",
            Variable::Pr => "Millimeters",
        }
    }

    /// Decimal places kept in prepared decadal data
    pub fn precision(&self) -> u32 {
        match self {
            Variable::Tas => 1,
            Variable::Pr => 0,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Variable {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tas" => Ok(Variable::Tas),
            "pr" => Ok(Variable::Pr),
            other => Err(ValidationError::UnknownVariable(other.to_string())),
        }
    }
}

/// Calendar month, 1 (January) through 12 (December)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i64", into = "u8")]
pub struct Month(u8);

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Month {
    pub fn new(number: u8) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.0 - 1)]
    }

    /// All twelve months in calendar order
    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }
}

impl TryFrom<i64> for Month {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Month::new)
            .ok_or(ValidationError::MonthOutOfRange(value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Month column of a filtered record.
///
/// Either the calendar month a value belongs to, or the synthetic tag of a
/// monthly average, written `avg_<m>_<m>...` with months ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum MonthKey {
    Single(Month),
    Average(Vec<Month>),
}

impl MonthKey {
    /// Average tag for a set of months; duplicates and order are normalised
    pub fn average(months: impl IntoIterator<Item = Month>) -> Self {
        let months: BTreeSet<Month> = months.into_iter().collect();
        MonthKey::Average(months.into_iter().collect())
    }

    /// Calendar months this key covers
    pub fn months(&self) -> Vec<Month> {
        match self {
            MonthKey::Single(month) => vec![*month],
            MonthKey::Average(months) => months.clone(),
        }
    }

    pub fn is_average(&self) -> bool {
        matches!(self, MonthKey::Average(_))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthKey::Single(month) => write!(f, "{}", month),
            MonthKey::Average(months) => {
                f.write_str("avg")?;
                for month in months {
                    write!(f, "_{}", month)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonthKey(s.to_string());

        match s.strip_prefix("avg") {
            Some(rest) => {
                let rest = rest.strip_prefix('_').ok_or_else(invalid)?;
                let months = rest
                    .split('_')
                    .map(|part| {
                        let number: i64 = part.parse().map_err(|_| invalid())?;
                        Month::try_from(number)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(MonthKey::average(months))
            }
            None => {
                let number: i64 = s.trim().parse().map_err(|_| invalid())?;
                Ok(MonthKey::Single(Month::try_from(number)?))
            }
        }
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl From<Month> for MonthKey {
    fn from(month: Month) -> Self {
        MonthKey::Single(month)
    }
}

/// One row of the reference dataset.
///
/// Keyed by (location, model, scenario, year, month) with one optional
/// column per climate variable. Territory-wide tables carry no location
/// column; their rows take [`DOMAIN_LOCATION`].
///
/// Values are (de)serialised as strings so long means survive a CSV
/// round trip without passing through `f64`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateRow {
    #[serde(alias = "community", alias = "minesite", default = "domain_location")]
    pub location: String,
    pub model: String,
    pub scenario: String,
    pub year: i32,
    pub month: Month,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub tas: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub pr: Option<Decimal>,
}

fn domain_location() -> String {
    DOMAIN_LOCATION.to_string()
}

impl ClimateRow {
    pub fn value(&self, variable: Variable) -> Option<Decimal> {
        match variable {
            Variable::Tas => self.tas,
            Variable::Pr => self.pr,
        }
    }
}

/// Single-variable record produced by filtering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateRecord {
    pub model: String,
    pub scenario: String,
    pub year: i32,
    pub month: MonthKey,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
}
