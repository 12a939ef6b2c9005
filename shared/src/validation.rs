//! Parsing and validation of user-supplied selection fragments
//!
//! Selections arrive as loosely typed strings (query parameters, JS values).
//! Anything that cannot be turned into a well-typed value is rejected here;
//! well-typed values that simply match nothing are left to the pipeline.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::models::{Month, Variable};

/// Rejected selection input
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Month must be between 1 and 12, got {0}")]
    MonthOutOfRange(i64),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid month key: {0}")]
    InvalidMonthKey(String),

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Invalid year: {0}")]
    InvalidYear(String),
}

impl ValidationError {
    /// Name of the selection field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MonthOutOfRange(_)
            | ValidationError::InvalidMonth(_)
            | ValidationError::InvalidMonthKey(_) => "months",
            ValidationError::UnknownVariable(_) => "variable",
            ValidationError::InvalidYear(_) => "years",
        }
    }
}

/// Split a comma separated list, dropping blanks
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a comma separated list of month numbers
pub fn parse_months(raw: &str) -> Result<BTreeSet<Month>, ValidationError> {
    parse_list(raw)
        .iter()
        .map(|item| {
            let number: i64 = item
                .parse()
                .map_err(|_| ValidationError::InvalidMonth(item.clone()))?;
            Month::try_from(number)
        })
        .collect()
}

/// Parse a variable key such as `tas` or `pr`
pub fn parse_variable(raw: &str) -> Result<Variable, ValidationError> {
    raw.trim().parse()
}

/// Parse a year bound
pub fn parse_year(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidYear(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_skips_blanks() {
        assert_eq!(parse_list(" rcp60, ,rcp85 ,"), vec!["rcp60", "rcp85"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_parse_months_valid() {
        let months = parse_months("12,1,2").unwrap();
        let numbers: Vec<u8> = months.iter().map(|m| m.number()).collect();
        assert_eq!(numbers, vec![1, 2, 12]);
    }

    #[test]
    fn test_parse_months_out_of_range() {
        assert_eq!(
            parse_months("1,13"),
            Err(ValidationError::MonthOutOfRange(13))
        );
        assert_eq!(parse_months("0"), Err(ValidationError::MonthOutOfRange(0)));
    }

    #[test]
    fn test_parse_months_not_a_number() {
        let err = parse_months("jan").unwrap_err();
        assert_eq!(err, ValidationError::InvalidMonth("jan".to_string()));
        assert_eq!(err.field(), "months");
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse_variable("tas"), Ok(Variable::Tas));
        assert_eq!(parse_variable(" pr "), Ok(Variable::Pr));
        assert_eq!(
            parse_variable("snow").unwrap_err().field(),
            "variable"
        );
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2050"), Ok(2050));
        assert!(parse_year("twenty").is_err());
    }
}
