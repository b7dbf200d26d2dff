use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Duration of history requested from the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lookback {
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    #[default]
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl Lookback {
    /// Range parameter understood by the chart endpoint.
    pub fn as_range(&self) -> &'static str {
        match self {
            Lookback::FiveDays => "5d",
            Lookback::OneMonth => "1mo",
            Lookback::ThreeMonths => "3mo",
            Lookback::SixMonths => "6mo",
            Lookback::OneYear => "1y",
            Lookback::TwoYears => "2y",
            Lookback::FiveYears => "5y",
            Lookback::TenYears => "10y",
            Lookback::YearToDate => "ytd",
            Lookback::Max => "max",
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_range())
    }
}

impl FromStr for Lookback {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lookback = match s.trim().to_lowercase().as_str() {
            "5d" => Lookback::FiveDays,
            "1mo" => Lookback::OneMonth,
            "3mo" => Lookback::ThreeMonths,
            "6mo" => Lookback::SixMonths,
            "1y" => Lookback::OneYear,
            "2y" => Lookback::TwoYears,
            "5y" => Lookback::FiveYears,
            "10y" => Lookback::TenYears,
            "ytd" => Lookback::YearToDate,
            "max" => Lookback::Max,
            other => anyhow::bail!(
                "unknown lookback period {other:?}; expected one of 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max"
            ),
        };
        Ok(lookback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookback() {
        assert_eq!("5y".parse::<Lookback>().unwrap(), Lookback::FiveYears);
        assert_eq!(" 1MO ".parse::<Lookback>().unwrap(), Lookback::OneMonth);
        assert!("1 week".parse::<Lookback>().is_err());
        assert_eq!(Lookback::default().as_range(), "5y");
    }
}
