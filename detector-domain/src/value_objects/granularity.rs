// Granularity value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValueError;

/// Declared sampling interval of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Yearly,
    Monthly,
    Weekly,
    #[default]
    Daily,
    Hourly,
    Minutely,
    Secondly,
    Microsecond,
    None,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Yearly => "yearly",
            Granularity::Monthly => "monthly",
            Granularity::Weekly => "weekly",
            Granularity::Daily => "daily",
            Granularity::Hourly => "hourly",
            Granularity::Minutely => "minutely",
            Granularity::Secondly => "secondly",
            Granularity::Microsecond => "microsecond",
            Granularity::None => "none",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yearly" => Ok(Granularity::Yearly),
            "monthly" => Ok(Granularity::Monthly),
            "weekly" => Ok(Granularity::Weekly),
            "daily" => Ok(Granularity::Daily),
            "hourly" => Ok(Granularity::Hourly),
            "minutely" | "perminute" => Ok(Granularity::Minutely),
            "secondly" | "persecond" => Ok(Granularity::Secondly),
            "microsecond" => Ok(Granularity::Microsecond),
            "none" => Ok(Granularity::None),
            other => Err(ValueError::UnknownGranularity(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Daily".parse::<Granularity>().expect("daily"), Granularity::Daily);
        assert_eq!(" HOURLY ".parse::<Granularity>().expect("hourly"), Granularity::Hourly);
        assert_eq!("perMinute".parse::<Granularity>().expect("minutely"), Granularity::Minutely);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "fortnightly".parse::<Granularity>().expect_err("reject unknown");
        assert!(err.to_string().contains("fortnightly"));
    }

    #[test]
    fn wire_name_round_trips_through_display() {
        for granularity in [Granularity::Yearly, Granularity::Daily, Granularity::None] {
            let parsed: Granularity = granularity.to_string().parse().expect("parse display");
            assert_eq!(parsed, granularity);
        }
    }
}
