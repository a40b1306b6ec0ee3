// Row policy value object

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValueError;

/// How the series loader treats rows whose column count is not two.
///
/// `Lenient` skips such rows without reporting them individually and only
/// counts them. `Strict` fails the load on the first one. Blank lines are
/// skipped under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    #[default]
    Lenient,
    Strict,
}

impl RowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowPolicy::Lenient => "lenient",
            RowPolicy::Strict => "strict",
        }
    }
}

impl FromStr for RowPolicy {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" | "skip" => Ok(RowPolicy::Lenient),
            "strict" => Ok(RowPolicy::Strict),
            other => Err(ValueError::UnknownRowPolicy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_names_and_skip_alias() {
        assert_eq!("Strict".parse::<RowPolicy>().expect("strict"), RowPolicy::Strict);
        assert_eq!(" lenient ".parse::<RowPolicy>().expect("lenient"), RowPolicy::Lenient);
        assert_eq!("SKIP".parse::<RowPolicy>().expect("skip"), RowPolicy::Lenient);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "tolerant".parse::<RowPolicy>().expect_err("reject unknown");
        assert!(matches!(err, ValueError::UnknownRowPolicy(ref name) if name == "tolerant"));
    }
}
