// Domain value objects shared by the constraint model, the engines and configuration

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::Error;

/// Type of a decision variable in the constraint model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Bounded integer (x ∈ ℤ, lower ≤ x ≤ upper)
    Integer,
    /// Boolean flag encoded as x ∈ {0, 1}
    Binary,
}

/// Comparison used by a linear constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintType::LessThanOrEqual => write!(f, "<="),
            ConstraintType::Equal => write!(f, "=="),
            ConstraintType::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

/// Outcome of a single engine check, without the assignment payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// A satisfying assignment was found
    Satisfiable,
    /// No assignment satisfies all constraints
    Unsatisfiable,
    /// The engine ran out of its step budget before deciding
    Exhausted,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Satisfiable => write!(f, "Satisfiable"),
            CheckStatus::Unsatisfiable => write!(f, "Unsatisfiable"),
            CheckStatus::Exhausted => write!(f, "Search Budget Exhausted"),
        }
    }
}

/// Engine backend used to decide the constraint model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineBackend {
    /// Built-in depth-first search over bounded integer domains
    #[default]
    Backtracking,
    /// COIN-OR CBC through good_lp (feature `mip`)
    #[serde(alias = "cbc")]
    CoinCbc,
    /// HiGHS (feature `mip`)
    Highs,
}

impl fmt::Display for EngineBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineBackend::Backtracking => write!(f, "Backtracking"),
            EngineBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            EngineBackend::Highs => write!(f, "HiGHS"),
        }
    }
}

impl FromStr for EngineBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "backtracking" => Ok(EngineBackend::Backtracking),
            "cbc" | "coin-cbc" => Ok(EngineBackend::CoinCbc),
            "highs" => Ok(EngineBackend::Highs),
            _ => Err(Error::UnrecognizedOption {
                option: "backend",
                value: s.to_string(),
            }),
        }
    }
}

/// Which oxidation states of an element are offered as candidate ions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OxidationPolicy {
    /// Commonly observed oxidation states
    Common,
    /// Every known oxidation state
    All,
    /// Oxidation states that have a tabulated Shannon ionic radius
    #[default]
    Shannon,
}

impl fmt::Display for OxidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OxidationPolicy::Common => write!(f, "common"),
            OxidationPolicy::All => write!(f, "all"),
            OxidationPolicy::Shannon => write!(f, "shannon"),
        }
    }
}

impl FromStr for OxidationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(OxidationPolicy::Common),
            "all" => Ok(OxidationPolicy::All),
            "shannon" => Ok(OxidationPolicy::Shannon),
            _ => Err(Error::UnrecognizedOption {
                option: "permitted oxidation states",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_known_names() {
        assert_eq!("common".parse::<OxidationPolicy>().unwrap(), OxidationPolicy::Common);
        assert_eq!("all".parse::<OxidationPolicy>().unwrap(), OxidationPolicy::All);
        assert_eq!("shannon".parse::<OxidationPolicy>().unwrap(), OxidationPolicy::Shannon);
    }

    #[test]
    fn policy_rejects_unknown_name() {
        let err = "icsd".parse::<OxidationPolicy>().unwrap_err();
        assert!(matches!(err, Error::UnrecognizedOption { value, .. } if value == "icsd"));
    }

    #[test]
    fn backend_parses_aliases() {
        assert_eq!("CBC".parse::<EngineBackend>().unwrap(), EngineBackend::CoinCbc);
        assert_eq!("highs".parse::<EngineBackend>().unwrap(), EngineBackend::Highs);
        assert!("glpk".parse::<EngineBackend>().is_err());
    }

    #[test]
    fn display_round_trips_policy_names() {
        for policy in [OxidationPolicy::Common, OxidationPolicy::All, OxidationPolicy::Shannon] {
            assert_eq!(policy.to_string().parse::<OxidationPolicy>().unwrap(), policy);
        }
    }
}
