// Enumeration settings, loadable from TOML

use std::path::Path;

use serde::Deserialize;

use super::enumeration::DEFAULT_MAX_RESULTS;
use super::error::{Error, Result};
use super::value_objects::{EngineBackend, OxidationPolicy};

/// Settings for one oxidation-state guess.
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```toml
/// max_results = 20
/// policy = "common"
/// backend = "backtracking"
/// step_limit = 1_000_000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuessConfig {
    pub max_results: usize,
    pub policy: OxidationPolicy,
    pub backend: EngineBackend,
    /// Exclusive upper bound on excluded multipliers; total atom count when unset.
    pub multiplier_bound: Option<u32>,
    /// Branching steps per engine check; unlimited when unset.
    pub step_limit: Option<u64>,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            policy: OxidationPolicy::default(),
            backend: EngineBackend::default(),
            multiplier_bound: None,
            step_limit: None,
        }
    }
}

impl GuessConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_policy(mut self, policy: OxidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_backend(mut self, backend: EngineBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_multiplier_bound(mut self, bound: u32) -> Self {
        self.multiplier_bound = Some(bound);
        self
    }

    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(Error::InvalidConfiguration(
                "max_results must be at least 1".to_string(),
            ));
        }
        if self.step_limit == Some(0) {
            return Err(Error::InvalidConfiguration(
                "step_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
