//! Role-keyed throughput policies. A strategy is data only: every role runs the same loop.

use super::DispatchError;
use crate::config::{DispatchConfig, DispatchProfileConfig};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Caller-asserted channel a dispatch is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// High throughput, low latency.
    Distribution,
    /// Low throughput, high latency.
    Depot,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Distribution => "distribution",
            Role::Depot => "depot",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distribution" => Ok(Role::Distribution),
            "depot" => Ok(Role::Depot),
            _ => Err(DispatchError::UnknownRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStrategy {
    pub max_packages_per_batch: usize,
    pub inter_batch_delay: Duration,
}

impl DispatchStrategy {
    pub const DISTRIBUTION: DispatchStrategy = DispatchStrategy {
        max_packages_per_batch: 3,
        inter_batch_delay: Duration::from_millis(500),
    };

    pub const DEPOT: DispatchStrategy = DispatchStrategy {
        max_packages_per_batch: 1,
        inter_batch_delay: Duration::from_millis(2500),
    };

    /// Batch size, never zero.
    pub fn batch_size(&self) -> usize {
        self.max_packages_per_batch.max(1)
    }
}

impl From<&DispatchProfileConfig> for DispatchStrategy {
    fn from(profile: &DispatchProfileConfig) -> Self {
        Self {
            max_packages_per_batch: profile.max_packages_per_batch,
            inter_batch_delay: Duration::from_millis(profile.inter_batch_delay_ms),
        }
    }
}

/// One strategy per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStrategies {
    pub distribution: DispatchStrategy,
    pub depot: DispatchStrategy,
}

impl DispatchStrategies {
    pub fn for_role(&self, role: Role) -> DispatchStrategy {
        match role {
            Role::Distribution => self.distribution,
            Role::Depot => self.depot,
        }
    }
}

impl Default for DispatchStrategies {
    fn default() -> Self {
        Self {
            distribution: DispatchStrategy::DISTRIBUTION,
            depot: DispatchStrategy::DEPOT,
        }
    }
}

impl From<&DispatchConfig> for DispatchStrategies {
    fn from(config: &DispatchConfig) -> Self {
        Self {
            distribution: DispatchStrategy::from(&config.distribution),
            depot: DispatchStrategy::from(&config.depot),
        }
    }
}
