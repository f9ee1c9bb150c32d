use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Income-statement costing method.
///
/// The wire names (`directo`, `absorcion`) are what the HTTP endpoint and the
/// CLI accept; nothing else parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CostingMethod {
    /// Direct (variable) costing: contribution margin first, then fixed costs.
    #[default]
    #[serde(rename = "directo")]
    Direct,
    /// Absorption costing: fixed costs are absorbed into production cost.
    #[serde(rename = "absorcion")]
    Absorption,
}

impl CostingMethod {
    pub fn all() -> &'static [CostingMethod] {
        &[CostingMethod::Direct, CostingMethod::Absorption]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "directo",
            Self::Absorption => "absorcion",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "directo" => Some(Self::Direct),
            "absorcion" => Some(Self::Absorption),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct => "Direct costing",
            Self::Absorption => "Absorption costing",
        }
    }
}

impl fmt::Display for CostingMethod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`CostingMethod::from_str`]; carries the rejected text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown costing method '{0}' (expected 'directo' or 'absorcion')")]
pub struct UnknownMethod(pub String);

impl FromStr for CostingMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownMethod(s.to_string()))
    }
}
