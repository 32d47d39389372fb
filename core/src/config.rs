use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Initial slot count of a freshly created table.
pub const DEFAULT_CAPACITY: usize = 11;

/// Collision-resolution strategy used by every table an engine creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Chaining,
    QuadraticProbing,
    #[default]
    LinearProbing,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Chaining, Strategy::QuadraticProbing, Strategy::LinearProbing];

    /// Load factor above which a table of this strategy grows.
    pub fn max_load_factor(self) -> f64 {
        match self {
            Strategy::Chaining => 1.5,
            Strategy::QuadraticProbing | Strategy::LinearProbing => 0.75,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Chaining => "chaining",
            Strategy::QuadraticProbing => "quadratic",
            Strategy::LinearProbing => "linear",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chaining" | "chain" | "sepchain" => Ok(Strategy::Chaining),
            "quadratic" | "quadratic_probing" => Ok(Strategy::QuadraticProbing),
            "linear" | "linear_probing" => Ok(Strategy::LinearProbing),
            other => Err(format!("unknown strategy '{other}' (expected chaining, quadratic or linear)")),
        }
    }
}

/// Per-engine configuration. Passed by value to each engine; never shared mutably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    pub strategy: Strategy,
    pub initial_capacity: usize,
    /// File extension (without the dot) of documents picked up from a directory.
    pub extension: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { strategy: Strategy::default(), initial_capacity: DEFAULT_CAPACITY, extension: "txt".into() }
    }
}

impl IndexConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self { strategy, ..Self::default() }
    }
}
