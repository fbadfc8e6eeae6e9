//! Per-pass configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::TreeColumns;

/// How the rendered tree treats forest roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPolicy {
    /// When false, depth-0 records are fetched for scoping but never rendered.
    pub show_roots: bool,
}

impl Default for DisplayPolicy {
    fn default() -> Self {
        Self { show_roots: true }
    }
}

impl DisplayPolicy {
    pub fn roots_shown() -> Self {
        Self { show_roots: true }
    }

    pub fn roots_hidden() -> Self {
        Self { show_roots: false }
    }

    /// Depth a row is drawn at once hidden roots are taken away.
    pub fn display_depth(&self, depth: u32) -> u32 {
        if self.show_roots {
            depth
        } else {
            depth.saturating_sub(1)
        }
    }
}

/// What the parent resolver does with depth sequences that skip levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthMode {
    /// Attach to the top of the open chain and record an anomaly.
    #[default]
    Tolerant,
    /// Fail the pass with a data-integrity error.
    Strict,
}

impl std::str::FromStr for DepthMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tolerant" => Ok(DepthMode::Tolerant),
            "strict" => Ok(DepthMode::Strict),
            other => Err(Error::Config(format!("unknown depth mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Where the hierarchy lives in each record.
    pub columns: TreeColumns,

    pub policy: DisplayPolicy,

    pub depth_mode: DepthMode,
}

impl TreeConfig {
    pub fn new(columns: TreeColumns, policy: DisplayPolicy) -> Self {
        Self {
            columns,
            policy,
            depth_mode: DepthMode::default(),
        }
    }

    pub fn with_depth_mode(mut self, mode: DepthMode) -> Self {
        self.depth_mode = mode;
        self
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `NESTREE_SHOW_ROOTS`: `true`/`false` (also `1`/`0`)
    /// - `NESTREE_DEPTH_MODE`: `tolerant` or `strict`
    /// - `NESTREE_ID_COLUMN`, `NESTREE_LEFT_COLUMN`, `NESTREE_RIGHT_COLUMN`,
    ///   `NESTREE_DEPTH_COLUMN`: column names
    /// - `NESTREE_FOREST_COLUMN`: forest column; empty disables forests
    ///
    /// Values that do not parse are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("NESTREE_SHOW_ROOTS") {
            if let Some(v) = parse_bool(&s) {
                cfg.policy.show_roots = v;
            }
        }

        if let Ok(s) = std::env::var("NESTREE_DEPTH_MODE") {
            if let Ok(v) = s.parse::<DepthMode>() {
                cfg.depth_mode = v;
            }
        }

        if let Ok(s) = std::env::var("NESTREE_ID_COLUMN") {
            cfg.columns.id = s;
        }

        if let Ok(s) = std::env::var("NESTREE_LEFT_COLUMN") {
            cfg.columns.left = s;
        }

        if let Ok(s) = std::env::var("NESTREE_RIGHT_COLUMN") {
            cfg.columns.right = s;
        }

        if let Ok(s) = std::env::var("NESTREE_DEPTH_COLUMN") {
            cfg.columns.depth = s;
        }

        if let Ok(s) = std::env::var("NESTREE_FOREST_COLUMN") {
            cfg.columns.forest = if s.trim().is_empty() { None } else { Some(s) };
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        self.columns.validate()
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
