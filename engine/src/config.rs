use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::history::{DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY};
use crate::roll::{Limits, MAX_DICE, MAX_SIDES};

/// Roller settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RollerConfig {
    pub max_dice: u32,
    pub max_sides: u32,
    pub history_capacity: usize,
    /// Fixed seed for reproducible sessions; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            max_dice: MAX_DICE,
            max_sides: MAX_SIDES,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            seed: None,
        }
    }
}

impl RollerConfig {
    /// Parse JSON or YAML text; `format_hint` is a file extension.
    pub fn from_text(text: &str, format_hint: Option<&str>) -> Result<Self> {
        let cfg: RollerConfig = match format_hint.map(|s| s.to_ascii_lowercase()).as_deref() {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(text).context("failed to parse roller config YAML")?
            }
            _ => serde_json::from_str(text).context("failed to parse roller config JSON")?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read roller config: {}", path.display()))?;
        let ext = path.extension().and_then(|e| e.to_str());
        Self::from_text(&text, ext).with_context(|| format!("in {}", path.display()))
    }

    /// Limits may be tightened but never raised past the hard caps.
    pub fn validate(&self) -> Result<()> {
        if self.max_dice == 0 || self.max_dice > MAX_DICE {
            bail!("max_dice must be between 1 and {}, got {}", MAX_DICE, self.max_dice);
        }
        if self.max_sides == 0 || self.max_sides > MAX_SIDES {
            bail!(
                "max_sides must be between 1 and {}, got {}",
                MAX_SIDES,
                self.max_sides
            );
        }
        if self.history_capacity > MAX_HISTORY_CAPACITY {
            bail!(
                "history_capacity must be at most {}, got {}",
                MAX_HISTORY_CAPACITY,
                self.history_capacity
            );
        }
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_dice: self.max_dice,
            max_sides: self.max_sides,
        }
    }
}
