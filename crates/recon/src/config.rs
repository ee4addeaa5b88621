use serde::Deserialize;

use crate::error::DiffError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiffConfig {
    pub name: String,
    #[serde(default)]
    pub unknown_names: UnknownNamePolicy,
    /// Metric names dropped from both sides before keying.
    #[serde(default)]
    pub ignore_names: Vec<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            name: "metric-diff".into(),
            unknown_names: UnknownNamePolicy::default(),
            ignore_names: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Unknown-name policy
// ---------------------------------------------------------------------------

/// What to do with an actual metric whose name never appears on the
/// expected side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownNamePolicy {
    /// Report it under `extra`, keyed by its own fields.
    Extra,
    /// Fail the run with [`DiffError::UnknownName`].
    Reject,
}

impl Default for UnknownNamePolicy {
    fn default() -> Self {
        Self::Extra
    }
}

impl std::fmt::Display for UnknownNamePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extra => write!(f, "extra"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl DiffConfig {
    pub fn from_toml(input: &str) -> Result<Self, DiffError> {
        let config: DiffConfig =
            toml::from_str(input).map_err(|e| DiffError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DiffError> {
        if self.name.trim().is_empty() {
            return Err(DiffError::ConfigValidation("name must not be blank".into()));
        }

        for (i, ignored) in self.ignore_names.iter().enumerate() {
            if ignored.trim().is_empty() {
                return Err(DiffError::ConfigValidation(format!(
                    "ignore_names[{i}] must not be blank"
                )));
            }
        }

        Ok(())
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_names.iter().any(|n| n == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
