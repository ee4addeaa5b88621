use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single metric observation.
///
/// On the expected side an empty `value` or `timestamp` means "match any",
/// and a tag with an empty value means "tag must be present, any value".
/// Tags not listed on the expected side are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Metric {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    /// Tag names in ascending order.
    pub fn sorted_tag_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.value.is_empty() {
            write!(f, " {}", self.value)?;
        }
        if !self.timestamp.is_empty() {
            write!(f, " {}", self.timestamp)?;
        }
        for name in self.sorted_tag_names() {
            write!(f, " {name}={:?}", self.tags[name])?;
        }
        Ok(())
    }
}

/// Which collection a metric came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Expected,
    Actual,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => write!(f, "expected"),
            Self::Actual => write!(f, "actual"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Unmatched residue of a comparison. Order is by match key, but callers
/// should treat both lists as unordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diff {
    /// Expected metrics with no actual counterpart.
    pub missing: Vec<Metric>,
    /// Actual metrics with no expected counterpart.
    pub extra: Vec<Metric>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.missing {
            writeln!(f, "missing: {m}")?;
        }
        for m in &self.extra {
            writeln!(f, "extra: {m}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub expected: usize,
    pub actual: usize,
    pub matched_keys: usize,
    pub missing: usize,
    pub extra: usize,
    /// Entries (both sides) keyed by their own full key because no
    /// registered rule matched them.
    pub fallback_keys: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffMeta {
    pub config_name: String,
    pub engine_version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    pub meta: DiffMeta,
    pub summary: DiffSummary,
    pub diff: Diff,
}

impl DiffReport {
    pub fn is_clean(&self) -> bool {
        self.diff.is_empty()
    }
}
