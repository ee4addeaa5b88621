use std::collections::BTreeMap;

use crate::keyer::Keyer;
use crate::model::{Metric, Side};

/// Per-name matching rules, derived once from the expected side.
///
/// Each name maps to one keyer per expected metric of that name, in the
/// order the expected metrics were supplied. Lookups try them in that order.
#[derive(Debug, Default)]
pub struct KeyerRegistry {
    by_name: BTreeMap<String, Vec<Keyer>>,
}

impl KeyerRegistry {
    pub fn from_expected(expected: &[Metric]) -> Self {
        let mut by_name: BTreeMap<String, Vec<Keyer>> = BTreeMap::new();
        for m in expected {
            by_name
                .entry(m.name.clone())
                .or_default()
                .push(Keyer::for_metric(m));
        }
        Self { by_name }
    }

    pub fn lookup(&self, name: &str) -> &[Keyer] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of distinct registered names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Key a metric with the first registered rule that matches it, or with
    /// its own full rule when none does. The flag is `true` on fallback.
    pub fn key_for(&self, metric: &Metric) -> (String, bool) {
        for keyer in self.lookup(&metric.name) {
            if let Some(key) = keyer.key(metric) {
                log::trace!("{metric} keyed as {key:?}");
                return (key, false);
            }
        }
        (Keyer::self_key(metric), true)
    }
}

/// Match key -> metric for one side of a comparison.
#[derive(Debug, Default)]
pub struct KeyMap<'a> {
    pub entries: BTreeMap<String, &'a Metric>,
    /// Metrics keyed by their own full rule.
    pub fallbacks: usize,
}

/// Key every metric against the registry. Colliding keys collapse to the
/// last metric written.
pub fn key_map<'a>(metrics: &'a [Metric], registry: &KeyerRegistry, side: Side) -> KeyMap<'a> {
    let mut map = KeyMap::default();
    for metric in metrics {
        let (key, fallback) = registry.key_for(metric);
        if fallback {
            log::debug!("{side} metric {metric} matched no registered rule, self-keyed as {key:?}");
            map.fallbacks += 1;
        }
        map.entries.insert(key, metric);
    }
    map
}

/// Metrics whose key appears only on the left, and only on the right.
pub fn disjunct(left: &KeyMap<'_>, right: &KeyMap<'_>) -> (Vec<Metric>, Vec<Metric>) {
    let left_only = left
        .entries
        .iter()
        .filter(|(key, _)| !right.entries.contains_key(*key))
        .map(|(_, m)| (*m).clone())
        .collect();
    let right_only = right
        .entries
        .iter()
        .filter(|(key, _)| !left.entries.contains_key(*key))
        .map(|(_, m)| (*m).clone())
        .collect();
    (left_only, right_only)
}

/// Number of keys present on both sides.
pub fn matched_keys(left: &KeyMap<'_>, right: &KeyMap<'_>) -> usize {
    left.entries
        .keys()
        .filter(|key| right.entries.contains_key(*key))
        .count()
}
