use crate::model::Metric;

/// A matching rule over one field (or a group of fields) of a [`Metric`].
///
/// Evaluating a keyer yields `None` when the metric does not satisfy the rule,
/// otherwise the key string summarizing the matched value. Two metrics are the
/// same for diffing purposes when one keyer yields the same key for both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyer {
    /// Metric name must equal exactly. Key = the name.
    Name(String),
    /// Value must equal exactly. Key = the value.
    Value(String),
    /// Timestamp must equal exactly. Key = the timestamp.
    Timestamp(String),
    /// Tag must be present with any value. Key = `name=*`.
    TagPresent(String),
    /// Tag must be present with exactly this value. Key = `name="value"`.
    TagValue { name: String, value: String },
    /// Every child must match. Key = child keys joined by a single space.
    Composite(Vec<Keyer>),
}

impl Keyer {
    /// Build the rule an expected metric imposes: name, then value and
    /// timestamp when non-empty, then the (possibly empty) tag composite.
    pub fn for_metric(metric: &Metric) -> Self {
        let mut keyers = vec![Keyer::Name(metric.name.clone())];
        if !metric.value.is_empty() {
            keyers.push(Keyer::Value(metric.value.clone()));
        }
        if !metric.timestamp.is_empty() {
            keyers.push(Keyer::Timestamp(metric.timestamp.clone()));
        }
        keyers.push(Self::for_tags(metric));
        Keyer::Composite(keyers)
    }

    /// Tag composite in ascending tag-name order so the key is independent
    /// of map iteration order.
    fn for_tags(metric: &Metric) -> Self {
        let keyers = metric
            .sorted_tag_names()
            .into_iter()
            .map(|name| {
                let value = &metric.tags[name];
                if value.is_empty() {
                    Keyer::TagPresent(name.to_string())
                } else {
                    Keyer::TagValue {
                        name: name.to_string(),
                        value: value.clone(),
                    }
                }
            })
            .collect();
        Keyer::Composite(keyers)
    }

    /// Evaluate against `metric`.
    pub fn key(&self, metric: &Metric) -> Option<String> {
        match self {
            Keyer::Name(expected) => (metric.name == *expected).then(|| metric.name.clone()),
            Keyer::Value(expected) => (metric.value == *expected).then(|| metric.value.clone()),
            Keyer::Timestamp(expected) => {
                (metric.timestamp == *expected).then(|| metric.timestamp.clone())
            }
            Keyer::TagPresent(name) => metric.tags.contains_key(name).then(|| format!("{name}=*")),
            Keyer::TagValue { name, value } => match metric.tags.get(name) {
                Some(actual) if actual == value => Some(format!("{name}={actual:?}")),
                _ => None,
            },
            Keyer::Composite(keyers) => {
                let keys = keyers
                    .iter()
                    .map(|k| k.key(metric))
                    .collect::<Option<Vec<String>>>()?;
                Some(keys.join(" "))
            }
        }
    }

    /// Full key of a metric under its own rule. Always matches.
    pub fn self_key(metric: &Metric) -> String {
        Self::for_metric(metric).key(metric).unwrap_or_default()
    }
}
