use crate::matcher::{matched_keys, KeyMap};
use crate::model::{Diff, DiffSummary};

/// Compute summary statistics for one comparison.
pub fn compute_summary(
    expected_count: usize,
    actual_count: usize,
    expected_map: &KeyMap<'_>,
    actual_map: &KeyMap<'_>,
    diff: &Diff,
) -> DiffSummary {
    DiffSummary {
        expected: expected_count,
        actual: actual_count,
        matched_keys: matched_keys(expected_map, actual_map),
        missing: diff.missing.len(),
        extra: diff.extra.len(),
        fallback_keys: expected_map.fallbacks + actual_map.fallbacks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{disjunct, key_map, KeyerRegistry};
    use crate::model::{Metric, Side};

    #[test]
    fn summary_counts() {
        let expected = vec![
            Metric::new("a").with_tag("pod", ""),
            Metric::new("b").with_value("1"),
            Metric::new("c"),
        ];
        let actual = vec![
            Metric::new("a").with_tag("pod", "p1"),
            Metric::new("b").with_value("2"),
            Metric::new("d"),
        ];
        let registry = KeyerRegistry::from_expected(&expected);
        let left = key_map(&expected, &registry, Side::Expected);
        let right = key_map(&actual, &registry, Side::Actual);
        let (missing, extra) = disjunct(&left, &right);
        let diff = Diff { missing, extra };

        let summary = compute_summary(expected.len(), actual.len(), &left, &right, &diff);
        assert_eq!(summary.expected, 3);
        assert_eq!(summary.actual, 3);
        assert_eq!(summary.matched_keys, 1);
        assert_eq!(summary.missing, 2);
        assert_eq!(summary.extra, 2);
        // b=2 matches no rule, d has no rule at all
        assert_eq!(summary.fallback_keys, 2);
    }
}
