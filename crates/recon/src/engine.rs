use std::borrow::Cow;

use crate::config::{DiffConfig, UnknownNamePolicy};
use crate::error::DiffError;
use crate::evidence::compute_summary;
use crate::matcher::{disjunct, key_map, KeyerRegistry};
use crate::model::{Diff, DiffMeta, DiffReport, Metric, Side};

/// Compare expected against actual metrics.
///
/// Rules are derived once from `expected` and applied to both sides, so an
/// actual metric matches when it satisfies every field the expected metric
/// constrains. Total over any input, including empty slices.
pub fn diff_metrics(expected: &[Metric], actual: &[Metric]) -> Diff {
    let registry = KeyerRegistry::from_expected(expected);
    let expected_map = key_map(expected, &registry, Side::Expected);
    let actual_map = key_map(actual, &registry, Side::Actual);
    let (missing, extra) = disjunct(&expected_map, &actual_map);
    Diff { missing, extra }
}

/// Run a comparison per config. Returns the diff plus summary.
pub fn run(
    config: &DiffConfig,
    expected: &[Metric],
    actual: &[Metric],
) -> Result<DiffReport, DiffError> {
    let expected = retain_compared(config, expected);
    let actual = retain_compared(config, actual);

    let registry = KeyerRegistry::from_expected(&expected);

    if config.unknown_names == UnknownNamePolicy::Reject {
        if let Some(m) = actual.iter().find(|m| !registry.contains(&m.name)) {
            return Err(DiffError::UnknownName {
                name: m.name.clone(),
            });
        }
    }

    let expected_map = key_map(&expected, &registry, Side::Expected);
    let actual_map = key_map(&actual, &registry, Side::Actual);
    let (missing, extra) = disjunct(&expected_map, &actual_map);
    let diff = Diff { missing, extra };

    let summary = compute_summary(expected.len(), actual.len(), &expected_map, &actual_map, &diff);
    log::debug!(
        "{}: {} expected, {} actual, {} matched, {} missing, {} extra",
        config.name,
        summary.expected,
        summary.actual,
        summary.matched_keys,
        summary.missing,
        summary.extra
    );

    Ok(DiffReport {
        meta: DiffMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        summary,
        diff,
    })
}

/// Drop ignored names, borrowing the input untouched when nothing is ignored.
fn retain_compared<'a>(config: &DiffConfig, metrics: &'a [Metric]) -> Cow<'a, [Metric]> {
    if config.ignore_names.is_empty() {
        return Cow::Borrowed(metrics);
    }
    Cow::Owned(
        metrics
            .iter()
            .filter(|m| !config.is_ignored(&m.name))
            .cloned()
            .collect(),
    )
}

impl DiffReport {
    pub fn to_json(&self) -> Result<String, DiffError> {
        serde_json::to_string_pretty(self).map_err(|e| DiffError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu(pod: &str) -> Metric {
        Metric::new("cpu.usage").with_tag("pod", pod)
    }

    #[test]
    fn empty_inputs_yield_empty_diff() {
        assert!(diff_metrics(&[], &[]).is_empty());
    }

    #[test]
    fn partial_spec_tolerates_unconstrained_fields() {
        let expected = vec![cpu("")];
        let actual = vec![Metric::new("cpu.usage")
            .with_value("42")
            .with_timestamp("1000")
            .with_tag("pod", "abc")
            .with_tag("node", "n1")];
        assert!(diff_metrics(&expected, &actual).is_empty());
    }

    #[test]
    fn value_mismatch_reports_both_sides() {
        let expected = vec![cpu("abc").with_value("42")];
        let actual = vec![cpu("abc").with_value("43")];
        let diff = diff_metrics(&expected, &actual);
        assert_eq!(diff.missing, expected);
        assert_eq!(diff.extra, actual);
    }

    #[test]
    fn tag_value_mismatch_reports_both_sides() {
        let expected = vec![Metric::new("x").with_tag("env", "prod")];
        let actual = vec![Metric::new("x").with_tag("env", "staging")];
        let diff = diff_metrics(&expected, &actual);
        assert_eq!(diff.missing.len(), 1);
        assert_eq!(diff.extra.len(), 1);
    }

    #[test]
    fn missing_presence_tag_reports_both_sides() {
        let expected = vec![cpu("")];
        let actual = vec![Metric::new("cpu.usage").with_tag("node", "n1")];
        let diff = diff_metrics(&expected, &actual);
        assert_eq!(diff.missing, expected);
        assert_eq!(diff.extra, actual);
    }

    #[test]
    fn unknown_name_is_extra() {
        let expected = vec![cpu("")];
        let actual = vec![cpu("a"), Metric::new("disk.free").with_value("9")];
        let diff = diff_metrics(&expected, &actual);
        assert!(diff.missing.is_empty());
        assert_eq!(diff.extra, vec![Metric::new("disk.free").with_value("9")]);
    }

    #[test]
    fn run_reject_policy_flags_unknown_name() {
        let config = DiffConfig {
            unknown_names: UnknownNamePolicy::Reject,
            ..DiffConfig::default()
        };
        let err = run(&config, &[cpu("")], &[cpu("a"), Metric::new("disk.free")]).unwrap_err();
        assert!(matches!(err, DiffError::UnknownName { ref name } if name == "disk.free"));

        // Known names that simply fail to match are still ordinary diffs.
        let report = run(&config, &[cpu("a")], &[cpu("b")]).unwrap();
        assert_eq!(report.summary.missing, 1);
        assert_eq!(report.summary.extra, 1);
    }

    #[test]
    fn run_ignores_configured_names() {
        let config = DiffConfig {
            ignore_names: vec!["collector.version".into()],
            ..DiffConfig::default()
        };
        let expected = vec![cpu(""), Metric::new("collector.version").with_value("1")];
        let actual = vec![cpu("a"), Metric::new("collector.version").with_value("2")];
        let report = run(&config, &expected, &actual).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.summary.expected, 1);
        assert_eq!(report.summary.actual, 1);
        assert_eq!(report.summary.matched_keys, 1);
    }

    #[test]
    fn report_json_shape() {
        let report = run(&DiffConfig::default(), &[cpu("a")], &[]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["meta"]["config_name"], "metric-diff");
        assert_eq!(json["summary"]["missing"], 1);
        assert_eq!(json["diff"]["missing"][0]["name"], "cpu.usage");
        assert_eq!(json["diff"]["missing"][0]["tags"]["pod"], "a");
        assert!(json["diff"]["extra"].as_array().unwrap().is_empty());
    }
}
