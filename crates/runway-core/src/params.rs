//! Partial parameter records for construction and snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::units::DisplayUnit;

/// Parameter record accepted by [`GrowthModel::create`] and returned by
/// [`GrowthModel::to_params`].
///
/// Every field is optional; absent fields take the model defaults. Unknown
/// keys are kept in `passthrough` and carried through snapshots untouched.
///
/// [`GrowthModel::create`]: crate::model::GrowthModel::create
/// [`GrowthModel::to_params`]: crate::model::GrowthModel::to_params
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthParams {
    /// Revenue at week 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev0: Option<f64>,
    /// Expense at week 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp0: Option<f64>,
    /// Fractional weekly revenue growth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev_growth: Option<f64>,
    /// Fractional weekly expense growth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_growth: Option<f64>,
    /// Horizon in weeks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Display unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<DisplayUnit>,
    /// Upper clamp for dragged flow values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_flow: Option<f64>,
    /// Debug overlay flag for the presentation layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_debug: Option<bool>,
    /// Caller-defined fields carried verbatim.
    #[serde(flatten)]
    pub passthrough: BTreeMap<String, serde_json::Value>,
}

impl GrowthParams {
    /// Parse a record from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialize the record as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Layer `overrides` on top of `self`: every field set in `overrides`
    /// wins, passthrough maps are merged key by key.
    #[must_use]
    pub fn merged(mut self, overrides: Self) -> Self {
        self.rev0 = overrides.rev0.or(self.rev0);
        self.exp0 = overrides.exp0.or(self.exp0);
        self.rev_growth = overrides.rev_growth.or(self.rev_growth);
        self.exp_growth = overrides.exp_growth.or(self.exp_growth);
        self.duration = overrides.duration.or(self.duration);
        self.units = overrides.units.or(self.units);
        self.max_flow = overrides.max_flow.or(self.max_flow);
        self.ui_debug = overrides.ui_debug.or(self.ui_debug);
        self.passthrough.extend(overrides.passthrough);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_parses() {
        let p = GrowthParams::from_json("{}").unwrap();
        assert_eq!(p, GrowthParams::default());
    }

    #[test]
    fn camel_case_keys() {
        let p = GrowthParams::from_json(
            r#"{"rev0": 250, "revGrowth": 0.04, "expGrowth": 0.01, "maxFlow": 5e5, "units": "month"}"#,
        )
        .unwrap();
        assert_eq!(p.rev0, Some(250.0));
        assert_eq!(p.rev_growth, Some(0.04));
        assert_eq!(p.exp_growth, Some(0.01));
        assert_eq!(p.max_flow, Some(500_000.0));
        assert_eq!(p.units, Some(DisplayUnit::Month));
        assert!(p.passthrough.is_empty());
    }

    #[test]
    fn unknown_keys_are_passed_through() {
        let p = GrowthParams::from_json(r#"{"exp0": 900, "scenario": "seed", "rev": 3}"#).unwrap();
        assert_eq!(p.exp0, Some(900.0));
        assert_eq!(p.passthrough["scenario"], serde_json::json!("seed"));
        assert_eq!(p.passthrough.len(), 2);

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["scenario"], "seed");
        assert!(json.get("rev0").is_none());
    }

    #[test]
    fn merged_prefers_overrides() {
        let base = GrowthParams {
            rev0: Some(100.0),
            exp0: Some(2000.0),
            ..Default::default()
        };
        let overrides = GrowthParams {
            exp0: Some(3000.0),
            units: Some(DisplayUnit::Year),
            ..Default::default()
        };
        let p = base.merged(overrides);
        assert_eq!(p.rev0, Some(100.0));
        assert_eq!(p.exp0, Some(3000.0));
        assert_eq!(p.units, Some(DisplayUnit::Year));
    }

    #[test]
    fn invalid_unit_is_an_error() {
        assert!(GrowthParams::from_json(r#"{"units": "decade"}"#).is_err());
    }
}
