//! Validated key/value override store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use reefkeep_core::{GameTables, ThreatCost};

const PAYLOAD_VERSION: u32 = 1;

/// Declaration of one tunable parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamSpec {
    key: String,
    min: f64,
    max: f64,
    default: f64,
}

impl ParamSpec {
    /// Creates a new parameter declaration.
    #[must_use]
    pub fn new(key: impl Into<String>, min: f64, max: f64, default: f64) -> Self {
        Self {
            key: key.into(),
            min,
            max,
            default,
        }
    }

    /// The registry key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lower clamp bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper clamp bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Baseline value captured from the shipped tables.
    #[must_use]
    pub const fn default_value(&self) -> f64 {
        self.default
    }
}

/// Rejection reasons for a single override write.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalanceError {
    /// The key is not declared in the registry.
    #[error("unknown balance key `{0}`")]
    UnknownKey(String),
    /// The value is NaN or infinite.
    #[error("value for `{0}` is not a finite number")]
    NotFinite(String),
}

/// Rejection reasons for an imported override payload. Imports fail closed:
/// a rejected payload applies nothing.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The payload is not parseable JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The payload parsed but carries no overrides object.
    #[error("payload has no overrides object")]
    MissingOverrides,
    /// The payload declares a version this build does not understand.
    #[error("unsupported payload version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Serialize, Deserialize)]
struct OverridePayload {
    version: u32,
    #[serde(default)]
    overrides: Option<BTreeMap<String, serde_json::Value>>,
}

/// Injected override store consulted on every tuning read.
///
/// Unknown keys and non-finite values are rejected on write; in-range
/// validation clamps rather than rejects, matching the tuner UI's sliders.
#[derive(Clone, Debug)]
pub struct BalanceStore {
    params: Vec<ParamSpec>,
    overrides: BTreeMap<String, f64>,
}

impl BalanceStore {
    /// Creates a store over an explicit param registry.
    #[must_use]
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self {
            params,
            overrides: BTreeMap::new(),
        }
    }

    /// Builds the standard registry for the provided tables, capturing the
    /// shipped values as baselines.
    #[must_use]
    pub fn for_tables(tables: &GameTables) -> Self {
        let mut params = Vec::new();

        for (_, archetype) in tables.catalog.iter() {
            let slug = archetype.slug();
            let cost = tables
                .budgets
                .cost_for(slug)
                .unwrap_or(ThreatCost::FALLBACK);
            params.push(ParamSpec::new(
                format!("enemy.{slug}.weight"),
                0.0,
                100.0,
                archetype.spawn_weight(),
            ));
            params.push(ParamSpec::new(
                format!("enemy.{slug}.xp"),
                0.0,
                1_000.0,
                archetype.xp_value(),
            ));
            params.push(ParamSpec::new(
                format!("enemy.{slug}.durability"),
                0.0,
                500.0,
                f64::from(cost.durability),
            ));
            params.push(ParamSpec::new(
                format!("enemy.{slug}.damage"),
                0.0,
                500.0,
                f64::from(cost.damage),
            ));
            params.push(ParamSpec::new(
                format!("enemy.{slug}.cognitive"),
                0.0,
                10.0,
                f64::from(cost.cognitive),
            ));
        }

        for (kind, label, max_total) in [
            (reefkeep_core::WaveKind::Lesson, "lesson", 20_000.0),
            (reefkeep_core::WaveKind::Integration, "integration", 40_000.0),
            (reefkeep_core::WaveKind::Exam, "exam", 60_000.0),
        ] {
            let budget = tables.budgets.kind_budget(kind);
            params.push(ParamSpec::new(
                format!("waves.budget.{label}_total"),
                0.0,
                max_total,
                f64::from(budget.total),
            ));
            params.push(ParamSpec::new(
                format!("waves.budget.{label}_cognitive"),
                0.0,
                1_000.0,
                f64::from(budget.max_cognitive),
            ));
        }

        params.push(ParamSpec::new(
            "waves.pacing.stress_threshold",
            0.0,
            50.0,
            f64::from(tables.pacing.stress_pause_threshold),
        ));
        params.push(ParamSpec::new(
            "waves.pacing.breather_interval",
            1.0,
            100.0,
            f64::from(tables.pacing.micro_breather_interval),
        ));
        params.push(ParamSpec::new(
            "waves.pacing.breather_frames",
            0.0,
            2_000.0,
            f64::from(tables.pacing.micro_breather_frames),
        ));

        Self::new(params)
    }

    /// All declared parameters.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    fn spec(&self, key: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|param| param.key() == key)
    }

    /// Effective value for a registered key: the override if present, else
    /// the captured baseline. Unregistered keys resolve to `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        let spec = self.spec(key)?;
        Some(
            self.overrides
                .get(key)
                .copied()
                .unwrap_or(spec.default_value()),
        )
    }

    /// The override alone, without falling back to the baseline.
    #[must_use]
    pub fn override_for(&self, key: &str) -> Option<f64> {
        self.overrides.get(key).copied()
    }

    /// Applies an override, clamped into the param's declared range.
    ///
    /// On rejection the previous value is retained untouched.
    pub fn set(&mut self, key: &str, value: f64) -> Result<f64, BalanceError> {
        let spec = self
            .spec(key)
            .ok_or_else(|| BalanceError::UnknownKey(key.to_owned()))?;
        if !value.is_finite() {
            return Err(BalanceError::NotFinite(key.to_owned()));
        }
        let clamped = value.clamp(spec.min(), spec.max());
        let _ = self.overrides.insert(spec.key().to_owned(), clamped);
        Ok(clamped)
    }

    /// Removes one override, restoring the baseline.
    pub fn clear(&mut self, key: &str) -> Result<(), BalanceError> {
        if self.spec(key).is_none() {
            return Err(BalanceError::UnknownKey(key.to_owned()));
        }
        let _ = self.overrides.remove(key);
        Ok(())
    }

    /// Removes every override.
    pub fn reset_all(&mut self) {
        self.overrides.clear();
    }

    /// Serialises the current overrides as a versioned JSON envelope.
    #[must_use]
    pub fn export_json(&self) -> String {
        let payload = OverridePayload {
            version: PAYLOAD_VERSION,
            overrides: Some(
                self.overrides
                    .iter()
                    .map(|(key, value)| (key.clone(), serde_json::json!(value)))
                    .collect(),
            ),
        };
        serde_json::to_string_pretty(&payload).unwrap_or_else(|_| String::from("{}"))
    }

    /// Replaces the override set from a pasted JSON envelope.
    ///
    /// Fails closed: a malformed payload applies nothing. Unknown keys and
    /// non-numeric values inside a well-formed payload are skipped; the
    /// returned count reports how many overrides were applied.
    pub fn import_json(&mut self, json: &str) -> Result<usize, ImportError> {
        let payload: OverridePayload = serde_json::from_str(json)?;
        if payload.version != PAYLOAD_VERSION {
            return Err(ImportError::UnsupportedVersion(payload.version));
        }
        let overrides = payload.overrides.ok_or(ImportError::MissingOverrides)?;

        let mut next = BTreeMap::new();
        for (key, value) in overrides {
            let Some(spec) = self.spec(&key) else {
                continue;
            };
            let Some(number) = value.as_f64() else {
                continue;
            };
            if !number.is_finite() {
                continue;
            }
            let _ = next.insert(
                spec.key().to_owned(),
                number.clamp(spec.min(), spec.max()),
            );
        }

        let applied = next.len();
        self.overrides = next;
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::{BalanceError, BalanceStore, ImportError};
    use reefkeep_core::GameTables;

    fn store() -> BalanceStore {
        BalanceStore::for_tables(&GameTables::standard())
    }

    #[test]
    fn baseline_values_come_from_tables() {
        let store = store();
        assert_eq!(store.get("enemy.grunt.weight"), Some(10.0));
        assert_eq!(store.get("enemy.grunt.durability"), Some(12.0));
        assert_eq!(store.get("waves.budget.lesson_total"), Some(500.0));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut store = store();
        assert_eq!(store.get("enemy.kraken.weight"), None);
        assert_eq!(
            store.set("enemy.kraken.weight", 5.0),
            Err(BalanceError::UnknownKey("enemy.kraken.weight".to_owned()))
        );
    }

    #[test]
    fn non_finite_values_leave_previous_value_intact() {
        let mut store = store();
        assert_eq!(store.set("enemy.grunt.weight", 4.0), Ok(4.0));
        assert!(store.set("enemy.grunt.weight", f64::NAN).is_err());
        assert_eq!(store.get("enemy.grunt.weight"), Some(4.0));
    }

    #[test]
    fn out_of_range_values_clamp() {
        let mut store = store();
        assert_eq!(store.set("enemy.grunt.weight", -3.0), Ok(0.0));
        assert_eq!(store.set("enemy.grunt.weight", 999.0), Ok(100.0));
    }

    #[test]
    fn clear_restores_the_baseline() {
        let mut store = store();
        let _ = store.set("waves.budget.lesson_total", 800.0).expect("set");
        store.clear("waves.budget.lesson_total").expect("clear");
        assert_eq!(store.get("waves.budget.lesson_total"), Some(500.0));
    }

    #[test]
    fn export_import_round_trips() {
        let mut store = store();
        let _ = store.set("enemy.minnow.weight", 12.0).expect("set");
        let json = store.export_json();

        let mut other = super::BalanceStore::for_tables(&GameTables::standard());
        let applied = other.import_json(&json).expect("import");
        assert_eq!(applied, 1);
        assert_eq!(other.get("enemy.minnow.weight"), Some(12.0));
    }

    #[test]
    fn malformed_imports_fail_closed() {
        let mut store = store();
        let _ = store.set("enemy.grunt.weight", 4.0).expect("set");

        assert!(matches!(
            store.import_json("not json"),
            Err(ImportError::InvalidJson(_))
        ));
        assert!(matches!(
            store.import_json(r#"{"version":1}"#),
            Err(ImportError::MissingOverrides)
        ));
        assert!(matches!(
            store.import_json(r#"{"version":9,"overrides":{}}"#),
            Err(ImportError::UnsupportedVersion(9))
        ));
        // Nothing was applied by the rejected payloads.
        assert_eq!(store.get("enemy.grunt.weight"), Some(4.0));
    }

    #[test]
    fn import_skips_unknown_keys_and_reports_count() {
        let mut store = store();
        let applied = store
            .import_json(
                r#"{"version":1,"overrides":{"enemy.grunt.weight":6.0,"enemy.kraken.weight":1.0,"enemy.minnow.weight":"soup"}}"#,
            )
            .expect("well-formed envelope");
        assert_eq!(applied, 1);
        assert_eq!(store.get("enemy.grunt.weight"), Some(6.0));
    }
}
