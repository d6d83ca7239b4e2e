//! # Compliance Policy Tables
//!
//! The numeric thresholds of the governing standard are policy data, not
//! engine logic. [`CompliancePolicy::default()`] carries the built-in
//! EN 14960 values; a deployment can swap them by loading a YAML or JSON
//! document of the same shape:
//!
//! ```yaml
//! anchors:
//!   method: wind_load
//!   area_coefficient: 114.0
//!   safety_factor: 1.5
//!   anchor_capacity_newtons: 1600.0
//! user_capacity:
//!   bands:
//!     - { height_mm: 1000, area_per_user_m2: 1.0 }
//!     - { height_mm: 1200, area_per_user_m2: 1.33 }
//!     - { height_mm: 1500, area_per_user_m2: 1.66 }
//!     - { height_mm: 1800, area_per_user_m2: 2.0 }
//! ```
//!
//! Policies are validated on load and then held read-only.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};

/// Full set of policy tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompliancePolicy {
    #[serde(default)]
    pub anchors: AnchorPolicy,
    #[serde(default)]
    pub user_capacity: CapacityPolicy,
}

/// How the minimum anchor count scales with the unit's footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// Wind load over the area: `ceil(area × coefficient × safety / capacity)`.
    WindLoad {
        area_coefficient: f64,
        safety_factor: f64,
        anchor_capacity_newtons: f64,
    },
    /// Step table: the first band whose `max_area_m2` covers the area wins;
    /// a band without `max_area_m2` covers everything above.
    Table { bands: Vec<AnchorBand> },
}

impl Default for AnchorPolicy {
    fn default() -> Self {
        Self::WindLoad {
            area_coefficient: 114.0,
            safety_factor: 1.5,
            anchor_capacity_newtons: 1600.0,
        }
    }
}

/// One row of a step anchor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorBand {
    #[serde(default)]
    pub max_area_m2: Option<f64>,
    pub anchors: u32,
}

/// Floor area each user needs, per user-height band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPolicy {
    pub bands: Vec<HeightBand>,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            bands: vec![
                HeightBand::new(1000, 1.0),
                HeightBand::new(1200, 1.33),
                HeightBand::new(1500, 1.66),
                HeightBand::new(1800, 2.0),
            ],
        }
    }
}

impl CapacityPolicy {
    /// Area per user for the band at exactly `height_mm`.
    pub fn area_per_user(&self, height_mm: u32) -> Option<f64> {
        self.bands
            .iter()
            .find(|b| b.height_mm == height_mm)
            .map(|b| b.area_per_user_m2)
    }
}

/// One user-height band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightBand {
    pub height_mm: u32,
    pub area_per_user_m2: f64,
}

impl HeightBand {
    pub fn new(height_mm: u32, area_per_user_m2: f64) -> Self {
        Self {
            height_mm,
            area_per_user_m2,
        }
    }
}

impl CompliancePolicy {
    /// Load and validate a policy from a YAML file.
    pub fn from_yaml_file(path: &Path) -> PolicyResult<Self> {
        let content = read_policy_file(path)?;
        let policy: Self = serde_yaml::from_str(&content).map_err(|e| PolicyError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load and validate a policy from a JSON file.
    pub fn from_json_file(path: &Path) -> PolicyResult<Self> {
        let content = read_policy_file(path)?;
        let policy: Self = serde_json::from_str(&content).map_err(|e| PolicyError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load by extension: `.json` as JSON, anything else as YAML.
    pub fn from_file(path: &Path) -> PolicyResult<Self> {
        let loaded = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_yaml_file(path),
        };
        match &loaded {
            Ok(policy) => tracing::info!(
                path = %path.display(),
                height_bands = policy.user_capacity.bands.len(),
                "loaded compliance policy"
            ),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "rejected compliance policy"
            ),
        }
        loaded
    }

    /// Check the tables are usable: positive divisors, strictly ascending
    /// bands, and an anchor table that ends with an open band.
    pub fn validate(&self) -> PolicyResult<()> {
        match &self.anchors {
            AnchorPolicy::WindLoad {
                area_coefficient,
                safety_factor,
                anchor_capacity_newtons,
            } => {
                for (name, v) in [
                    ("area_coefficient", area_coefficient),
                    ("safety_factor", safety_factor),
                    ("anchor_capacity_newtons", anchor_capacity_newtons),
                ] {
                    if !v.is_finite() || *v <= 0.0 {
                        return Err(PolicyError::Invalid(format!(
                            "anchors.{name} must be positive, got {v}"
                        )));
                    }
                }
            }
            AnchorPolicy::Table { bands } => {
                let (last, bounded) = bands.split_last().ok_or_else(|| {
                    PolicyError::Invalid("anchor table has no bands".into())
                })?;
                if last.max_area_m2.is_some() {
                    return Err(PolicyError::Invalid(
                        "last anchor band must omit max_area_m2".into(),
                    ));
                }
                let mut prev = 0.0;
                for band in bounded {
                    match band.max_area_m2 {
                        Some(max) if max > prev => prev = max,
                        other => {
                            return Err(PolicyError::Invalid(format!(
                                "anchor band bounds must be strictly ascending, got {other:?} after {prev}"
                            )))
                        }
                    }
                }
            }
        }

        if self.user_capacity.bands.is_empty() {
            return Err(PolicyError::Invalid("user capacity has no bands".into()));
        }
        let mut prev_height = 0;
        for band in &self.user_capacity.bands {
            if band.height_mm <= prev_height {
                return Err(PolicyError::Invalid(format!(
                    "user height bands must be strictly ascending, got {} after {prev_height}",
                    band.height_mm
                )));
            }
            if !band.area_per_user_m2.is_finite() || band.area_per_user_m2 <= 0.0 {
                return Err(PolicyError::Invalid(format!(
                    "area per user for {}mm must be positive",
                    band.height_mm
                )));
            }
            prev_height = band.height_mm;
        }
        Ok(())
    }
}

fn read_policy_file(path: &Path) -> PolicyResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PolicyError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PolicyError::Io(e)
        }
    })
}
