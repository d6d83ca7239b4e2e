//! # Units and Unit Configuration
//!
//! A [`Unit`] is the physical thing being inspected. Its configuration (type
//! plus three optional flags) decides which checklist sections apply; its
//! stored measurements are only ever a *source* for copying into a new
//! inspection. A unit is never complete or compliant itself.
//!
//! [`UnitConfiguration`] keeps `unit_type` as the raw persisted string. The
//! applicability resolver is the one place it is parsed, so an unknown type
//! surfaces there as a hard error instead of being coerced at load time.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::field::FieldSet;
use crate::identity::UnitId;
use crate::section::SectionKind;

/// The kinds of unit the system inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    BounceHouse,
    Slide,
    Combo,
    ObstacleCourse,
    TotallyEnclosed,
    /// Non-inflatable appliance assessed only by portable appliance test.
    PatTestable,
}

impl UnitType {
    /// All unit types.
    pub fn all() -> &'static [UnitType] {
        &[
            Self::BounceHouse,
            Self::Slide,
            Self::Combo,
            Self::ObstacleCourse,
            Self::TotallyEnclosed,
            Self::PatTestable,
        ]
    }

    /// The persisted identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BounceHouse => "bounce_house",
            Self::Slide => "slide",
            Self::Combo => "combo",
            Self::ObstacleCourse => "obstacle_course",
            Self::TotallyEnclosed => "totally_enclosed",
            Self::PatTestable => "pat_testable",
        }
    }

    /// Whether this type is an inflatable (everything except appliances).
    pub fn is_inflatable(&self) -> bool {
        !matches!(self, Self::PatTestable)
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bounce_house" => Ok(Self::BounceHouse),
            "slide" => Ok(Self::Slide),
            "combo" => Ok(Self::Combo),
            "obstacle_course" => Ok(Self::ObstacleCourse),
            "totally_enclosed" => Ok(Self::TotallyEnclosed),
            "pat_testable" => Ok(Self::PatTestable),
            other => Err(ValidationError::UnknownUnitType(other.to_string())),
        }
    }
}

/// The configuration inputs to section applicability.
///
/// Each flag may be unknown (`None`); unknown is treated as `false` for
/// applicability purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitConfiguration {
    /// Raw persisted unit type, parsed by the resolver.
    pub unit_type: String,
    #[serde(default)]
    pub has_slide: Option<bool>,
    #[serde(default)]
    pub is_totally_enclosed: Option<bool>,
    #[serde(default)]
    pub indoor_only: Option<bool>,
}

impl UnitConfiguration {
    /// A configuration of the given type with every flag unknown.
    pub fn new(unit_type: UnitType) -> Self {
        Self {
            unit_type: unit_type.as_str().to_string(),
            has_slide: None,
            is_totally_enclosed: None,
            indoor_only: None,
        }
    }

    pub fn with_slide(mut self, has_slide: bool) -> Self {
        self.has_slide = Some(has_slide);
        self
    }

    pub fn with_totally_enclosed(mut self, enclosed: bool) -> Self {
        self.is_totally_enclosed = Some(enclosed);
        self
    }

    pub fn with_indoor_only(mut self, indoor_only: bool) -> Self {
        self.indoor_only = Some(indoor_only);
        self
    }

    /// Parse the stored unit type.
    pub fn parsed_unit_type(&self) -> Result<UnitType, ValidationError> {
        self.unit_type.parse()
    }
}

/// A physical unit with the measurements last recorded against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub configuration: UnitConfiguration,
    /// Stored measurements per section (`general` holds the footprint).
    #[serde(default)]
    pub measurements: BTreeMap<SectionKind, FieldSet>,
}

impl Unit {
    /// A unit with no stored measurements.
    pub fn new(name: impl Into<String>, configuration: UnitConfiguration) -> Self {
        Self {
            id: UnitId::new(),
            name: name.into(),
            configuration,
            measurements: BTreeMap::new(),
        }
    }
}
