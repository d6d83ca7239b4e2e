//! # Section Kind — Single Source of Truth
//!
//! Defines the `SectionKind` enum: every checklist tab an inspection can
//! show. Two of them are pseudo-sections (`General`, the inspection's own
//! top-level fields, and `Results`, the overall verdict); the other eight are
//! assessment sections with their own stored instance.
//!
//! Declaration order is canonical tab order. The applicability resolver
//! filters [`SectionKind::all()`] rather than building its own list, so the
//! UI order cannot drift from this file.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// A checklist tab of an inspection.
///
/// | # | Kind | Stored instance |
/// |---|------|-----------------|
/// |  1 | General | no (inspection fields) |
/// |  2 | UserHeight | yes |
/// |  3 | Slide | yes |
/// |  4 | Structure | yes |
/// |  5 | Anchorage | yes |
/// |  6 | Materials | yes |
/// |  7 | Fan | yes |
/// |  8 | Enclosed | yes |
/// |  9 | Pat | yes |
/// | 10 | Results | no (inspection fields) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// The inspection's own top-level fields (date, location, dimensions).
    General,
    /// Containing walls, play area, and user capacity per height band.
    UserHeight,
    /// Slide platform, walls, and runout.
    Slide,
    /// Seams, stitching, pressure, and stability.
    Structure,
    /// Ground anchors.
    Anchorage,
    /// Ropes, netting, zips, fabric.
    Materials,
    /// Blower and its electrical checks.
    Fan,
    /// Exits of a totally enclosed unit.
    Enclosed,
    /// Portable appliance test.
    Pat,
    /// Overall pass/fail and the risk assessment narrative.
    Results,
}

/// Total number of section kinds, pseudo-sections included.
pub const SECTION_KIND_COUNT: usize = 10;

/// Number of kinds that own a stored section instance.
pub const ASSESSMENT_KIND_COUNT: usize = 8;

impl SectionKind {
    /// All section kinds in canonical tab order.
    pub fn all() -> &'static [SectionKind] {
        &[
            Self::General,
            Self::UserHeight,
            Self::Slide,
            Self::Structure,
            Self::Anchorage,
            Self::Materials,
            Self::Fan,
            Self::Enclosed,
            Self::Pat,
            Self::Results,
        ]
    }

    /// The eight kinds that own a stored section instance, in tab order.
    pub fn assessment_kinds() -> &'static [SectionKind] {
        &[
            Self::UserHeight,
            Self::Slide,
            Self::Structure,
            Self::Anchorage,
            Self::Materials,
            Self::Fan,
            Self::Enclosed,
            Self::Pat,
        ]
    }

    /// Whether this kind owns a stored section instance.
    pub fn is_assessment(&self) -> bool {
        !matches!(self, Self::General | Self::Results)
    }

    /// The snake_case identifier, matching serde and the `section.field`
    /// label keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::UserHeight => "user_height",
            Self::Slide => "slide",
            Self::Structure => "structure",
            Self::Anchorage => "anchorage",
            Self::Materials => "materials",
            Self::Fan => "fan",
            Self::Enclosed => "enclosed",
            Self::Pat => "pat",
            Self::Results => "results",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "user_height" => Ok(Self::UserHeight),
            "slide" => Ok(Self::Slide),
            "structure" => Ok(Self::Structure),
            "anchorage" => Ok(Self::Anchorage),
            "materials" => Ok(Self::Materials),
            "fan" => Ok(Self::Fan),
            "enclosed" => Ok(Self::Enclosed),
            "pat" => Ok(Self::Pat),
            "results" => Ok(Self::Results),
            other => Err(ValidationError::UnknownSectionKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_lists() {
        assert_eq!(SectionKind::all().len(), SECTION_KIND_COUNT);
        assert_eq!(SectionKind::assessment_kinds().len(), ASSESSMENT_KIND_COUNT);
    }

    #[test]
    fn all_is_sorted_by_declaration_order() {
        let all = SectionKind::all();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(all.first(), Some(&SectionKind::General));
        assert_eq!(all.last(), Some(&SectionKind::Results));
    }

    #[test]
    fn assessment_kinds_exclude_pseudo_sections() {
        for kind in SectionKind::all() {
            assert_eq!(
                kind.is_assessment(),
                SectionKind::assessment_kinds().contains(kind),
                "{kind}"
            );
        }
    }

    #[test]
    fn as_str_parses_back_and_matches_serde() {
        for kind in SectionKind::all() {
            assert_eq!(kind.as_str().parse::<SectionKind>().unwrap(), *kind);
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Slide".parse::<SectionKind>().is_err());
        assert!("".parse::<SectionKind>().is_err());
    }
}
