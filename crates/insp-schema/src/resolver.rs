//! # Tab Applicability Resolver
//!
//! Maps a unit configuration to the ordered list of checklist tabs that
//! apply to it.
//!
//! ```text
//! pat_testable  ─▶ general, pat, results
//! otherwise     ─▶ general, user_height, [slide], structure, [anchorage],
//!                  materials, fan, [enclosed], results
//!
//!   slide      iff has_slide
//!   anchorage  iff not indoor_only
//!   enclosed   iff is_totally_enclosed
//! ```
//!
//! Unknown flags count as `false`. The output is [`SectionKind::all()`]
//! filtered, so order is always canonical. An unrecognised `unit_type` is a
//! hard error: applicability cannot be decided safely without it.

use insp_core::{SectionKind, UnitConfiguration, UnitType, ValidationError};
use serde::Serialize;

/// Applicable tabs for one unit configuration, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTabs {
    unit_type: UnitType,
    tabs: Vec<SectionKind>,
}

impl ResolvedTabs {
    /// The parsed unit type the tabs were resolved for.
    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    /// The tabs in display order, `general` first and `results` last.
    pub fn tabs(&self) -> &[SectionKind] {
        &self.tabs
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.tabs.contains(&kind)
    }

    /// Applicable assessment sections only (pseudo-sections removed).
    pub fn assessment_sections(&self) -> impl Iterator<Item = SectionKind> + '_ {
        self.tabs.iter().copied().filter(SectionKind::is_assessment)
    }

    pub fn into_vec(self) -> Vec<SectionKind> {
        self.tabs
    }
}

/// Resolve the applicable tabs for `config`.
pub fn resolve_tabs(config: &UnitConfiguration) -> Result<ResolvedTabs, ValidationError> {
    let unit_type = config.parsed_unit_type()?;
    let has_slide = config.has_slide.unwrap_or(false);
    let enclosed = config.is_totally_enclosed.unwrap_or(false);
    let indoor_only = config.indoor_only.unwrap_or(false);

    let tabs: Vec<SectionKind> = SectionKind::all()
        .iter()
        .copied()
        .filter(|kind| is_applicable(*kind, unit_type, has_slide, enclosed, indoor_only))
        .collect();

    tracing::debug!(
        unit_type = %unit_type,
        tabs = ?tabs,
        "resolved applicable tabs"
    );

    Ok(ResolvedTabs { unit_type, tabs })
}

fn is_applicable(
    kind: SectionKind,
    unit_type: UnitType,
    has_slide: bool,
    enclosed: bool,
    indoor_only: bool,
) -> bool {
    if !unit_type.is_inflatable() {
        return matches!(
            kind,
            SectionKind::General | SectionKind::Pat | SectionKind::Results
        );
    }
    match kind {
        SectionKind::General
        | SectionKind::UserHeight
        | SectionKind::Structure
        | SectionKind::Materials
        | SectionKind::Fan
        | SectionKind::Results => true,
        SectionKind::Slide => has_slide,
        SectionKind::Anchorage => !indoor_only,
        SectionKind::Enclosed => enclosed,
        SectionKind::Pat => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use insp_core::SectionKind::*;

    fn config(
        unit_type: UnitType,
        has_slide: Option<bool>,
        enclosed: Option<bool>,
        indoor: Option<bool>,
    ) -> UnitConfiguration {
        UnitConfiguration {
            unit_type: unit_type.as_str().to_string(),
            has_slide,
            is_totally_enclosed: enclosed,
            indoor_only: indoor,
        }
    }

    #[test]
    fn pat_testable_ignores_inflatable_flags() {
        let tabs = resolve_tabs(&config(
            UnitType::PatTestable,
            Some(true),
            Some(true),
            Some(false),
        ))
        .unwrap();
        assert_eq!(tabs.tabs(), &[General, Pat, Results]);
    }

    #[test]
    fn enclosed_bounce_house_outdoors() {
        let tabs = resolve_tabs(&config(
            UnitType::BounceHouse,
            Some(false),
            Some(true),
            Some(false),
        ))
        .unwrap();
        assert!(tabs.contains(Enclosed));
        assert!(tabs.contains(Anchorage));
        assert!(!tabs.contains(Slide));
        assert_eq!(
            tabs.tabs(),
            &[General, UserHeight, Structure, Anchorage, Materials, Fan, Enclosed, Results]
        );
    }

    #[test]
    fn unknown_flags_count_as_false() {
        let tabs = resolve_tabs(&config(UnitType::Combo, None, None, None)).unwrap();
        assert_eq!(
            tabs.tabs(),
            &[General, UserHeight, Structure, Anchorage, Materials, Fan, Results]
        );
    }

    #[test]
    fn indoor_only_drops_anchorage() {
        let tabs = resolve_tabs(&config(UnitType::Slide, Some(true), None, Some(true))).unwrap();
        assert!(tabs.contains(Slide));
        assert!(!tabs.contains(Anchorage));
    }

    #[test]
    fn assessment_sections_skip_pseudo_tabs() {
        let tabs = resolve_tabs(&config(UnitType::PatTestable, None, None, None)).unwrap();
        assert_eq!(tabs.assessment_sections().collect::<Vec<_>>(), vec![Pat]);
    }

    #[test]
    fn unknown_unit_type_is_an_error() {
        let cfg = UnitConfiguration {
            unit_type: "hot_air_balloon".into(),
            has_slide: Some(true),
            is_totally_enclosed: None,
            indoor_only: None,
        };
        assert_eq!(
            resolve_tabs(&cfg),
            Err(ValidationError::UnknownUnitType("hot_air_balloon".into()))
        );
    }

    fn any_unit_type() -> impl Strategy<Value = UnitType> {
        prop::sample::select(UnitType::all().to_vec())
    }

    proptest! {
        /// Resolution is deterministic and always framed by general/results.
        #[test]
        fn resolve_is_pure_and_framed(
            unit_type in any_unit_type(),
            has_slide in any::<Option<bool>>(),
            enclosed in any::<Option<bool>>(),
            indoor in any::<Option<bool>>(),
        ) {
            let cfg = config(unit_type, has_slide, enclosed, indoor);
            let a = resolve_tabs(&cfg).unwrap();
            let b = resolve_tabs(&cfg).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.tabs().first(), Some(&General));
            prop_assert_eq!(a.tabs().last(), Some(&Results));
            prop_assert!(a.tabs().windows(2).all(|w| w[0] < w[1]));
        }

        /// Inflatable tabs never include the appliance test, and vice versa.
        #[test]
        fn pat_and_inflatable_sections_are_disjoint(
            unit_type in any_unit_type(),
            has_slide in any::<Option<bool>>(),
            enclosed in any::<Option<bool>>(),
            indoor in any::<Option<bool>>(),
        ) {
            let tabs = resolve_tabs(&config(unit_type, has_slide, enclosed, indoor)).unwrap();
            prop_assert_eq!(tabs.contains(Pat), unit_type == UnitType::PatTestable);
            prop_assert_eq!(tabs.contains(Structure), unit_type != UnitType::PatTestable);
        }
    }
}
