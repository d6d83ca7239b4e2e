//! # Compliance Summary
//!
//! Runs the calculator over whatever an inspection has recorded. Each check
//! is `None` until all of its inputs are present and its section applies.
//! Failed checks become human-readable warnings; none of them gate the
//! lifecycle.

use insp_core::{FieldSet, Inspection, SectionKind};
use serde::{Deserialize, Serialize};

use crate::calculator::{
    effective_play_area, meets_anchor_requirements, meets_runout_requirements,
    meets_wall_height, required_anchors, required_runout, required_wall_height, total_anchors,
    user_capacity, BandCapacity,
};
use crate::policy::CompliancePolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorCheck {
    pub footprint_m2: f64,
    pub total: u32,
    pub required: u32,
    pub meets: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityCheck {
    pub effective_play_area: f64,
    pub bands: Vec<BandCapacity>,
    /// Bands (mm) whose recorded user count exceeds the computed capacity.
    pub exceeded: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallHeightCheck {
    pub platform_height: f64,
    pub containing_wall_height: f64,
    pub required: f64,
    pub meets: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunoutCheck {
    pub slide_platform_height: f64,
    pub runout: f64,
    pub required: f64,
    pub meets: bool,
}

/// Computed compliance values for one inspection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub anchors: Option<AnchorCheck>,
    pub capacity: Option<CapacityCheck>,
    pub wall_height: Option<WallHeightCheck>,
    pub runout: Option<RunoutCheck>,
    pub warnings: Vec<String>,
}

impl ComplianceSummary {
    /// Compute every check whose section is in `applicable`.
    pub fn compute(
        inspection: &Inspection,
        applicable: &[SectionKind],
        policy: &CompliancePolicy,
    ) -> Self {
        let section = |kind: SectionKind| {
            if applicable.contains(&kind) {
                inspection.fields(kind)
            } else {
                None
            }
        };

        let mut summary = Self {
            anchors: section(SectionKind::Anchorage)
                .and_then(|a| anchor_check(&inspection.general, a, policy)),
            capacity: section(SectionKind::UserHeight).and_then(|u| capacity_check(u, policy)),
            wall_height: section(SectionKind::UserHeight).and_then(wall_height_check),
            runout: section(SectionKind::Slide).and_then(runout_check),
            warnings: Vec::new(),
        };
        summary.collect_warnings(inspection.results.flag("passed"));
        summary
    }

    /// No computed check failed.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn collect_warnings(&mut self, passed: Option<bool>) {
        if let Some(a) = self.anchors.as_ref().filter(|a| !a.meets) {
            self.warnings.push(format!(
                "anchorage: {} anchors recorded, {} required for {:.2} m²",
                a.total, a.required, a.footprint_m2
            ));
        }
        if let Some(c) = &self.capacity {
            for height in &c.exceeded {
                self.warnings.push(format!(
                    "user_height: recorded users at {height}mm exceed computed capacity"
                ));
            }
        }
        if let Some(w) = self.wall_height.as_ref().filter(|w| !w.meets) {
            self.warnings.push(format!(
                "user_height: containing wall {:.2} m is below required {:.2} m",
                w.containing_wall_height, w.required
            ));
        }
        if let Some(r) = self.runout.as_ref().filter(|r| !r.meets) {
            self.warnings.push(format!(
                "slide: runout {:.2} m is below required {:.2} m",
                r.runout, r.required
            ));
        }
        if passed == Some(true) && !self.warnings.is_empty() {
            let n = self.warnings.len();
            self.warnings.push(format!(
                "results: marked passed despite {n} compliance warning(s)"
            ));
        }
    }
}

fn count(fields: &FieldSet, id: &str) -> Option<u32> {
    fields.integer(id).and_then(|v| u32::try_from(v).ok())
}

fn anchor_check(
    general: &FieldSet,
    anchorage: &FieldSet,
    policy: &CompliancePolicy,
) -> Option<AnchorCheck> {
    let total = total_anchors(
        count(anchorage, "num_low_anchors")?,
        count(anchorage, "num_high_anchors")?,
    );
    let footprint_m2 = general.number("width")? * general.number("length")?;
    let required = required_anchors(footprint_m2, &policy.anchors);
    Some(AnchorCheck {
        footprint_m2,
        total,
        required,
        meets: meets_anchor_requirements(total, required),
    })
}

fn capacity_check(user_height: &FieldSet, policy: &CompliancePolicy) -> Option<CapacityCheck> {
    let area = effective_play_area(
        user_height.number("play_area_length")?,
        user_height.number("play_area_width")?,
        user_height.number("negative_adjustment").unwrap_or(0.0),
    );
    let bands = user_capacity(
        area,
        user_height.number("tallest_user_height"),
        &policy.user_capacity,
    );
    let exceeded = bands
        .iter()
        .filter(|b| {
            count(user_height, &format!("users_at_{}mm", b.height_mm))
                .is_some_and(|recorded| recorded > b.users)
        })
        .map(|b| b.height_mm)
        .collect();
    Some(CapacityCheck {
        effective_play_area: area,
        bands,
        exceeded,
    })
}

fn wall_height_check(user_height: &FieldSet) -> Option<WallHeightCheck> {
    let platform_height = user_height.number("platform_height")?;
    let containing_wall_height = user_height.number("containing_wall_height")?;
    Some(WallHeightCheck {
        platform_height,
        containing_wall_height,
        required: required_wall_height(platform_height),
        meets: meets_wall_height(containing_wall_height, platform_height),
    })
}

fn runout_check(slide: &FieldSet) -> Option<RunoutCheck> {
    let slide_platform_height = slide.number("slide_platform_height")?;
    let runout = slide.number("runout")?;
    Some(RunoutCheck {
        slide_platform_height,
        runout,
        required: required_runout(slide_platform_height),
        meets: meets_runout_requirements(runout, slide_platform_height),
    })
}
