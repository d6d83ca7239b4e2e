//! # Section Schemas
//!
//! Static field tables, one per [`SectionKind`]. A field's [`FieldShape`]
//! decides whether it counts toward completeness and whether it may be
//! written:
//!
//! | Shape | Required | Writable | Value kind |
//! |-------|----------|----------|------------|
//! | `Measurement` | yes | yes | declared |
//! | `PassFlag` | yes (the flag) | yes | bool, plus optional comment |
//! | `Optional` | no | yes | declared |
//! | `Derived` | no | no | computed |
//!
//! Text measurements are the "comment is the value" fields (serial numbers,
//! descriptive types): the text itself is required.

use insp_core::{SectionKind, ValueKind};
use serde::Serialize;

/// Classification of a single checklist field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "shape", content = "kind")]
pub enum FieldShape {
    Measurement(ValueKind),
    PassFlag,
    Optional(ValueKind),
    Derived,
}

/// One field of a section schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub id: &'static str,
    pub shape: FieldShape,
    /// Only required when the unit is an inflatable.
    pub inflatable_only: bool,
}

impl FieldSpec {
    const fn measurement(id: &'static str, kind: ValueKind) -> Self {
        Self {
            id,
            shape: FieldShape::Measurement(kind),
            inflatable_only: false,
        }
    }

    const fn pass_flag(id: &'static str) -> Self {
        Self {
            id,
            shape: FieldShape::PassFlag,
            inflatable_only: false,
        }
    }

    const fn optional(id: &'static str, kind: ValueKind) -> Self {
        Self {
            id,
            shape: FieldShape::Optional(kind),
            inflatable_only: false,
        }
    }

    const fn derived(id: &'static str) -> Self {
        Self {
            id,
            shape: FieldShape::Derived,
            inflatable_only: false,
        }
    }

    const fn inflatable(mut self) -> Self {
        self.inflatable_only = true;
        self
    }

    /// Whether a null value makes the section incomplete for a unit.
    pub fn is_required(&self, inflatable: bool) -> bool {
        let required_shape = matches!(self.shape, FieldShape::Measurement(_) | FieldShape::PassFlag);
        required_shape && (inflatable || !self.inflatable_only)
    }

    /// Whether callers may write this field.
    pub fn is_writable(&self) -> bool {
        !matches!(self.shape, FieldShape::Derived)
    }

    /// The value kind a write must carry, `None` for derived fields.
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self.shape {
            FieldShape::Measurement(kind) | FieldShape::Optional(kind) => Some(kind),
            FieldShape::PassFlag => Some(ValueKind::Bool),
            FieldShape::Derived => None,
        }
    }
}

/// The ordered field table of one section kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionSchema {
    pub kind: SectionKind,
    pub fields: &'static [FieldSpec],
}

impl SectionSchema {
    /// Look up a field by identifier.
    pub fn field(&self, id: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Required fields for a unit, in table order.
    pub fn required_fields(&self, inflatable: bool) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(move |f| f.is_required(inflatable))
    }
}

use ValueKind::{Bool, Date, Integer, Number, Text};

static GENERAL: SectionSchema = SectionSchema {
    kind: SectionKind::General,
    fields: &[
        FieldSpec::measurement("inspection_date", Date),
        FieldSpec::measurement("inspection_location", Text),
        FieldSpec::measurement("width", Number).inflatable(),
        FieldSpec::measurement("length", Number).inflatable(),
        FieldSpec::measurement("height", Number).inflatable(),
        FieldSpec::optional("inspector_signature", Text),
        FieldSpec::optional("signed_at", Text),
    ],
};

static USER_HEIGHT: SectionSchema = SectionSchema {
    kind: SectionKind::UserHeight,
    fields: &[
        FieldSpec::measurement("containing_wall_height", Number),
        FieldSpec::measurement("platform_height", Number),
        FieldSpec::measurement("tallest_user_height", Number),
        FieldSpec::measurement("play_area_length", Number),
        FieldSpec::measurement("play_area_width", Number),
        FieldSpec::measurement("negative_adjustment", Number),
        FieldSpec::measurement("users_at_1000mm", Integer),
        FieldSpec::measurement("users_at_1200mm", Integer),
        FieldSpec::measurement("users_at_1500mm", Integer),
        FieldSpec::measurement("users_at_1800mm", Integer),
    ],
};

static SLIDE: SectionSchema = SectionSchema {
    kind: SectionKind::Slide,
    fields: &[
        FieldSpec::measurement("slide_platform_height", Number),
        FieldSpec::measurement("slide_wall_height", Number),
        FieldSpec::measurement("slide_first_metre_height", Number),
        FieldSpec::measurement("slide_beyond_first_metre_height", Number),
        FieldSpec::measurement("slide_permanent_roof", Bool),
        FieldSpec::measurement("runout", Number),
        FieldSpec::pass_flag("clamber_netting_pass"),
        FieldSpec::pass_flag("runout_pass"),
        FieldSpec::pass_flag("slip_sheet_pass"),
    ],
};

static STRUCTURE: SectionSchema = SectionSchema {
    kind: SectionKind::Structure,
    fields: &[
        FieldSpec::measurement("stitch_length", Number),
        FieldSpec::measurement("unit_pressure", Number),
        FieldSpec::measurement("blower_tube_length", Number),
        FieldSpec::measurement("critical_fall_off_height", Number),
        FieldSpec::pass_flag("seam_integrity_pass"),
        FieldSpec::pass_flag("lock_stitching_pass"),
        FieldSpec::pass_flag("air_loss_pass"),
        FieldSpec::pass_flag("straight_walls_pass"),
        FieldSpec::pass_flag("sharp_edges_pass"),
        FieldSpec::pass_flag("unit_stable_pass"),
        FieldSpec::pass_flag("evacuation_time_pass"),
    ],
};

static ANCHORAGE: SectionSchema = SectionSchema {
    kind: SectionKind::Anchorage,
    fields: &[
        FieldSpec::measurement("num_low_anchors", Integer),
        FieldSpec::measurement("num_high_anchors", Integer),
        FieldSpec::derived("total_anchors"),
        FieldSpec::pass_flag("anchor_type_pass"),
        FieldSpec::pass_flag("pull_strength_pass"),
        FieldSpec::pass_flag("anchor_degree_pass"),
        FieldSpec::pass_flag("anchor_accessories_pass"),
    ],
};

static MATERIALS: SectionSchema = SectionSchema {
    kind: SectionKind::Materials,
    fields: &[
        FieldSpec::measurement("ropes", Number),
        FieldSpec::pass_flag("ropes_pass"),
        FieldSpec::pass_flag("retention_netting_pass"),
        FieldSpec::pass_flag("zips_pass"),
        FieldSpec::pass_flag("windows_pass"),
        FieldSpec::pass_flag("artwork_pass"),
        FieldSpec::pass_flag("thread_pass"),
        FieldSpec::pass_flag("fabric_strength_pass"),
        FieldSpec::pass_flag("fire_retardant_pass"),
    ],
};

static FAN: SectionSchema = SectionSchema {
    kind: SectionKind::Fan,
    fields: &[
        FieldSpec::measurement("blower_serial", Text),
        FieldSpec::measurement("fan_size_type", Text),
        FieldSpec::pass_flag("blower_flap_pass"),
        FieldSpec::pass_flag("blower_finger_pass"),
        FieldSpec::pass_flag("blower_visual_pass"),
        FieldSpec::pass_flag("pat_pass"),
    ],
};

static ENCLOSED: SectionSchema = SectionSchema {
    kind: SectionKind::Enclosed,
    fields: &[
        FieldSpec::measurement("exit_number", Integer),
        FieldSpec::pass_flag("exit_number_pass"),
        FieldSpec::pass_flag("exit_sign_always_visible_pass"),
    ],
};

static PAT: SectionSchema = SectionSchema {
    kind: SectionKind::Pat,
    fields: &[
        FieldSpec::measurement("equipment_class", Integer),
        FieldSpec::measurement("equipment_power", Number),
        FieldSpec::measurement("fuse_rating", Number),
        FieldSpec::measurement("rcd_trip_time", Number),
        FieldSpec::pass_flag("appliance_plug_check_pass"),
        FieldSpec::pass_flag("earth_pass"),
        FieldSpec::pass_flag("insulation_pass"),
        FieldSpec::pass_flag("leakage_pass"),
        FieldSpec::pass_flag("load_test_pass"),
    ],
};

static RESULTS: SectionSchema = SectionSchema {
    kind: SectionKind::Results,
    fields: &[
        FieldSpec::pass_flag("passed"),
        FieldSpec::optional("risk_assessment", Text),
    ],
};

/// The schema of `kind`. Exhaustive: a new section kind does not compile
/// until it has a table here.
pub fn schema_for(kind: SectionKind) -> &'static SectionSchema {
    match kind {
        SectionKind::General => &GENERAL,
        SectionKind::UserHeight => &USER_HEIGHT,
        SectionKind::Slide => &SLIDE,
        SectionKind::Structure => &STRUCTURE,
        SectionKind::Anchorage => &ANCHORAGE,
        SectionKind::Materials => &MATERIALS,
        SectionKind::Fan => &FAN,
        SectionKind::Enclosed => &ENCLOSED,
        SectionKind::Pat => &PAT,
        SectionKind::Results => &RESULTS,
    }
}
