//! # Compliance Calculator
//!
//! Stateless formulas of primitive numeric inputs. Lengths are metres,
//! areas square metres, user heights millimetres. Anything that is a
//! threshold of the standard rather than arithmetic comes in through a
//! policy table (see [`crate::policy`]).

use serde::{Deserialize, Serialize};

use crate::policy::{AnchorPolicy, CapacityPolicy};

/// Slide runout as a fraction of the platform height.
pub const RUNOUT_RATIO: f64 = 0.5;

/// Minimum slide runout in metres, regardless of platform height.
pub const MIN_RUNOUT_M: f64 = 0.3;

// Absorbs representation error in area divisions such as 3.99 / 1.33.
const FLOOR_EPSILON: f64 = 1e-9;

/// Low plus high anchor points.
pub fn total_anchors(low_anchors: u32, high_anchors: u32) -> u32 {
    low_anchors.saturating_add(high_anchors)
}

/// Minimum anchor count for a footprint of `area_m2` under `policy`.
/// A non-positive or non-finite area needs none.
pub fn required_anchors(area_m2: f64, policy: &AnchorPolicy) -> u32 {
    if !area_m2.is_finite() || area_m2 <= 0.0 {
        return 0;
    }
    match policy {
        AnchorPolicy::WindLoad {
            area_coefficient,
            safety_factor,
            anchor_capacity_newtons,
        } => {
            let load = area_m2 * area_coefficient * safety_factor;
            (load / anchor_capacity_newtons).ceil() as u32
        }
        AnchorPolicy::Table { bands } => bands
            .iter()
            .find(|b| b.max_area_m2.map_or(true, |max| area_m2 <= max))
            .map_or(0, |b| b.anchors),
    }
}

pub fn meets_anchor_requirements(total_anchors: u32, required_anchors: u32) -> bool {
    total_anchors >= required_anchors
}

/// The containing wall must be at least as high as the platform.
pub fn required_wall_height(platform_height: f64) -> f64 {
    platform_height
}

pub fn meets_wall_height(containing_wall_height: f64, platform_height: f64) -> bool {
    containing_wall_height >= required_wall_height(platform_height)
}

/// Play area minus obstructions, never negative.
pub fn effective_play_area(
    play_area_length: f64,
    play_area_width: f64,
    negative_adjustment: f64,
) -> f64 {
    (play_area_length * play_area_width - negative_adjustment).max(0.0)
}

/// Users of the `height_mm` band the area accommodates. `None` when the
/// policy has no such band.
pub fn user_capacity_at_band(
    effective_play_area: f64,
    height_mm: u32,
    policy: &CapacityPolicy,
) -> Option<u32> {
    let per_user = policy.area_per_user(height_mm)?;
    if !effective_play_area.is_finite() || effective_play_area <= 0.0 {
        return Some(0);
    }
    Some((effective_play_area / per_user + FLOOR_EPSILON).floor() as u32)
}

/// Capacity of one height band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCapacity {
    pub height_mm: u32,
    pub users: u32,
}

/// Capacity for every band of `policy`. Bands taller than the tallest
/// permitted user (metres) get zero.
pub fn user_capacity(
    effective_play_area: f64,
    tallest_user_height: Option<f64>,
    policy: &CapacityPolicy,
) -> Vec<BandCapacity> {
    policy
        .bands
        .iter()
        .map(|band| {
            let permitted = tallest_user_height
                .map_or(true, |h| f64::from(band.height_mm) <= h * 1000.0 + FLOOR_EPSILON);
            let users = if permitted {
                user_capacity_at_band(effective_play_area, band.height_mm, policy).unwrap_or(0)
            } else {
                0
            };
            BandCapacity {
                height_mm: band.height_mm,
                users,
            }
        })
        .collect()
}

/// `max(0.5 × platform height, 0.3 m)`.
pub fn required_runout(slide_platform_height: f64) -> f64 {
    (slide_platform_height * RUNOUT_RATIO).max(MIN_RUNOUT_M)
}

pub fn meets_runout_requirements(runout: f64, slide_platform_height: f64) -> bool {
    runout >= required_runout(slide_platform_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AnchorBand;
    use proptest::prelude::*;

    #[test]
    fn total_anchors_adds() {
        assert_eq!(total_anchors(3, 2), 5);
        assert_eq!(total_anchors(4, 3), 7);
        assert_eq!(total_anchors(u32::MAX, 1), u32::MAX);
    }

    #[test]
    fn required_runout_applies_floor() {
        assert_eq!(required_runout(3.0), 1.5);
        assert_eq!(required_runout(0.4), 0.3);
        assert_eq!(required_runout(0.6), 0.3);
        assert!(meets_runout_requirements(1.5, 3.0));
        assert!(!meets_runout_requirements(1.49, 3.0));
    }

    #[test]
    fn wind_load_anchors() {
        let policy = AnchorPolicy::default();
        // 25 m² × 114 × 1.5 / 1600 = 2.67 → 3
        assert_eq!(required_anchors(25.0, &policy), 3);
        // 40 m² → 4.275 → 5
        assert_eq!(required_anchors(40.0, &policy), 5);
        assert_eq!(required_anchors(0.0, &policy), 0);
        assert_eq!(required_anchors(f64::NAN, &policy), 0);
    }

    #[test]
    fn table_anchors_pick_first_covering_band() {
        let policy = AnchorPolicy::Table {
            bands: vec![
                AnchorBand { max_area_m2: Some(20.0), anchors: 4 },
                AnchorBand { max_area_m2: Some(40.0), anchors: 6 },
                AnchorBand { max_area_m2: None, anchors: 8 },
            ],
        };
        assert_eq!(required_anchors(12.0, &policy), 4);
        assert_eq!(required_anchors(20.0, &policy), 4);
        assert_eq!(required_anchors(20.5, &policy), 6);
        assert_eq!(required_anchors(400.0, &policy), 8);
    }

    #[test]
    fn anchor_and_wall_comparisons_are_inclusive() {
        assert!(meets_anchor_requirements(6, 6));
        assert!(!meets_anchor_requirements(5, 6));
        assert_eq!(required_wall_height(1.2), 1.2);
        assert!(meets_wall_height(1.2, 1.2));
        assert!(!meets_wall_height(1.0, 1.2));
    }

    #[test]
    fn capacity_per_band() {
        let policy = CapacityPolicy::default();
        let area = effective_play_area(5.0, 4.0, 2.0);
        assert_eq!(area, 18.0);
        assert_eq!(user_capacity_at_band(area, 1000, &policy), Some(18));
        assert_eq!(user_capacity_at_band(area, 1200, &policy), Some(13));
        assert_eq!(user_capacity_at_band(area, 1500, &policy), Some(10));
        assert_eq!(user_capacity_at_band(area, 1800, &policy), Some(9));
        assert_eq!(user_capacity_at_band(area, 1100, &policy), None);
    }

    #[test]
    fn capacity_tolerates_representation_error() {
        let policy = CapacityPolicy::default();
        assert_eq!(user_capacity_at_band(1.33 * 3.0, 1200, &policy), Some(3));
    }

    #[test]
    fn negative_adjustment_cannot_go_below_zero() {
        assert_eq!(effective_play_area(2.0, 2.0, 10.0), 0.0);
        assert_eq!(
            user_capacity_at_band(0.0, 1000, &CapacityPolicy::default()),
            Some(0)
        );
    }

    #[test]
    fn bands_above_tallest_user_are_zero() {
        let caps = user_capacity(18.0, Some(1.5), &CapacityPolicy::default());
        let users: Vec<u32> = caps.iter().map(|c| c.users).collect();
        assert_eq!(users, vec![18, 13, 10, 0]);

        let unlimited = user_capacity(18.0, None, &CapacityPolicy::default());
        assert_eq!(unlimited.last().map(|c| c.users), Some(9));
    }

    proptest! {
        /// Runout never drops below the floor and grows with height.
        #[test]
        fn runout_is_floored_and_monotone(a in 0.0f64..20.0, b in 0.0f64..20.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(required_runout(lo) >= MIN_RUNOUT_M);
            prop_assert!(required_runout(lo) <= required_runout(hi));
        }

        /// More footprint never needs fewer anchors.
        #[test]
        fn anchors_monotone_in_area(a in 0.0f64..500.0, b in 0.0f64..500.0) {
            let policy = AnchorPolicy::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(required_anchors(lo, &policy) <= required_anchors(hi, &policy));
        }

        /// Taller bands never fit more users than shorter ones.
        #[test]
        fn capacity_decreases_with_height(area in 0.0f64..200.0) {
            let caps = user_capacity(area, None, &CapacityPolicy::default());
            prop_assert!(caps.windows(2).all(|w| w[0].users >= w[1].users));
        }
    }
}
