//! Village map unlock rules
//!
//! Each map location has one requirement. New locations are added as one more
//! entry in [`UNLOCK_RULES`].

use std::collections::BTreeSet;

use crate::domain::{FeatureId, Role};

/// Stars needed before the playground opens
pub const PLAYGROUND_STARS: u32 = 5;

/// What a viewer must have for a location to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    Stars(u32),
    Role(Role),
}

impl Requirement {
    pub fn is_met(&self, total_stars: u32, role: Role) -> bool {
        match *self {
            Self::Always => true,
            Self::Stars(threshold) => total_stars >= threshold,
            Self::Role(required) => role == required,
        }
    }
}

/// Unlock table, in map order
pub static UNLOCK_RULES: &[(FeatureId, Requirement)] = &[
    (FeatureId::School, Requirement::Always),
    (FeatureId::Library, Requirement::Always),
    (FeatureId::Playground, Requirement::Stars(PLAYGROUND_STARS)),
    (FeatureId::TeachersRoom, Requirement::Role(Role::Teacher)),
];

pub fn requirement(feature: FeatureId) -> Requirement {
    UNLOCK_RULES
        .iter()
        .find(|(id, _)| *id == feature)
        .map(|(_, req)| *req)
        .unwrap_or(Requirement::Always)
}

/// Locations open to a viewer with `total_stars` and `role`
pub fn unlocked(total_stars: u32, role: Role) -> BTreeSet<FeatureId> {
    UNLOCK_RULES
        .iter()
        .filter(|(_, req)| req.is_met(total_stars, role))
        .map(|(id, _)| *id)
        .collect()
}

/// Locations still closed to the viewer
pub fn locked(total_stars: u32, role: Role) -> BTreeSet<FeatureId> {
    UNLOCK_RULES
        .iter()
        .filter(|(_, req)| !req.is_met(total_stars, role))
        .map(|(id, _)| *id)
        .collect()
}

/// Stars still missing for a star-gated location
///
/// `None` when the location is not gated by stars. `Some(0)` once reached.
pub fn stars_needed(feature: FeatureId, total_stars: u32) -> Option<u32> {
    match requirement(feature) {
        Requirement::Stars(threshold) => Some(threshold.saturating_sub(total_stars)),
        _ => None,
    }
}
