//! Growth-Zone Classifier: decides whether a below-threshold opportunity is a
//! closeable stretch worth surfacing, and owns the single admission gate.

use std::collections::{BTreeSet, HashSet};

use crate::config::EngineConfig;

use super::skill_set::{SkillCatalog, SkillId};

pub const DEFAULT_REASON: &str = "Based on your current skills.";

/// Answers "is there at least one learning resource for this skill?".
pub trait ResourceAvailability {
    fn has_resource_for(&self, skill: SkillId) -> bool;
}

impl ResourceAvailability for HashSet<SkillId> {
    fn has_resource_for(&self, skill: SkillId) -> bool {
        self.contains(&skill)
    }
}

impl ResourceAvailability for BTreeSet<SkillId> {
    fn has_resource_for(&self, skill: SkillId) -> bool {
        self.contains(&skill)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrowthZone {
    pub is_growth_zone: bool,
    /// First missing skill (ascending id) that has a learning resource.
    pub trigger_skill: Option<SkillId>,
}

impl GrowthZone {
    pub fn reason(&self, catalog: &SkillCatalog) -> String {
        match self.trigger_skill {
            Some(skill) if self.is_growth_zone => format!(
                "Recommended for growth in skills like '{}' which are crucial for this role.",
                catalog.display_name(skill)
            ),
            _ => DEFAULT_REASON.to_string(),
        }
    }
}

/// Growth zone iff `0 < |missing| <= max_missing`, `score >= min_score`, and
/// some missing skill has a resource. The resource scan stops at the first hit.
pub fn classify<A>(
    missing: &BTreeSet<SkillId>,
    score: f64,
    availability: &A,
    config: &EngineConfig,
) -> GrowthZone
where
    A: ResourceAvailability + ?Sized,
{
    if missing.is_empty()
        || missing.len() > config.growth_max_missing
        || score < config.growth_min_score
    {
        return GrowthZone::default();
    }

    match missing
        .iter()
        .copied()
        .find(|skill| availability.has_resource_for(*skill))
    {
        Some(skill) => GrowthZone {
            is_growth_zone: true,
            trigger_skill: Some(skill),
        },
        None => GrowthZone::default(),
    }
}

/// An opportunity is recommended iff it is a clear match or a growth-zone stretch.
pub fn admits(score: f64, growth: &GrowthZone, config: &EngineConfig) -> bool {
    score >= config.clear_match_threshold || growth.is_growth_zone
}
