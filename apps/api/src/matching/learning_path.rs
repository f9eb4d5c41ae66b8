//! Learning Path Recommender: maps the skill gaps of the top-ranked
//! opportunities onto learning resources.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

use super::growth_zone::ResourceAvailability;
use super::ranker::ScoredOpportunity;
use super::skill_set::{resolve_associated, ResourceId, Skill, SkillCatalog, SkillId};

/// Read-only view of one learning resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResourceSnapshot {
    pub id: ResourceId,
    pub title: String,
    pub url: String,
    /// course | webinar | article | tutorial | book
    pub kind: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_minutes: Option<i32>,
    pub associated_skills: Vec<SkillId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedLearningPath {
    pub resource_id: ResourceId,
    pub title: String,
    pub url: String,
    pub kind: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_minutes: Option<i32>,
    pub target_skill: Skill,
    pub reason: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Resource index
// ────────────────────────────────────────────────────────────────────────────

/// Number of learning resources associated with each known skill.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    counts: HashMap<SkillId, usize>,
}

impl ResourceIndex {
    pub fn build(catalog: &SkillCatalog, resources: &[LearningResourceSnapshot]) -> Self {
        let mut counts = HashMap::new();
        for resource in resources {
            for skill in resolve_associated(catalog, &resource.associated_skills) {
                *counts.entry(skill).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn resource_count(&self, skill: SkillId) -> usize {
        self.counts.get(&skill).copied().unwrap_or(0)
    }
}

impl ResourceAvailability for ResourceIndex {
    fn has_resource_for(&self, skill: SkillId) -> bool {
        self.resource_count(skill) > 0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendation
// ────────────────────────────────────────────────────────────────────────────

/// Union of the missing skills of the first `top_n` ranked opportunities.
pub fn target_skills(ranked: &[ScoredOpportunity], top_n: usize) -> BTreeSet<SkillId> {
    ranked
        .iter()
        .take(top_n)
        .flat_map(|opp| opp.missing_skill_ids())
        .collect()
}

/// Emits one path per (resource, target skill) pairing the candidate still
/// needs. Pairs are unique; a repeated pair overwrites the earlier entry in place.
pub fn recommend_learning_paths(
    possessed: &BTreeSet<SkillId>,
    ranked: &[ScoredOpportunity],
    resources: &[LearningResourceSnapshot],
    catalog: &SkillCatalog,
    config: &EngineConfig,
) -> Vec<RecommendedLearningPath> {
    let targets = target_skills(ranked, config.learning_path_top_n);
    if targets.is_empty() {
        return Vec::new();
    }

    let mut paths: Vec<RecommendedLearningPath> = Vec::new();
    let mut seen: HashMap<(ResourceId, SkillId), usize> = HashMap::new();

    for resource in resources {
        let helps_with = resolve_associated(catalog, &resource.associated_skills);
        for skill_id in helps_with.intersection(&targets) {
            if possessed.contains(skill_id) {
                continue;
            }
            let Some(skill) = catalog.get(*skill_id) else {
                continue;
            };

            let path = RecommendedLearningPath {
                resource_id: resource.id,
                title: resource.title.clone(),
                url: resource.url.clone(),
                kind: resource.kind.clone(),
                difficulty: resource.difficulty.clone(),
                estimated_minutes: resource.estimated_minutes,
                target_skill: skill.clone(),
                reason: format!(
                    "This mission helps you acquire '{}', which is vital for opportunities you might be interested in.",
                    skill.name
                ),
            };

            match seen.get(&(resource.id, *skill_id)) {
                Some(&slot) => paths[slot] = path,
                None => {
                    seen.insert((resource.id, *skill_id), paths.len());
                    paths.push(path);
                }
            }
        }
    }

    paths
}
