//! Skill Set Resolver: turns raw skill-association records into comparable id sets.
//!
//! Every set produced here is a `BTreeSet`, so anything downstream that walks a
//! skill set (growth-zone rationale, missing-skill lists, learning-path targets)
//! sees skills in ascending id order.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(
    /// Opaque skill identifier.
    SkillId
);
id_newtype!(OpportunityId);
id_newtype!(ResourceId);

// ────────────────────────────────────────────────────────────────────────────
// Skill catalog
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: Option<String>,
    /// Unvalidated hierarchy reference. Never traversed during matching.
    pub parent_skill_id: Option<SkillId>,
}

/// Read-only lookup of every known skill, injected per request.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    by_id: HashMap<SkillId, Skill>,
    by_name: HashMap<String, SkillId>,
}

impl SkillCatalog {
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        let mut catalog = Self::default();
        for skill in skills {
            catalog.by_name.insert(normalize_name(&skill.name), skill.id);
            catalog.by_id.insert(skill.id, skill);
        }
        catalog
    }

    pub fn get(&self, id: SkillId) -> Option<&Skill> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: SkillId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Skill> {
        self.by_name
            .get(&normalize_name(name))
            .and_then(|id| self.by_id.get(id))
    }

    /// Display name for rationale text; falls back to the raw id.
    pub fn display_name(&self, id: SkillId) -> String {
        self.get(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("skill #{id}"))
    }

    /// Materializes skill objects for a set of ids, dropping unknown ones.
    pub fn skills_for(&self, ids: &BTreeSet<SkillId>) -> Vec<Skill> {
        ids.iter().filter_map(|id| self.get(*id).cloned()).collect()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Association records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    /// Lenient parse; unknown labels are treated as unannotated.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

/// Candidate ↔ skill association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessedSkill {
    pub skill_id: Option<SkillId>,
    #[serde(default)]
    pub proficiency: Option<Proficiency>,
    /// Provenance, e.g. `resume_upload` or `project_id_123`.
    #[serde(default)]
    pub inferred_from: Option<String>,
}

/// Opportunity ↔ skill association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub skill_id: Option<SkillId>,
    /// Read but not weighted: every required skill counts equally in the score.
    #[serde(default = "default_mandatory")]
    pub is_mandatory: bool,
}

fn default_mandatory() -> bool {
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Resolution
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the ids that are present and known to the catalog. Null or dangling
/// references are dropped silently; zero records resolve to an empty set.
pub fn resolve_ids<I>(catalog: &SkillCatalog, ids: I) -> BTreeSet<SkillId>
where
    I: IntoIterator<Item = Option<SkillId>>,
{
    ids.into_iter()
        .flatten()
        .filter(|id| catalog.contains(*id))
        .collect()
}

pub fn resolve_possessed(catalog: &SkillCatalog, records: &[PossessedSkill]) -> BTreeSet<SkillId> {
    resolve_ids(catalog, records.iter().map(|r| r.skill_id))
}

pub fn resolve_required(catalog: &SkillCatalog, records: &[RequiredSkill]) -> BTreeSet<SkillId> {
    resolve_ids(catalog, records.iter().map(|r| r.skill_id))
}

pub fn resolve_associated(catalog: &SkillCatalog, skill_ids: &[SkillId]) -> BTreeSet<SkillId> {
    resolve_ids(catalog, skill_ids.iter().copied().map(Some))
}

/// Resolves display names through the catalog. Returns the resolved ids and
/// the names that matched nothing, in input order.
pub fn resolve_names<S: AsRef<str>>(
    catalog: &SkillCatalog,
    names: &[S],
) -> (BTreeSet<SkillId>, Vec<String>) {
    let mut resolved = BTreeSet::new();
    let mut unresolved = Vec::new();
    for name in names {
        match catalog.find_by_name(name.as_ref()) {
            Some(skill) => {
                resolved.insert(skill.id);
            }
            None => unresolved.push(name.as_ref().to_string()),
        }
    }
    (resolved, unresolved)
}
