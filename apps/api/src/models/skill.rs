use sqlx::FromRow;

use crate::matching::skill_set::{PossessedSkill, Proficiency, Skill, SkillId};

#[derive(Debug, Clone, FromRow)]
pub struct SkillRow {
    pub id: SkillId,
    pub name: String,
    pub category: Option<String>,
    pub parent_skill_id: Option<SkillId>,
}

impl From<SkillRow> for Skill {
    fn from(row: SkillRow) -> Self {
        Skill {
            id: row.id,
            name: row.name,
            category: row.category,
            parent_skill_id: row.parent_skill_id,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct StudentSkillRow {
    /// NULL when the referenced skill no longer exists.
    pub skill_id: Option<SkillId>,
    pub proficiency_level: Option<String>,
    pub inferred_from: Option<String>,
}

impl From<StudentSkillRow> for PossessedSkill {
    fn from(row: StudentSkillRow) -> Self {
        PossessedSkill {
            skill_id: row.skill_id,
            proficiency: row.proficiency_level.as_deref().and_then(Proficiency::parse),
            inferred_from: row.inferred_from,
        }
    }
}
