use sqlx::FromRow;

use crate::matching::skill_set::{ResourceId, SkillId};

#[derive(Debug, Clone, FromRow)]
pub struct LearningResourceRow {
    pub id: ResourceId,
    pub title: String,
    pub url: String,
    pub kind: Option<String>,
    pub difficulty_level: Option<String>,
    pub estimated_time_to_complete_min: Option<i32>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ResourceSkillRow {
    pub resource_id: ResourceId,
    pub skill_id: Option<SkillId>,
}
