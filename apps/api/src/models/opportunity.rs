use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::matching::skill_set::{OpportunityId, SkillId};

#[derive(Debug, Clone, FromRow)]
pub struct OpportunityRow {
    pub id: OpportunityId,
    pub title: String,
    pub kind: String,
    pub status: String,
    pub application_deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RequiredSkillRow {
    pub opportunity_id: OpportunityId,
    pub skill_id: Option<SkillId>,
    pub is_mandatory: Option<bool>,
}
