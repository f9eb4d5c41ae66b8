//! In-memory `SnapshotSource` and a small shared fixture for service and router tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::AppError;

use super::learning_path::LearningResourceSnapshot;
use super::ranker::{OpportunitySnapshot, OpportunityStatus};
use super::skill_set::tests::{possessed_skill, required_skill};
use super::skill_set::{
    OpportunityId, PossessedSkill, Proficiency, ResourceId, Skill, SkillCatalog, SkillId,
};
use super::source::{Caller, Role, SnapshotSource};

pub const STUDENT_ID: i64 = 1;
pub const FACULTY_ID: i64 = 2;
pub const NO_PROFILE_ID: i64 = 3;

#[derive(Default)]
pub struct InMemorySnapshotSource {
    pub callers: HashMap<i64, Caller>,
    pub students: HashMap<i64, Vec<PossessedSkill>>,
    pub opportunities: Vec<OpportunitySnapshot>,
    pub resources: Vec<LearningResourceSnapshot>,
    pub skills: Vec<Skill>,
}

#[async_trait]
impl SnapshotSource for InMemorySnapshotSource {
    async fn load_caller(&self, user_id: i64) -> Result<Option<Caller>, AppError> {
        Ok(self.callers.get(&user_id).cloned())
    }

    async fn load_student_skills(
        &self,
        user_id: i64,
    ) -> Result<Option<Vec<PossessedSkill>>, AppError> {
        Ok(self.students.get(&user_id).cloned())
    }

    async fn load_open_opportunities(&self) -> Result<Vec<OpportunitySnapshot>, AppError> {
        Ok(self
            .opportunities
            .iter()
            .filter(|o| o.status == OpportunityStatus::Open)
            .cloned()
            .collect())
    }

    async fn load_learning_resources(&self) -> Result<Vec<LearningResourceSnapshot>, AppError> {
        Ok(self.resources.clone())
    }

    async fn load_skill_catalog(&self) -> Result<SkillCatalog, AppError> {
        Ok(SkillCatalog::from_skills(self.skills.iter().cloned()))
    }
}

fn skill(id: i64, name: &str, category: &str) -> Skill {
    Skill {
        id: SkillId(id),
        name: name.to_string(),
        category: Some(category.to_string()),
        parent_skill_id: None,
    }
}

fn opportunity(
    id: i64,
    title: &str,
    status: OpportunityStatus,
    required: &[i64],
) -> OpportunitySnapshot {
    OpportunitySnapshot {
        id: OpportunityId(id),
        title: title.to_string(),
        kind: "internship".to_string(),
        status,
        application_deadline: None,
        required_skills: required
            .iter()
            .copied()
            .map(required_skill)
            .collect(),
    }
}

fn resource(id: i64, title: &str, skills: &[i64]) -> LearningResourceSnapshot {
    LearningResourceSnapshot {
        id: ResourceId(id),
        title: title.to_string(),
        url: format!("https://learn.example.com/{id}"),
        kind: Some("course".to_string()),
        difficulty: Some("beginner".to_string()),
        estimated_minutes: Some(60),
        associated_skills: skills.iter().copied().map(SkillId).collect(),
    }
}

/// Skills: 1 SQL, 2 Python, 3 React, 4 Docker, 5 Rust.
/// The student holds SQL and React.
pub fn fixture_source() -> InMemorySnapshotSource {
    let callers = HashMap::from([
        (
            STUDENT_ID,
            Caller {
                user_id: STUDENT_ID,
                roles: vec![Role::Student],
            },
        ),
        (
            FACULTY_ID,
            Caller {
                user_id: FACULTY_ID,
                roles: vec![Role::Faculty],
            },
        ),
        (
            NO_PROFILE_ID,
            Caller {
                user_id: NO_PROFILE_ID,
                roles: vec![Role::Student],
            },
        ),
    ]);

    let students = HashMap::from([(
        STUDENT_ID,
        vec![
            PossessedSkill {
                skill_id: Some(SkillId(1)),
                proficiency: Some(Proficiency::Advanced),
                inferred_from: Some("resume_upload".to_string()),
            },
            possessed_skill(3),
        ],
    )]);

    InMemorySnapshotSource {
        callers,
        students,
        opportunities: vec![
            opportunity(1, "Full-stack intern", OpportunityStatus::Open, &[1, 2, 3]),
            opportunity(2, "Database assistant", OpportunityStatus::Open, &[1]),
            opportunity(3, "Systems research", OpportunityStatus::Open, &[2, 4, 5]),
            opportunity(4, "Closed posting", OpportunityStatus::Closed, &[1]),
        ],
        resources: vec![
            resource(100, "Python for data work", &[2]),
            resource(101, "Containers 101", &[4]),
            resource(102, "React fundamentals", &[3]),
        ],
        skills: vec![
            skill(1, "SQL", "Database"),
            skill(2, "Python", "Programming"),
            skill(3, "React", "Frontend"),
            skill(4, "Docker", "DevOps"),
            skill(5, "Rust", "Programming"),
        ],
    }
}
