//! Snapshot Source: the read-only boundary between the engine and the data store.
//!
//! The engine never queries storage itself. A handler fetches one snapshot per
//! request through `SnapshotSource` and hands it to the synchronous engine.
//!
//! `AppState` holds an `Arc<dyn SnapshotSource>`; `PgSnapshotSource` is the
//! production backend.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::warn;

use crate::errors::AppError;
use crate::models::learning_resource::{LearningResourceRow, ResourceSkillRow};
use crate::models::opportunity::{OpportunityRow, RequiredSkillRow};
use crate::models::skill::{SkillRow, StudentSkillRow};
use crate::models::user::UserRoleRow;

use super::learning_path::LearningResourceSnapshot;
use super::ranker::{OpportunitySnapshot, OpportunityStatus};
use super::skill_set::{
    OpportunityId, PossessedSkill, RequiredSkill, ResourceId, Skill, SkillCatalog, SkillId,
};

// ────────────────────────────────────────────────────────────────────────────
// Caller capabilities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
    IndustryPartner,
    Admin,
}

impl Role {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "faculty" => Some(Self::Faculty),
            "industry_partner" => Some(Self::IndustryPartner),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::IndustryPartner => "industry partner",
            Self::Admin => "admin",
        }
    }
}

/// The user a request is made on behalf of, with the roles they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub roles: Vec<Role>,
}

impl Caller {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("User is not a {}.", role.label())))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// `None` when the user does not exist.
    async fn load_caller(&self, user_id: i64) -> Result<Option<Caller>, AppError>;

    /// `None` when the user has no student profile.
    async fn load_student_skills(&self, user_id: i64)
        -> Result<Option<Vec<PossessedSkill>>, AppError>;

    async fn load_open_opportunities(&self) -> Result<Vec<OpportunitySnapshot>, AppError>;

    async fn load_learning_resources(&self) -> Result<Vec<LearningResourceSnapshot>, AppError>;

    async fn load_skill_catalog(&self) -> Result<SkillCatalog, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PgSnapshotSource
// ────────────────────────────────────────────────────────────────────────────

pub struct PgSnapshotSource {
    pool: PgPool,
}

impl PgSnapshotSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotSource for PgSnapshotSource {
    async fn load_caller(&self, user_id: i64) -> Result<Option<Caller>, AppError> {
        let rows: Vec<UserRoleRow> = sqlx::query_as(
            r#"
            SELECT r.name AS role_name
            FROM users u
            LEFT JOIN user_roles ur ON ur.user_id = u.id
            LEFT JOIN roles r ON r.id = ur.role_id
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(caller_from_rows(user_id, rows))
    }

    async fn load_student_skills(
        &self,
        user_id: i64,
    ) -> Result<Option<Vec<PossessedSkill>>, AppError> {
        let profile_id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM student_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(profile_id) = profile_id else {
            return Ok(None);
        };

        let rows: Vec<StudentSkillRow> = sqlx::query_as(
            r#"
            SELECT s.id AS skill_id, ss.proficiency_level, ss.inferred_from
            FROM student_skills ss
            LEFT JOIN skills s ON s.id = ss.skill_id
            WHERE ss.student_profile_id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(rows.into_iter().map(PossessedSkill::from).collect()))
    }

    async fn load_open_opportunities(&self) -> Result<Vec<OpportunitySnapshot>, AppError> {
        let opportunities: Vec<OpportunityRow> = sqlx::query_as(
            r#"
            SELECT id, title, type AS kind, status, application_deadline
            FROM opportunities
            WHERE status = 'open'
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let requirements: Vec<RequiredSkillRow> = sqlx::query_as(
            r#"
            SELECT ors.opportunity_id, s.id AS skill_id, ors.is_mandatory
            FROM opportunity_required_skills ors
            JOIN opportunities o ON o.id = ors.opportunity_id
            LEFT JOIN skills s ON s.id = ors.skill_id
            WHERE o.status = 'open'
            ORDER BY ors.opportunity_id, ors.skill_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble_opportunities(opportunities, requirements))
    }

    async fn load_learning_resources(&self) -> Result<Vec<LearningResourceSnapshot>, AppError> {
        let resources: Vec<LearningResourceRow> = sqlx::query_as(
            r#"
            SELECT id, title, url, type AS kind, difficulty_level, estimated_time_to_complete_min
            FROM learning_resources
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let associations: Vec<ResourceSkillRow> = sqlx::query_as(
            r#"
            SELECT ras.resource_id, s.id AS skill_id
            FROM resource_associated_skills ras
            LEFT JOIN skills s ON s.id = ras.skill_id
            ORDER BY ras.resource_id, ras.skill_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble_resources(resources, associations))
    }

    async fn load_skill_catalog(&self) -> Result<SkillCatalog, AppError> {
        let rows: Vec<SkillRow> =
            sqlx::query_as("SELECT id, name, category, parent_skill_id FROM skills ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(SkillCatalog::from_skills(rows.into_iter().map(Skill::from)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row assembly
// ────────────────────────────────────────────────────────────────────────────

fn caller_from_rows(user_id: i64, rows: Vec<UserRoleRow>) -> Option<Caller> {
    if rows.is_empty() {
        return None;
    }
    let roles = rows
        .iter()
        .filter_map(|row| row.role_name.as_deref())
        .filter_map(Role::parse)
        .collect();
    Some(Caller { user_id, roles })
}

fn assemble_opportunities(
    rows: Vec<OpportunityRow>,
    requirements: Vec<RequiredSkillRow>,
) -> Vec<OpportunitySnapshot> {
    let mut by_opportunity: HashMap<OpportunityId, Vec<RequiredSkill>> = HashMap::new();
    for req in requirements {
        by_opportunity
            .entry(req.opportunity_id)
            .or_default()
            .push(RequiredSkill {
                skill_id: req.skill_id,
                is_mandatory: req.is_mandatory.unwrap_or(true),
            });
    }

    rows.into_iter()
        .filter_map(|row| {
            let Some(status) = OpportunityStatus::parse(&row.status) else {
                warn!(
                    opportunity_id = %row.id,
                    status = %row.status,
                    "skipping opportunity with unknown status"
                );
                return None;
            };
            Some(OpportunitySnapshot {
                required_skills: by_opportunity.remove(&row.id).unwrap_or_default(),
                id: row.id,
                title: row.title,
                kind: row.kind,
                status,
                application_deadline: row.application_deadline,
            })
        })
        .collect()
}

fn assemble_resources(
    rows: Vec<LearningResourceRow>,
    associations: Vec<ResourceSkillRow>,
) -> Vec<LearningResourceSnapshot> {
    let mut by_resource: HashMap<ResourceId, Vec<SkillId>> = HashMap::new();
    for assoc in associations {
        // Dangling skill references cannot contribute to matching.
        if let Some(skill_id) = assoc.skill_id {
            by_resource.entry(assoc.resource_id).or_default().push(skill_id);
        }
    }

    rows.into_iter()
        .map(|row| LearningResourceSnapshot {
            associated_skills: by_resource.remove(&row.id).unwrap_or_default(),
            id: row.id,
            title: row.title,
            url: row.url,
            kind: row.kind,
            difficulty: row.difficulty_level,
            estimated_minutes: row.estimated_time_to_complete_min,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_row(name: Option<&str>) -> UserRoleRow {
        UserRoleRow {
            role_name: name.map(String::from),
        }
    }

    #[test]
    fn test_unknown_user_has_no_caller() {
        assert!(caller_from_rows(7, vec![]).is_none());
    }

    #[test]
    fn test_user_without_roles_is_still_a_caller() {
        let caller = caller_from_rows(7, vec![role_row(None)]).unwrap();
        assert!(caller.roles.is_empty());
        assert!(caller.require_role(Role::Student).is_err());
    }

    #[test]
    fn test_roles_are_parsed_and_unknown_ignored() {
        let caller =
            caller_from_rows(7, vec![role_row(Some("student")), role_row(Some("mentor"))]).unwrap();
        assert_eq!(caller.roles, vec![Role::Student]);
        assert!(caller.require_role(Role::Student).is_ok());
    }

    #[test]
    fn test_forbidden_message_names_role() {
        let caller = Caller {
            user_id: 1,
            roles: vec![Role::Faculty],
        };
        match caller.require_role(Role::Student) {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "User is not a student."),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn test_opportunities_are_grouped_with_requirements() {
        let rows = vec![
            OpportunityRow {
                id: OpportunityId(1),
                title: "Data intern".to_string(),
                kind: "internship".to_string(),
                status: "open".to_string(),
                application_deadline: None,
            },
            OpportunityRow {
                id: OpportunityId(2),
                title: "Legacy".to_string(),
                kind: "research".to_string(),
                status: "pending".to_string(),
                application_deadline: None,
            },
            OpportunityRow {
                id: OpportunityId(3),
                title: "No skills".to_string(),
                kind: "training".to_string(),
                status: "open".to_string(),
                application_deadline: None,
            },
        ];
        let requirements = vec![
            RequiredSkillRow {
                opportunity_id: OpportunityId(1),
                skill_id: Some(SkillId(10)),
                is_mandatory: Some(false),
            },
            RequiredSkillRow {
                opportunity_id: OpportunityId(1),
                skill_id: None,
                is_mandatory: None,
            },
        ];

        let snapshots = assemble_opportunities(rows, requirements);
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].required_skills.len(), 2);
        assert!(!snapshots[0].required_skills[0].is_mandatory);
        assert!(snapshots[0].required_skills[1].is_mandatory);
        assert!(snapshots[1].required_skills.is_empty());
    }

    #[test]
    fn test_resources_drop_dangling_skills() {
        let rows = vec![LearningResourceRow {
            id: ResourceId(5),
            title: "Intro to Python".to_string(),
            url: "https://learn.example.com/python".to_string(),
            kind: Some("course".to_string()),
            difficulty_level: Some("beginner".to_string()),
            estimated_time_to_complete_min: Some(120),
        }];
        let associations = vec![
            ResourceSkillRow {
                resource_id: ResourceId(5),
                skill_id: Some(SkillId(2)),
            },
            ResourceSkillRow {
                resource_id: ResourceId(5),
                skill_id: None,
            },
        ];

        let snapshots = assemble_resources(rows, associations);
        assert_eq!(snapshots[0].associated_skills, vec![SkillId(2)]);
        assert_eq!(snapshots[0].estimated_minutes, Some(120));
    }
}
