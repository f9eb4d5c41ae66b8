//! Request-scoped orchestration: capability check, one snapshot fetch, one engine run.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::errors::AppError;

use super::engine::{recommend, recommend_for_ids, EngineInput, Recommendations};
use super::skill_set::resolve_names;
use super::source::{Role, SnapshotSource};

#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub recommendations: Recommendations,
    pub unresolved_skills: Vec<String>,
}

/// Recommendations for a stored student profile.
pub async fn recommend_for_student(
    source: &dyn SnapshotSource,
    user_id: i64,
    config: &EngineConfig,
) -> Result<Recommendations, AppError> {
    let caller = source
        .load_caller(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    caller.require_role(Role::Student)?;

    let possessed = source
        .load_student_skills(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student profile not found.".to_string()))?;

    let (opportunities, resources, catalog) = tokio::try_join!(
        source.load_open_opportunities(),
        source.load_learning_resources(),
        source.load_skill_catalog(),
    )?;

    if catalog.is_empty() {
        warn!("skill catalog is empty; every opportunity will score 0");
    }

    let result = recommend(
        &EngineInput {
            possessed: &possessed,
            opportunities: &opportunities,
            resources: &resources,
            catalog: &catalog,
        },
        config,
    );

    info!(
        user_id = caller.user_id,
        opportunities = result.recommended_opportunities.len(),
        learning_paths = result.recommended_learning_paths.len(),
        "student recommendations computed"
    );
    Ok(result)
}

/// What-if run for an ad-hoc list of skill names.
pub async fn preview_for_skill_names(
    source: &dyn SnapshotSource,
    skill_names: &[String],
    config: &EngineConfig,
) -> Result<PreviewResult, AppError> {
    if skill_names.iter().all(|name| name.trim().is_empty()) {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }

    let (opportunities, resources, catalog) = tokio::try_join!(
        source.load_open_opportunities(),
        source.load_learning_resources(),
        source.load_skill_catalog(),
    )?;

    let (possessed, unresolved_skills) = resolve_names(&catalog, skill_names);
    let recommendations = recommend_for_ids(
        &possessed,
        &EngineInput {
            possessed: &[],
            opportunities: &opportunities,
            resources: &resources,
            catalog: &catalog,
        },
        config,
    );

    info!(
        resolved = possessed.len(),
        unresolved = unresolved_skills.len(),
        opportunities = recommendations.recommended_opportunities.len(),
        "preview recommendations computed"
    );
    Ok(PreviewResult {
        recommendations,
        unresolved_skills,
    })
}
