//! Recommendation Assembler: runs the full pipeline over one request snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;

use super::learning_path::{
    recommend_learning_paths, LearningResourceSnapshot, RecommendedLearningPath, ResourceIndex,
};
use super::ranker::{rank_opportunities, OpportunitySnapshot, ScoredOpportunity};
use super::skill_set::{resolve_possessed, PossessedSkill, SkillCatalog, SkillId};

/// Everything the engine needs, fetched once per request by the caller.
#[derive(Debug, Clone, Copy)]
pub struct EngineInput<'a> {
    pub possessed: &'a [PossessedSkill],
    pub opportunities: &'a [OpportunitySnapshot],
    pub resources: &'a [LearningResourceSnapshot],
    pub catalog: &'a SkillCatalog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub recommended_opportunities: Vec<ScoredOpportunity>,
    pub recommended_learning_paths: Vec<RecommendedLearningPath>,
}

/// Produces both ranked lists. Pure: no I/O and no state kept between calls.
pub fn recommend(input: &EngineInput<'_>, config: &EngineConfig) -> Recommendations {
    let possessed = resolve_possessed(input.catalog, input.possessed);
    recommend_for_ids(&possessed, input, config)
}

/// Same as [`recommend`] for a candidate already resolved to skill ids.
pub fn recommend_for_ids(
    possessed: &BTreeSet<SkillId>,
    input: &EngineInput<'_>,
    config: &EngineConfig,
) -> Recommendations {
    let index = ResourceIndex::build(input.catalog, input.resources);

    let recommended_opportunities = rank_opportunities(
        possessed,
        input.opportunities,
        &index,
        input.catalog,
        config,
    );
    let recommended_learning_paths = recommend_learning_paths(
        possessed,
        &recommended_opportunities,
        input.resources,
        input.catalog,
        config,
    );

    debug!(
        possessed = possessed.len(),
        catalog = input.catalog.len(),
        evaluated = input.opportunities.len(),
        recommended = recommended_opportunities.len(),
        learning_paths = recommended_learning_paths.len(),
        "recommendations assembled"
    );

    Recommendations {
        recommended_opportunities,
        recommended_learning_paths,
    }
}
