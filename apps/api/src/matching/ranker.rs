//! Opportunity Ranker: scores, classifies and filters every open opportunity.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;

use super::growth_zone::{admits, classify, ResourceAvailability};
use super::scorer::score_match;
use super::skill_set::{
    resolve_required, OpportunityId, RequiredSkill, Skill, SkillCatalog, SkillId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    Open,
    Closed,
    Archived,
}

impl OpportunityStatus {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Read-only view of one opportunity and its skill requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunitySnapshot {
    pub id: OpportunityId,
    pub title: String,
    /// internship | research | training
    pub kind: String,
    pub status: OpportunityStatus,
    pub application_deadline: Option<DateTime<Utc>>,
    pub required_skills: Vec<RequiredSkill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOpportunity {
    pub opportunity_id: OpportunityId,
    pub title: String,
    pub kind: String,
    pub application_deadline: Option<DateTime<Utc>>,
    pub match_score: f64,
    /// Ascending by skill id.
    pub missing_skills: Vec<Skill>,
    pub is_growth_zone: bool,
    pub reason: String,
}

impl ScoredOpportunity {
    pub fn missing_skill_ids(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.missing_skills.iter().map(|s| s.id)
    }
}

/// Ranks open opportunities for one candidate.
///
/// Only opportunities passing the admission gate are kept. Output is ordered by
/// score descending; ties keep evaluation order. No cap is applied here.
pub fn rank_opportunities<A>(
    possessed: &BTreeSet<SkillId>,
    opportunities: &[OpportunitySnapshot],
    availability: &A,
    catalog: &SkillCatalog,
    config: &EngineConfig,
) -> Vec<ScoredOpportunity>
where
    A: ResourceAvailability + ?Sized,
{
    let mut ranked: Vec<ScoredOpportunity> = opportunities
        .iter()
        .filter(|opp| opp.status == OpportunityStatus::Open)
        .filter_map(|opp| {
            let required = resolve_required(catalog, &opp.required_skills);
            let outcome = score_match(possessed, &required);
            let growth = classify(&outcome.missing, outcome.score, availability, config);

            if !admits(outcome.score, &growth, config) {
                debug!(
                    opportunity_id = %opp.id,
                    score = outcome.score,
                    held = outcome.possessed.len(),
                    missing = outcome.missing.len(),
                    "opportunity below admission gate"
                );
                return None;
            }

            Some(ScoredOpportunity {
                opportunity_id: opp.id,
                title: opp.title.clone(),
                kind: opp.kind.clone(),
                application_deadline: opp.application_deadline,
                match_score: outcome.score,
                missing_skills: catalog.skills_for(&outcome.missing),
                is_growth_zone: growth.is_growth_zone,
                reason: growth.reason(catalog),
            })
        })
        .collect();

    // Vec::sort_by is stable, so equal scores keep evaluation order.
    ranked.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}
