//! Match Scorer: possession ratio between a candidate's skills and an
//! opportunity's required skills.

use std::collections::BTreeSet;

use super::skill_set::SkillId;

/// Result of comparing one possessed set against one required set.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// 0 to 100, rounded to two decimals.
    pub score: f64,
    /// possessed ∩ required
    pub possessed: BTreeSet<SkillId>,
    /// required ∖ possessed
    pub missing: BTreeSet<SkillId>,
}

/// Scores `possessed` against `required` and splits the requirement set into
/// held and missing skills.
pub fn score_match(possessed: &BTreeSet<SkillId>, required: &BTreeSet<SkillId>) -> MatchOutcome {
    MatchOutcome {
        score: score(possessed, required),
        possessed: possessed.intersection(required).copied().collect(),
        missing: required.difference(possessed).copied().collect(),
    }
}

/// `100 * |possessed ∩ required| / |required|`, rounded to two decimals.
/// An empty `required` set scores 0.
pub fn score(possessed: &BTreeSet<SkillId>, required: &BTreeSet<SkillId>) -> f64 {
    if required.is_empty() {
        return 0.0;
    }
    let held = possessed.intersection(required).count();
    round_to_cents((100.0 * held as f64 / required.len() as f64).clamp(0.0, 100.0))
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
