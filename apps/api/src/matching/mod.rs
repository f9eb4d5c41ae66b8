// Skill-gap matching & growth recommendation engine.
// Pipeline: resolve skill sets → score → classify growth zone → rank →
// derive learning paths.
// The engine is pure; all storage access goes through `source::SnapshotSource`.

pub mod engine;
pub mod growth_zone;
pub mod handlers;
pub mod learning_path;
pub mod ranker;
pub mod scorer;
pub mod service;
pub mod skill_set;
pub mod source;

#[cfg(test)]
pub mod test_support;
