//! Skill data and training projections

pub mod catalog;
pub mod projection;
pub mod types;

pub use catalog::{default_skills, CatalogError, SkillCatalog};
pub use projection::{format_hours, recompute, MethodProjection, ProjectionError};
pub use types::{AlternativeXp, SkillData, TrainingMethod};
