//! xpkit - OSRS progress calculator service
//!
//! XP and level conversions, training-time projections, technique
//! calculators and hiscores lookups, served over a small JSON API.

pub mod calculators;
pub mod config;
pub mod hiscores;
pub mod server;
pub mod skills;
pub mod xp;

// Re-export commonly used types
pub use config::Config;
pub use skills::{SkillCatalog, SkillData};
pub use xp::{level_for_xp, xp_for_level, MAX_LEVEL};
