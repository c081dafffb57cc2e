//! Skill reference data
//!
//! Training methods and per-skill metadata. These records are immutable
//! reference data: loaded once per request from the catalog, never mutated.
//! Field names follow the wire schema the site's frontend already speaks.

use serde::{Deserialize, Serialize};

/// XP a method grants in a skill other than the one being trained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeXp {
    #[serde(rename = "type")]
    pub kind: String,
    pub rate: f64,
}

/// A named way of training a skill.
///
/// Only `id`, `name`, `level_req` and `xp_rate` are required; everything
/// else is optional reference data and absent fields surface as "not
/// applicable" downstream rather than as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingMethod {
    pub id: String,
    pub name: String,
    pub level_req: u32,
    /// Primary XP per hour.
    pub xp_rate: f64,
    /// Agility only: Marks of Grace per hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks_per_hour: Option<f64>,
    /// XP per single action (lap, log, ore). Enables action counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp_per_action: Option<f64>,
    /// Name of the action, e.g. "lap".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_xp_rate: Vec<AlternativeXp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quests_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// General category, e.g. "Rooftop Course".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Complete reference data for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillData {
    /// Lowercase identifier, e.g. "agility".
    pub skill_name_canonical: String,
    /// Display form, e.g. "Agility".
    pub skill_name_display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub training_methods: Vec<TrainingMethod>,
}

impl SkillData {
    /// Whether this skill's methods pay out Marks of Grace as a secondary
    /// reward. Only agility does.
    pub fn awards_marks(&self) -> bool {
        self.skill_name_canonical == "agility"
    }
}
