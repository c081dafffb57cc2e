//! Training projection engine
//!
//! Pure computation from (method, current XP, target XP) to time, action
//! and secondary-reward estimates. No state, no side effects: the hosting
//! layer calls [`recompute`] whenever any input changes and renders the
//! fresh rows it gets back.

use serde::Serialize;
use thiserror::Error;

use crate::xp::level_for_xp;

use super::types::SkillData;

/// The one recoverable validation error the engine produces.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Target must be greater than current progress.")]
    TargetNotAboveCurrent,
}

/// One computed row of the method table. Absent fields mean "not
/// applicable" (no per-action rate declared, zero throughput, and so on),
/// never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodProjection {
    pub id: String,
    pub name: String,
    pub level_req: u32,
    pub xp_rate: f64,
    /// False when the player's derived level is below `level_req`. The
    /// row is still fully computed so consumers can gray it out rather
    /// than hide it.
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions_needed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_target_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks_of_grace: Option<f64>,
}

/// Recompute the full method table for a skill.
///
/// Methods come back sorted by required level, ties broken by XP rate
/// descending (best option first among equally accessible methods).
pub fn recompute(
    skill: &SkillData,
    current_xp: f64,
    target_xp: f64,
) -> Result<Vec<MethodProjection>, ProjectionError> {
    if target_xp <= current_xp {
        return Err(ProjectionError::TargetNotAboveCurrent);
    }

    let delta = target_xp - current_xp;
    let current_level = level_for_xp(current_xp);
    let awards_marks = skill.awards_marks();

    let mut methods: Vec<_> = skill.training_methods.iter().collect();
    methods.sort_by(|a, b| {
        a.level_req
            .cmp(&b.level_req)
            .then(b.xp_rate.total_cmp(&a.xp_rate))
    });

    let rows = methods
        .into_iter()
        .map(|method| {
            let hours = (method.xp_rate > 0.0).then(|| delta / method.xp_rate);

            let actions_needed = method
                .xp_per_action
                .filter(|&per| per > 0.0)
                .map(|per| (delta / per).ceil() as u64);

            let marks_of_grace = if awards_marks {
                match (method.marks_per_hour, hours) {
                    (Some(rate), Some(h)) => Some(rate * h),
                    _ => None,
                }
            } else {
                None
            };

            MethodProjection {
                id: method.id.clone(),
                name: method.name.clone(),
                level_req: method.level_req,
                xp_rate: method.xp_rate,
                available: current_level >= method.level_req,
                actions_needed,
                action_name: method.action_name.clone(),
                time_to_target_hours: hours,
                time_to_target: hours.and_then(format_hours),
                marks_of_grace,
            }
        })
        .collect();

    Ok(rows)
}

/// Format a duration in fractional hours as whole hours and minutes,
/// rounded to the nearest minute. A positive duration that rounds to zero
/// minutes renders as "<1m". Non-finite input is "not applicable".
pub fn format_hours(hours: f64) -> Option<String> {
    if !hours.is_finite() {
        return None;
    }
    if hours == 0.0 {
        return Some("0h 0m".to_string());
    }
    let total_minutes = (hours * 60.0).round() as u64;
    if total_minutes == 0 && hours > 0.0 {
        return Some("<1m".to_string());
    }
    Some(format!("{}h {}m", total_minutes / 60, total_minutes % 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::types::TrainingMethod;
    use crate::xp::{xp_for_level, XP_THRESHOLDS};

    fn method(id: &str, level_req: u32, xp_rate: f64) -> TrainingMethod {
        TrainingMethod {
            id: id.into(),
            name: id.into(),
            level_req,
            xp_rate,
            marks_per_hour: None,
            xp_per_action: None,
            action_name: None,
            alternative_xp_rate: Vec::new(),
            location: None,
            items_required: Vec::new(),
            quests_required: Vec::new(),
            notes: None,
            tags: Vec::new(),
            kind: None,
        }
    }

    fn skill(canonical: &str, methods: Vec<TrainingMethod>) -> SkillData {
        SkillData {
            skill_name_canonical: canonical.into(),
            skill_name_display: canonical.into(),
            description: None,
            training_methods: methods,
        }
    }

    #[test]
    fn test_target_must_exceed_current() {
        let skill = skill("mining", vec![method("m", 1, 10_000.0)]);
        assert_eq!(
            recompute(&skill, 500.0, 500.0),
            Err(ProjectionError::TargetNotAboveCurrent)
        );
        assert_eq!(
            recompute(&skill, 500.0, 100.0),
            Err(ProjectionError::TargetNotAboveCurrent)
        );
    }

    #[test]
    fn test_time_from_level_1_to_99_at_1000_per_hour() {
        let skill = skill("mining", vec![method("m", 1, 1_000.0)]);
        let rows = recompute(&skill, 0.0, f64::from(xp_for_level(99))).unwrap();

        let expected_hours = f64::from(XP_THRESHOLDS[98]) / 1_000.0;
        assert_eq!(rows[0].time_to_target_hours, Some(expected_hours));

        let total_minutes = (expected_hours * 60.0).round() as u64;
        let expected = format!("{}h {}m", total_minutes / 60, total_minutes % 60);
        assert_eq!(rows[0].time_to_target.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn test_zero_rate_yields_no_time() {
        let skill = skill("mining", vec![method("afk", 1, 0.0)]);
        let rows = recompute(&skill, 0.0, 1_000.0).unwrap();
        assert_eq!(rows[0].time_to_target_hours, None);
        assert_eq!(rows[0].time_to_target, None);
    }

    #[test]
    fn test_actions_only_with_per_action_rate() {
        let mut with_actions = method("laps", 1, 10_000.0);
        with_actions.xp_per_action = Some(300.0);
        with_actions.action_name = Some("lap".into());
        let without = method("other", 1, 9_000.0);

        let skill = skill("agility", vec![without, with_actions]);
        let rows = recompute(&skill, 0.0, 1_000.0).unwrap();

        // Sorted by level then rate desc, so "laps" first.
        assert_eq!(rows[0].id, "laps");
        assert_eq!(rows[0].actions_needed, Some(4)); // ceil(1000 / 300)
        assert_eq!(rows[1].actions_needed, None);
    }

    #[test]
    fn test_marks_gated_on_agility() {
        let mut m = method("rooftop", 1, 10_000.0);
        m.marks_per_hour = Some(20.0);

        let agility = skill("agility", vec![m.clone()]);
        let rows = recompute(&agility, 0.0, 10_000.0).unwrap();
        assert_eq!(rows[0].marks_of_grace, Some(20.0)); // exactly one hour

        let mining = skill("mining", vec![m]);
        let rows = recompute(&mining, 0.0, 10_000.0).unwrap();
        assert_eq!(rows[0].marks_of_grace, None);
    }

    #[test]
    fn test_unavailable_method_still_projected() {
        let skill = skill("mining", vec![method("high", 85, 60_000.0)]);
        let rows = recompute(&skill, 0.0, 1_000.0).unwrap();
        assert!(!rows[0].available);
        assert!(rows[0].time_to_target_hours.is_some());
    }

    #[test]
    fn test_sort_order() {
        let skill = skill(
            "mining",
            vec![
                method("slow_low", 1, 5_000.0),
                method("fast_low", 1, 8_000.0),
                method("mid", 30, 25_000.0),
            ],
        );
        let rows = recompute(&skill, 0.0, 1_000.0).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["fast_low", "slow_low", "mid"]);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.0).as_deref(), Some("0h 0m"));
        assert_eq!(format_hours(0.001).as_deref(), Some("<1m"));
        assert_eq!(format_hours(0.5).as_deref(), Some("0h 30m"));
        assert_eq!(format_hours(1.0).as_deref(), Some("1h 0m"));
        assert_eq!(format_hours(13.034_431).as_deref(), Some("13h 2m"));
        assert_eq!(format_hours(f64::INFINITY), None);
        assert_eq!(format_hours(f64::NAN), None);
    }
}
