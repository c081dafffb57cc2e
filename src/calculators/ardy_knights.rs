//! Ardougne Knight pickpocket calculator
//!
//! Thieving projection with level-dependent success chance, additive
//! boosts, stun damage, food upkeep and profit. Success rates come from
//! the wiki table and are linearly interpolated between known levels.

use serde::Serialize;

use super::CalcError;
use crate::xp::level_for_xp;

/// XP for one successful pickpocket.
pub const BASE_XP_PER_PICKPOCKET: f64 = 84.0;
/// Coin drop range per success.
const MIN_COIN_DROP: f64 = 1.0;
const MAX_COIN_DROP: f64 = 50.0;
/// Damage taken on a failed attempt.
const STUN_DAMAGE: f64 = 2.0;
/// Minimum Thieving level to pickpocket knights effectively.
pub const MIN_THIEVING_LEVEL: u32 = 55;

// Additive success-chance boosts.
const ARDY_MED_BOOST: f64 = 0.10;
const THIEVING_CAPE_BOOST: f64 = 0.10;
const SHADOW_VEIL_BOOST: f64 = 0.15;

/// Base success chance by Thieving level, from the wiki table. Levels in
/// between are interpolated.
const BASE_SUCCESS_CHANCE: &[(u32, f64)] = &[
    (55, 0.65),
    (60, 0.70),
    (65, 0.75),
    (70, 0.80),
    (75, 0.85),
    (80, 0.90),
    (85, 0.92),
    (90, 0.94),
    (95, 0.96),
    (99, 0.97),
];

/// Everything that affects the projection besides the XP range.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArdyKnightSetup {
    pub has_ardy_med: bool,
    pub has_thieving_cape: bool,
    pub has_rogues_outfit: bool,
    pub has_shadow_veil: bool,
    pub hourly_pickpockets: u32,
    pub food_heal_amount: u32,
    pub food_cost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArdyKnightResult {
    pub calculated_success_rate: f64,
    pub effective_xp_per_attempt: f64,
    pub effective_gp_per_attempt: f64,
    pub xp_hour: u64,
    pub gp_hour: i64,
    pub damage_per_hour: u64,
    pub food_needed_per_hour: u64,
    pub profit_per_hour: i64,

    pub current_thieving_level: u32,
    pub target_thieving_level: u32,
    pub current_total_xp: u32,
    pub target_total_xp: u32,
    pub xp_to_target: u32,
    pub hours_to_target: f64,
    pub pickpockets_to_target: u64,
}

/// Base success chance for a Thieving level. Below 55 the knights are not
/// worth attempting and the chance is 0.
fn base_success_chance(level: u32) -> f64 {
    let (first_level, first_chance) = BASE_SUCCESS_CHANCE[0];
    if level < first_level {
        return 0.0;
    }
    let (last_level, last_chance) = BASE_SUCCESS_CHANCE[BASE_SUCCESS_CHANCE.len() - 1];
    if level >= last_level {
        return last_chance;
    }

    // Find the bracketing table entries and interpolate.
    let mut lower = (first_level, first_chance);
    for &(l, chance) in BASE_SUCCESS_CHANCE {
        if l <= level {
            lower = (l, chance);
        } else {
            let (l0, c0) = lower;
            return c0 + (chance - c0) * f64::from(level - l0) / f64::from(l - l0);
        }
    }
    lower.1
}

/// Project XP, GP, food and time-to-target for pickpocketing Ardougne
/// Knights between two total-XP marks.
pub fn calculate(
    current_xp: u32,
    target_xp: u32,
    setup: ArdyKnightSetup,
) -> Result<ArdyKnightResult, CalcError> {
    let current_level = level_for_xp(f64::from(current_xp));
    let target_level = level_for_xp(f64::from(target_xp));

    if current_level < MIN_THIEVING_LEVEL {
        return Err(CalcError::LevelBelowMinimum {
            skill: "thieving",
            level: current_level,
            minimum: MIN_THIEVING_LEVEL,
        });
    }
    if target_xp <= current_xp {
        return Err(CalcError::TargetNotAboveCurrent {
            current: current_xp,
            target: target_xp,
        });
    }
    if setup.hourly_pickpockets == 0 {
        return Err(CalcError::NonPositive { field: "hourly_pickpockets" });
    }

    let mut success = base_success_chance(current_level);
    if setup.has_ardy_med {
        success += ARDY_MED_BOOST;
    }
    if setup.has_thieving_cape {
        success += THIEVING_CAPE_BOOST;
    }
    if setup.has_shadow_veil {
        success += SHADOW_VEIL_BOOST;
    }
    // A fully boosted 99 still fails 1 in 200 attempts.
    let cap = if current_level >= 99
        && setup.has_ardy_med
        && setup.has_thieving_cape
        && setup.has_shadow_veil
    {
        0.995
    } else {
        1.0
    };
    let success = success.min(cap);
    let failure = 1.0 - success;

    let xp_per_attempt = BASE_XP_PER_PICKPOCKET * success;
    let mut coins_per_success = (MIN_COIN_DROP + MAX_COIN_DROP) / 2.0;
    if setup.has_rogues_outfit {
        coins_per_success *= 2.0;
    }
    let gp_per_attempt = coins_per_success * success;

    let attempts = f64::from(setup.hourly_pickpockets);
    let xp_hour = (xp_per_attempt * attempts).round() as u64;
    let gp_hour = (gp_per_attempt * attempts).round() as i64;
    let damage_per_hour = (failure * STUN_DAMAGE * attempts).round() as u64;

    let food_needed_per_hour = if setup.food_heal_amount > 0 {
        (damage_per_hour as f64 / f64::from(setup.food_heal_amount)).ceil() as u64
    } else {
        0
    };
    let profit_per_hour = gp_hour - food_needed_per_hour as i64 * setup.food_cost;

    let xp_to_target = target_xp - current_xp;
    let hours_to_target = if xp_hour > 0 {
        f64::from(xp_to_target) / xp_hour as f64
    } else {
        0.0
    };
    let pickpockets_to_target = if xp_per_attempt > 0.0 {
        (f64::from(xp_to_target) / xp_per_attempt).ceil() as u64
    } else {
        0
    };

    Ok(ArdyKnightResult {
        calculated_success_rate: success,
        effective_xp_per_attempt: xp_per_attempt,
        effective_gp_per_attempt: gp_per_attempt,
        xp_hour,
        gp_hour,
        damage_per_hour,
        food_needed_per_hour,
        profit_per_hour,
        current_thieving_level: current_level,
        target_thieving_level: target_level,
        current_total_xp: current_xp,
        target_total_xp: target_xp,
        xp_to_target,
        hours_to_target,
        pickpockets_to_target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xp::xp_for_level;

    fn setup(hourly: u32) -> ArdyKnightSetup {
        ArdyKnightSetup {
            hourly_pickpockets: hourly,
            ..Default::default()
        }
    }

    #[test]
    fn test_success_chance_at_table_keys() {
        assert_eq!(base_success_chance(55), 0.65);
        assert_eq!(base_success_chance(80), 0.90);
        assert_eq!(base_success_chance(99), 0.97);
        assert_eq!(base_success_chance(120), 0.97);
        assert_eq!(base_success_chance(54), 0.0);
        assert_eq!(base_success_chance(1), 0.0);
    }

    #[test]
    fn test_success_chance_interpolates() {
        // Halfway between 55 (0.65) and 60 (0.70) is not a table key.
        let chance = base_success_chance(57);
        assert!((chance - 0.67).abs() < 1e-9, "got {chance}");
        let chance = base_success_chance(92);
        assert!((chance - 0.948).abs() < 1e-9, "got {chance}");
    }

    #[test]
    fn test_rejects_sub_55_thieving() {
        let result = calculate(xp_for_level(50), xp_for_level(60), setup(1_300));
        assert!(matches!(
            result,
            Err(CalcError::LevelBelowMinimum { skill: "thieving", .. })
        ));
    }

    #[test]
    fn test_rejects_target_not_above_current() {
        let xp = xp_for_level(70);
        assert!(matches!(
            calculate(xp, xp, setup(1_300)),
            Err(CalcError::TargetNotAboveCurrent { .. })
        ));
    }

    #[test]
    fn test_boosts_are_additive_and_capped() {
        let current = xp_for_level(99);
        let target = current + 1_000_000;
        let full = ArdyKnightSetup {
            has_ardy_med: true,
            has_thieving_cape: true,
            has_shadow_veil: true,
            hourly_pickpockets: 1_300,
            ..Default::default()
        };
        let result = calculate(current, target, full).unwrap();
        // 0.97 + 0.10 + 0.10 + 0.15 would exceed 1.0; capped at 0.995.
        assert_eq!(result.calculated_success_rate, 0.995);
    }

    #[test]
    fn test_rogues_outfit_doubles_gp() {
        let current = xp_for_level(70);
        let target = xp_for_level(80);
        let plain = calculate(current, target, setup(1_300)).unwrap();
        let doubled = calculate(
            current,
            target,
            ArdyKnightSetup {
                has_rogues_outfit: true,
                hourly_pickpockets: 1_300,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(doubled.gp_hour, plain.gp_hour * 2);
    }

    #[test]
    fn test_food_and_profit() {
        let current = xp_for_level(70);
        let target = xp_for_level(71);
        let result = calculate(
            current,
            target,
            ArdyKnightSetup {
                hourly_pickpockets: 1_000,
                food_heal_amount: 20,
                food_cost: 300,
                ..Default::default()
            },
        )
        .unwrap();
        // Level 70: 0.80 success, 0.20 failure -> 400 damage/hour -> 20 food.
        assert_eq!(result.damage_per_hour, 400);
        assert_eq!(result.food_needed_per_hour, 20);
        assert_eq!(result.profit_per_hour, result.gp_hour - 20 * 300);
    }

    #[test]
    fn test_time_to_target() {
        let current = xp_for_level(70);
        let target = xp_for_level(71);
        let result = calculate(current, target, setup(1_000)).unwrap();

        let xp_to_target = xp_for_level(71) - xp_for_level(70);
        assert_eq!(result.xp_to_target, xp_to_target);
        // 84 * 0.80 * 1000 = 67200 XP/hour.
        assert_eq!(result.xp_hour, 67_200);
        let expected_hours = f64::from(xp_to_target) / 67_200.0;
        assert!((result.hours_to_target - expected_hours).abs() < 1e-9);
        assert_eq!(
            result.pickpockets_to_target,
            (f64::from(xp_to_target) / (84.0 * 0.80)).ceil() as u64
        );
    }
}
