//! Wintertodt calculator
//!
//! XP, pet odds and simulated loot for subduing the Wintertodt. XP per
//! round scales with the player's Firemaking level; every round awards a
//! supply crate whose contents are rolled per slot.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use super::CalcError;

/// Minimum Firemaking level to enter the Wintertodt.
pub const MIN_FIREMAKING_LEVEL: u32 = 50;

/// Flat XP per subdued round, before the level bonus.
const BASE_XP_PER_ROUND: u32 = 740;
/// Bonus XP per Firemaking level, floored.
const XP_PER_FM_LEVEL: f64 = 13.6;
/// Phoenix chance per supply crate (1/5000).
const PET_RATE_PER_CRATE: f64 = 1.0 / 5_000.0;

struct LootItem {
    name: &'static str,
    quantity: u64,
    value: i64,
    rate: f64,
}

// One of each per round, always.
const COMMON_LOOT: &[LootItem] = &[
    LootItem { name: "Burnt page", quantity: 1, value: 750, rate: 1.0 },
    LootItem { name: "Supply crate", quantity: 1, value: 0, rate: 1.0 },
];

// Rolled independently once per round.
const RARE_LOOT: &[LootItem] = &[
    LootItem { name: "Torstol seeds", quantity: 1, value: 58_000, rate: 0.02 },
    LootItem { name: "Magic seeds", quantity: 1, value: 104_000, rate: 0.015 },
    LootItem { name: "Palm tree seeds", quantity: 1, value: 37_000, rate: 0.025 },
    LootItem { name: "Yew seeds", quantity: 1, value: 67_000, rate: 0.02 },
    LootItem { name: "Dragon axe", quantity: 1, value: 8_500_000, rate: 0.0001 },
    LootItem { name: "Phoenix", quantity: 1, value: 0, rate: 0.0002 },
];

// Candidates for each crate slot; first hit wins the slot.
const SUPPLY_LOOT: &[LootItem] = &[
    LootItem { name: "Grimy ranarr weed", quantity: 2, value: 7_000, rate: 0.1 },
    LootItem { name: "Grimy snapdragon", quantity: 2, value: 11_000, rate: 0.08 },
    LootItem { name: "Grimy torstol", quantity: 1, value: 25_000, rate: 0.05 },
    LootItem { name: "Uncut diamond", quantity: 1, value: 2_800, rate: 0.12 },
    LootItem { name: "Pure essence", quantity: 50, value: 4, rate: 0.2 },
    LootItem { name: "Raw shark", quantity: 3, value: 800, rate: 0.15 },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WintertodtResult {
    pub total_experience: u64,
    pub average_exp_hour: f64,
    /// Chance of the Phoenix pet over all rounds, as a percentage.
    pub pet_chance: f64,
    pub estimated_loot: BTreeMap<String, u64>,
    pub total_value: i64,
    /// Hours to complete all rounds.
    pub total_time: f64,
}

/// Estimate XP, time, pet chance and loot for a Wintertodt grind.
pub fn calculate(
    firemaking_level: u32,
    rounds_per_hour: f64,
    total_rounds: u32,
    rng: &mut impl Rng,
) -> Result<WintertodtResult, CalcError> {
    if firemaking_level < MIN_FIREMAKING_LEVEL {
        return Err(CalcError::LevelBelowMinimum {
            skill: "firemaking",
            level: firemaking_level,
            minimum: MIN_FIREMAKING_LEVEL,
        });
    }
    if rounds_per_hour <= 0.0 {
        return Err(CalcError::NonPositive { field: "rounds_per_hour" });
    }
    if total_rounds == 0 {
        return Err(CalcError::NonPositive { field: "total_rounds" });
    }

    let bonus_xp = (f64::from(firemaking_level) * XP_PER_FM_LEVEL).floor() as u64;
    let xp_per_round = u64::from(BASE_XP_PER_ROUND) + bonus_xp;
    let total_xp = xp_per_round * u64::from(total_rounds);

    let total_time = f64::from(total_rounds) / rounds_per_hour;
    let avg_xp_hour = total_xp as f64 / total_time;

    let pet_chance = pet_chance(total_rounds);

    let (estimated_loot, total_value) = simulate_loot(total_rounds, rng);

    Ok(WintertodtResult {
        total_experience: total_xp,
        average_exp_hour: avg_xp_hour,
        pet_chance: pet_chance * 100.0,
        estimated_loot,
        total_value,
        total_time,
    })
}

/// Chance of at least one Phoenix over `rounds` crates, as a fraction.
fn pet_chance(rounds: u32) -> f64 {
    1.0 - (1.0 - PET_RATE_PER_CRATE).powf(f64::from(rounds))
}

/// Simulate loot over `rounds` supply crates.
pub fn simulate_loot(rounds: u32, rng: &mut impl Rng) -> (BTreeMap<String, u64>, i64) {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_value: i64 = 0;

    for item in COMMON_LOOT {
        let quantity = u64::from(rounds) * item.quantity;
        counts.insert(item.name.to_string(), quantity);
        total_value += quantity as i64 * item.value;
    }

    for _ in 0..rounds {
        // 3-4 item slots per crate.
        let slots = 3 + rng.gen_range(0..2);

        for _ in 0..slots {
            for item in SUPPLY_LOOT {
                if rng.gen::<f64>() < item.rate {
                    *counts.entry(item.name.to_string()).or_default() += item.quantity;
                    total_value += item.quantity as i64 * item.value;
                    break; // one item per slot
                }
            }
        }

        for item in RARE_LOOT {
            if rng.gen::<f64>() < item.rate {
                *counts.entry(item.name.to_string()).or_default() += item.quantity;
                // The pet has no GE value.
                if item.name != "Phoenix" {
                    total_value += item.quantity as i64 * item.value;
                }
            }
        }
    }

    counts.retain(|_, quantity| *quantity > 0);
    (counts, total_value)
}
