//! Birdhouse run calculator
//!
//! Passive Hunter training: each birdhouse type yields nests, Hunter XP and
//! Crafting XP; nests roll on the tree-seed drop table. A full run is four
//! birdhouses.

use std::collections::BTreeMap;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use super::drop_table::{simulate_drops, DropItem, DropTotals};
use super::CalcError;

/// Average GE value of a bird nest (shell plus expected seed).
const NEST_VALUE: i64 = 7_107;
/// Birdhouses per run.
const HOUSES_PER_RUN: f64 = 4.0;

/// The nine birdhouse tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdhouseType {
    Regular,
    Oak,
    Willow,
    Teak,
    Maple,
    Mahogany,
    Yew,
    Magic,
    Redwood,
}

impl BirdhouseType {
    /// Average nests per birdhouse.
    pub fn avg_nests(self) -> f64 {
        match self {
            Self::Regular => 0.5,
            Self::Oak => 0.75,
            Self::Willow => 1.0,
            Self::Teak => 1.25,
            Self::Maple => 1.5,
            Self::Mahogany => 1.75,
            Self::Yew => 2.0,
            Self::Magic => 2.25,
            Self::Redwood => 2.5,
        }
    }

    /// Hunter XP per birdhouse collected.
    pub fn hunter_xp(self) -> u64 {
        match self {
            Self::Regular => 280,
            Self::Oak => 420,
            Self::Willow => 560,
            Self::Teak => 700,
            Self::Maple => 820,
            Self::Mahogany => 960,
            Self::Yew => 1_020,
            Self::Magic => 1_140,
            Self::Redwood => 1_200,
        }
    }

    /// Crafting XP per birdhouse built.
    pub fn crafting_xp(self) -> u64 {
        match self {
            Self::Regular => 15,
            Self::Oak => 20,
            Self::Willow => 25,
            Self::Teak => 30,
            Self::Maple => 35,
            Self::Mahogany => 40,
            Self::Yew => 45,
            Self::Magic => 50,
            Self::Redwood => 55,
        }
    }
}

impl FromStr for BirdhouseType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "oak" => Ok(Self::Oak),
            "willow" => Ok(Self::Willow),
            "teak" => Ok(Self::Teak),
            "maple" => Ok(Self::Maple),
            "mahogany" => Ok(Self::Mahogany),
            "yew" => Ok(Self::Yew),
            "magic" => Ok(Self::Magic),
            "redwood" => Ok(Self::Redwood),
            other => Err(CalcError::UnknownBirdhouseType(other.to_string())),
        }
    }
}

/// Bird nest tree-seed drop table, probabilities from the wiki.
const NEST_TABLE: &[DropItem] = &[
    DropItem { name: "Acorn", probability: 0.211_685, price: 100 },
    DropItem { name: "Apple tree seed", probability: 0.168_152, price: 29 },
    DropItem { name: "Willow seed", probability: 0.133_529, price: 102 },
    DropItem { name: "Banana tree seed", probability: 0.106_826, price: 34 },
    DropItem { name: "Orange tree seed", probability: 0.084_104, price: 40 },
    DropItem { name: "Curry tree seed", probability: 0.067_225, price: 53 },
    DropItem { name: "Maple seed", probability: 0.053_418, price: 3_027 },
    DropItem { name: "Pineapple seed", probability: 0.041_555, price: 90 },
    DropItem { name: "Papaya tree seed", probability: 0.033_626, price: 1_355 },
    DropItem { name: "Yew seed", probability: 0.026_711, price: 26_217 },
    DropItem { name: "Palm tree seed", probability: 0.021_768, price: 19_772 },
    DropItem { name: "Calquat tree seed", probability: 0.016_815, price: 130 },
    DropItem { name: "Spirit seed", probability: 0.010_882, price: 0 }, // not tradeable
    DropItem { name: "Dragonfruit tree seed", probability: 0.005_935, price: 197_931 },
    DropItem { name: "Magic seed", probability: 0.004_947, price: 91_008 },
    DropItem { name: "Teak seed", probability: 0.003_955, price: 141 },
    DropItem { name: "Mahogany seed", probability: 0.003_955, price: 544 },
    DropItem { name: "Celastrus seed", probability: 0.002_967, price: 67_044 },
    DropItem { name: "Redwood tree seed", probability: 0.001_979, price: 23_919 },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirdhouseResult {
    pub estimated_nests: f64,
    pub hunter_xp: u64,
    pub crafting_xp: u64,
    /// Calendar days at 2 runs per day.
    pub days_low_efficiency: u64,
    /// Calendar days at 7 runs per day.
    pub days_medium_efficiency: u64,
    /// Calendar days at 14 runs per day.
    pub days_high_efficiency: u64,
    pub seed_drops: BTreeMap<String, DropTotals>,
    pub total_loot: i64,
}

/// Estimate nests, XP, loot and real-time duration for `quantity`
/// birdhouses of one type.
pub fn calculate(
    kind: BirdhouseType,
    quantity: u32,
    rng: &mut impl Rng,
) -> Result<BirdhouseResult, CalcError> {
    if quantity == 0 {
        return Err(CalcError::NonPositive { field: "quantity" });
    }

    let nests = f64::from(quantity) * kind.avg_nests();
    let hunter_xp = kind.hunter_xp() * u64::from(quantity);
    let crafting_xp = kind.crafting_xp() * u64::from(quantity);
    let runs = (f64::from(quantity) / HOUSES_PER_RUN).ceil();

    let (seed_drops, seed_value) = simulate_drops(NEST_TABLE, nests.round() as u64, rng);
    let nest_value = (nests * NEST_VALUE as f64) as i64;

    Ok(BirdhouseResult {
        estimated_nests: nests,
        hunter_xp,
        crafting_xp,
        days_low_efficiency: (runs / 2.0).ceil() as u64,
        days_medium_efficiency: (runs / 7.0).ceil() as u64,
        days_high_efficiency: (runs / 14.0).ceil() as u64,
        seed_drops,
        total_loot: seed_value + nest_value,
    })
}
