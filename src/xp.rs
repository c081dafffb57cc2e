//! Experience and leveling
//!
//! The OSRS experience table and conversions between total XP and level.
//! Both directions are pure and total: out-of-range input is clamped,
//! never rejected.

use thiserror::Error;

/// Highest attainable level.
pub const MAX_LEVEL: u32 = 99;

/// Total XP required to hold each level. Entry `i` is the threshold for
/// level `i + 1`, so entry 0 is 0 (level 1) and entry 98 is the XP for
/// level 99. Strictly increasing; `level_for_xp` relies on that.
pub const XP_THRESHOLDS: [u32; MAX_LEVEL as usize] = [
    0, 83, 174, 276, 388, 512, 650, 801, 969, 1_154, 1_358, 1_584, 1_833,
    2_107, 2_411, 2_746, 3_115, 3_523, 3_973, 4_470, 5_018, 5_624, 6_291,
    7_028, 7_842, 8_740, 9_730, 10_824, 12_031, 13_363, 14_833, 16_456,
    18_247, 20_224, 22_406, 24_815, 27_473, 30_408, 33_648, 37_224, 41_171,
    45_529, 50_339, 55_649, 61_512, 67_983, 75_127, 83_014, 91_721, 101_333,
    111_945, 123_660, 136_594, 150_872, 166_636, 184_040, 203_254, 224_466,
    247_886, 273_742, 302_288, 333_804, 368_599, 407_015, 449_428, 496_254,
    547_953, 605_032, 668_051, 737_627, 814_445, 899_257, 992_895, 1_096_278,
    1_210_421, 1_336_443, 1_475_581, 1_629_200, 1_798_808, 1_986_068,
    2_192_818, 2_421_087, 2_673_114, 2_951_373, 3_258_594, 3_597_792,
    3_972_294, 4_385_776, 4_842_295, 5_346_332, 5_902_831, 6_517_253,
    7_195_629, 7_944_614, 8_771_558, 9_684_577, 10_692_629, 11_805_606,
    13_034_431,
];

/// Error from the few XP operations that can actually fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XpError {
    #[error("target level {target} must be greater than current level {current}")]
    TargetNotAboveCurrent { current: u32, target: u32 },
}

/// Total XP required to hold `level`. Levels below 2 require no XP;
/// levels above [`MAX_LEVEL`] clamp to the level-99 threshold.
pub fn xp_for_level(level: u32) -> u32 {
    if level <= 1 {
        return 0;
    }
    let level = level.min(MAX_LEVEL);
    XP_THRESHOLDS[(level - 1) as usize]
}

/// Level held at `xp` total experience. Negative XP clamps to 0, anything
/// at or beyond the level-99 threshold is 99.
///
/// The table is sorted, so this is a binary search: count the thresholds
/// that `xp` meets. An exact threshold match resolves to the higher level.
pub fn level_for_xp(xp: f64) -> u32 {
    let xp = xp.max(0.0);
    if xp >= f64::from(XP_THRESHOLDS[(MAX_LEVEL - 1) as usize]) {
        return MAX_LEVEL;
    }
    let met = XP_THRESHOLDS.partition_point(|&t| f64::from(t) <= xp) as u32;
    met.max(1)
}

/// XP needed to go from `current_level` to `target_level`. Both levels are
/// clamped the same way as [`xp_for_level`]; the target must end up above
/// the current level.
pub fn xp_between(current_level: u32, target_level: u32) -> Result<u32, XpError> {
    let current = xp_for_level(current_level);
    let target = xp_for_level(target_level);
    if target <= current {
        return Err(XpError::TargetNotAboveCurrent {
            current: current_level,
            target: target_level,
        });
    }
    Ok(target - current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_strictly_increasing() {
        for pair in XP_THRESHOLDS.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
        assert_eq!(XP_THRESHOLDS[0], 0);
        assert_eq!(XP_THRESHOLDS[98], 13_034_431);
    }

    #[test]
    fn test_xp_for_level_clamps() {
        assert_eq!(xp_for_level(0), 0);
        assert_eq!(xp_for_level(1), 0);
        assert_eq!(xp_for_level(2), 83);
        assert_eq!(xp_for_level(99), 13_034_431);
        assert_eq!(xp_for_level(100), xp_for_level(99));
        assert_eq!(xp_for_level(u32::MAX), xp_for_level(99));
    }

    #[test]
    fn test_level_for_xp_known_values() {
        assert_eq!(level_for_xp(0.0), 1);
        assert_eq!(level_for_xp(82.0), 1);
        assert_eq!(level_for_xp(83.0), 2);
        assert_eq!(level_for_xp(84.0), 2);
        assert_eq!(level_for_xp(101_333.0), 50);
        assert_eq!(level_for_xp(737_627.0), 70);
        assert_eq!(level_for_xp(1_475_581.0), 77);
        assert_eq!(level_for_xp(5_346_332.0), 90);
        assert_eq!(level_for_xp(13_034_431.0), 99);
        assert_eq!(level_for_xp(20_000_000.0), 99);
    }

    #[test]
    fn test_level_for_xp_clamps_negative() {
        assert_eq!(level_for_xp(-1.0), 1);
        assert_eq!(level_for_xp(-500_000.0), 1);
    }

    #[test]
    fn test_level_xp_roundtrip() {
        for level in 1..=MAX_LEVEL {
            assert_eq!(
                level_for_xp(f64::from(xp_for_level(level))),
                level,
                "roundtrip failed for level {level}"
            );
        }
    }

    #[test]
    fn test_xp_between() {
        assert_eq!(xp_between(1, 2), Ok(83));
        assert_eq!(xp_between(50, 70), Ok(737_627 - 101_333));
        assert_eq!(xp_between(77, 99), Ok(13_034_431 - 1_475_581));
        assert_eq!(
            xp_between(70, 70),
            Err(XpError::TargetNotAboveCurrent { current: 70, target: 70 })
        );
        assert!(xp_between(70, 50).is_err());
    }
}
