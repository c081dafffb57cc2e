//! OSRS hiscores lookup
//!
//! Fetches a player's skill levels from the official hiscores CSV endpoint
//! and caches the parsed result. Each line is `rank,level,xp`; lines arrive
//! in a fixed skill order with overall totals first.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str =
    "https://secure.runescape.com/m=hiscore_oldschool/index_lite.ws";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Hiscores rows, in the order the endpoint emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Overall,
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecrafting,
    Hunter,
    Construction,
}

impl Skill {
    pub const ALL: [Skill; 24] = [
        Skill::Overall,
        Skill::Attack,
        Skill::Defence,
        Skill::Strength,
        Skill::Hitpoints,
        Skill::Ranged,
        Skill::Prayer,
        Skill::Magic,
        Skill::Cooking,
        Skill::Woodcutting,
        Skill::Fletching,
        Skill::Fishing,
        Skill::Firemaking,
        Skill::Crafting,
        Skill::Smithing,
        Skill::Mining,
        Skill::Herblore,
        Skill::Agility,
        Skill::Thieving,
        Skill::Slayer,
        Skill::Farming,
        Skill::Runecrafting,
        Skill::Hunter,
        Skill::Construction,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub username: String,
    pub levels: BTreeMap<Skill, u32>,
}

impl PlayerStats {
    /// Level for a skill, defaulting to 1 for unranked players.
    pub fn level(&self, skill: Skill) -> u32 {
        self.levels.get(&skill).copied().unwrap_or(1)
    }
}

#[derive(Debug, Error)]
pub enum HiscoresError {
    #[error("Username must be between 1 and 12 characters.")]
    InvalidUsername,
    #[error("Player not found on the hiscores.")]
    PlayerNotFound,
    #[error("Hiscores request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Hiscores response was malformed: {0}")]
    Malformed(String),
}

/// Parse the `rank,level,xp` CSV body into per-skill levels. Unranked
/// skills come back as `-1` ranks and are treated as level 1.
pub fn parse_stats(username: &str, body: &str) -> Result<PlayerStats, HiscoresError> {
    let mut levels = BTreeMap::new();

    let mut lines = body.lines();
    for skill in Skill::ALL {
        let line = lines.next().ok_or_else(|| {
            HiscoresError::Malformed(format!("response ended before {skill:?} row"))
        })?;
        let mut fields = line.split(',');
        let rank = fields.next().unwrap_or("");
        let level = fields.next().ok_or_else(|| {
            HiscoresError::Malformed(format!("missing level field in {line:?}"))
        })?;

        // Unranked rows come back as "-1"; treat those, and anything that
        // fails to parse, as level 1.
        let level = if rank == "-1" {
            1
        } else {
            level.trim().parse::<i64>().unwrap_or(1)
        };
        levels.insert(skill, level.max(1) as u32);
    }

    Ok(PlayerStats {
        username: username.to_string(),
        levels,
    })
}

fn validate_username(username: &str) -> Result<(), HiscoresError> {
    if username.is_empty() || username.len() > 12 {
        return Err(HiscoresError::InvalidUsername);
    }
    Ok(())
}

/// Hiscores client with an in-memory cache. Lookups for the same player
/// within the TTL never hit the network.
pub struct HiscoresClient {
    http: reqwest::Client,
    base_url: String,
    cache: Mutex<HashMap<String, (Instant, PlayerStats)>>,
}

impl HiscoresClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Drop any cached entry so the next lookup hits the network.
    pub fn invalidate(&self, username: &str) {
        self.cache.lock().remove(&username.trim().to_lowercase());
    }

    pub async fn lookup(&self, username: &str) -> Result<PlayerStats, HiscoresError> {
        validate_username(username)?;
        let key = username.trim().to_lowercase();

        if let Some((fetched, stats)) = self.cache.lock().get(&key) {
            if fetched.elapsed() < CACHE_TTL {
                log::debug!("Hiscores cache hit for {key}");
                return Ok(stats.clone());
            }
        }

        let url = format!("{}?player={}", self.base_url, key);
        log::info!("Fetching hiscores for {key}");
        let response = self.http.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(HiscoresError::PlayerNotFound);
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let stats = parse_stats(username, &body)?;
        self.cache
            .lock()
            .insert(key, (Instant::now(), stats.clone()));
        Ok(stats)
    }
}

impl Default for HiscoresClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_with_levels(level: u32) -> String {
        let mut body = String::from("12345,1500,50000000\n");
        for _ in 1..Skill::ALL.len() {
            body.push_str(&format!("10000,{level},1000000\n"));
        }
        body
    }

    #[test]
    fn test_parses_all_skills() {
        let stats = parse_stats("Zezima", &body_with_levels(83)).unwrap();
        assert_eq!(stats.username, "Zezima");
        assert_eq!(stats.levels.len(), 24);
        assert_eq!(stats.level(Skill::Agility), 83);
        assert_eq!(stats.level(Skill::Construction), 83);
        assert_eq!(stats.level(Skill::Overall), 1500);
    }

    #[test]
    fn test_unranked_skill_is_level_one() {
        let mut body = body_with_levels(70);
        // Replace the last row (Construction) with an unranked entry.
        let mut lines: Vec<&str> = body.lines().collect();
        lines[23] = "-1,-1,-1";
        body = lines.join("\n");

        let stats = parse_stats("noob", &body).unwrap();
        assert_eq!(stats.level(Skill::Construction), 1);
        assert_eq!(stats.level(Skill::Hunter), 70);
    }

    #[test]
    fn test_garbage_level_field_is_level_one() {
        let mut lines: Vec<String> = body_with_levels(60).lines().map(String::from).collect();
        lines[5] = "10000,not-a-number,0".to_string();
        let stats = parse_stats("x", &lines.join("\n")).unwrap();
        assert_eq!(stats.level(Skill::Ranged), 1);
    }

    #[test]
    fn test_short_response_is_malformed() {
        let body = "1,99,13034431\n2,99,13034431\n";
        assert!(matches!(
            parse_stats("x", body),
            Err(HiscoresError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_skill_defaults_to_one() {
        let stats = PlayerStats {
            username: "x".to_string(),
            levels: BTreeMap::new(),
        };
        assert_eq!(stats.level(Skill::Thieving), 1);
    }

    #[test]
    fn test_username_validation() {
        assert!(matches!(
            validate_username(""),
            Err(HiscoresError::InvalidUsername)
        ));
        assert!(matches!(
            validate_username("thirteen_chars"),
            Err(HiscoresError::InvalidUsername)
        ));
        assert!(validate_username("Zezima").is_ok());
        assert!(validate_username("a").is_ok());
        assert!(validate_username("twelve_chars").is_ok());
    }
}
