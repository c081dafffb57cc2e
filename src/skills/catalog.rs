//! Skill data catalog
//!
//! Loads per-skill training data from external RON files, with fallback to
//! hardcoded defaults when no data directory is present. One file per
//! skill, named after the canonical skill name.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::{SkillData, TrainingMethod};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("skill name cannot be empty")]
    EmptyName,
    #[error("skill data not found for: {0}")]
    NotFound(String),
    #[error("failed to read skill file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse skill data: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// File-backed skill catalog.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    data_dir: Option<PathBuf>,
}

impl SkillCatalog {
    /// Catalog backed by a data directory. If the directory does not exist
    /// the built-in defaults are served instead.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        if dir.is_dir() {
            Self {
                data_dir: Some(dir.to_path_buf()),
            }
        } else {
            log::warn!(
                "Skill data directory {} not found. Using built-in defaults.",
                dir.display()
            );
            Self::with_defaults()
        }
    }

    /// Catalog serving only the built-in default data.
    pub fn with_defaults() -> Self {
        Self { data_dir: None }
    }

    /// Load one skill by name. Names are normalized (trimmed, lowercased)
    /// before lookup.
    pub fn load(&self, skill_name: &str) -> Result<SkillData, CatalogError> {
        let name = skill_name.trim().to_lowercase();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        match &self.data_dir {
            Some(dir) => {
                let path = dir.join(format!("{name}.ron"));
                let content = match fs::read_to_string(&path) {
                    Ok(content) => content,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return Err(CatalogError::NotFound(name));
                    }
                    Err(e) => return Err(e.into()),
                };
                let mut data: SkillData = ron::from_str(&content)?;
                // Canonical name defaults to the filename.
                if data.skill_name_canonical.is_empty() {
                    data.skill_name_canonical = name;
                }
                Ok(data)
            }
            None => default_skills()
                .into_iter()
                .find(|s| s.skill_name_canonical == name)
                .ok_or(CatalogError::NotFound(name)),
        }
    }

    /// All available skill names, sorted.
    pub fn list(&self) -> Result<Vec<String>, CatalogError> {
        let mut names = match &self.data_dir {
            Some(dir) => fs::read_dir(dir)?
                .filter_map(|entry| {
                    let path = entry.ok()?.path();
                    if path.extension()? != "ron" {
                        return None;
                    }
                    Some(path.file_stem()?.to_string_lossy().into_owned())
                })
                .collect(),
            None => default_skills()
                .into_iter()
                .map(|s| s.skill_name_canonical)
                .collect::<Vec<_>>(),
        };
        names.sort();
        Ok(names)
    }
}

fn rooftop(
    id: &str,
    name: &str,
    location: &str,
    level_req: u32,
    xp_rate: f64,
    xp_per_lap: f64,
    marks_per_hour: f64,
) -> TrainingMethod {
    TrainingMethod {
        id: id.to_string(),
        name: name.to_string(),
        level_req,
        xp_rate,
        marks_per_hour: Some(marks_per_hour),
        xp_per_action: Some(xp_per_lap),
        action_name: Some("lap".to_string()),
        alternative_xp_rate: Vec::new(),
        location: Some(location.to_string()),
        items_required: Vec::new(),
        quests_required: Vec::new(),
        notes: None,
        tags: vec!["rooftop".to_string()],
        kind: Some("Rooftop Course".to_string()),
    }
}

/// Built-in default data, used when no data directory is configured.
pub fn default_skills() -> Vec<SkillData> {
    vec![SkillData {
        skill_name_canonical: "agility".to_string(),
        skill_name_display: "Agility".to_string(),
        description: Some(
            "Plan your rooftop grind: laps, hours and Marks of Grace to your target."
                .to_string(),
        ),
        training_methods: vec![
            TrainingMethod {
                id: "gnome_stronghold".to_string(),
                name: "Gnome Stronghold Course".to_string(),
                level_req: 1,
                xp_rate: 8_000.0,
                marks_per_hour: None,
                xp_per_action: Some(88.0),
                action_name: Some("lap".to_string()),
                alternative_xp_rate: Vec::new(),
                location: Some("Tree Gnome Stronghold".to_string()),
                items_required: Vec::new(),
                quests_required: Vec::new(),
                notes: Some("No marks; leave as soon as rooftops unlock.".to_string()),
                tags: Vec::new(),
                kind: Some("Course".to_string()),
            },
            rooftop(
                "draynor_rooftop",
                "Draynor Village Rooftop Course",
                "Draynor Village",
                10,
                9_000.0,
                120.0,
                12.0,
            ),
            rooftop(
                "varrock_rooftop",
                "Varrock Rooftop Course",
                "Varrock",
                30,
                13_200.0,
                238.0,
                14.0,
            ),
            rooftop(
                "canifis_rooftop",
                "Canifis Rooftop Course",
                "Canifis",
                40,
                19_000.0,
                240.0,
                19.0,
            ),
            rooftop(
                "seers_rooftop",
                "Seers' Village Rooftop Course",
                "Seers' Village",
                60,
                45_000.0,
                570.0,
                12.0,
            ),
            rooftop(
                "ardougne_rooftop",
                "Ardougne Rooftop Course",
                "East Ardougne",
                90,
                62_000.0,
                793.0,
                25.0,
            ),
        ],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_serve_agility() {
        let catalog = SkillCatalog::with_defaults();
        let agility = catalog.load("agility").unwrap();
        assert!(agility.awards_marks());
        assert!(!agility.training_methods.is_empty());
        assert_eq!(catalog.list().unwrap(), vec!["agility".to_string()]);
    }

    #[test]
    fn test_name_normalization() {
        let catalog = SkillCatalog::with_defaults();
        assert!(catalog.load("  Agility ").is_ok());
        assert!(matches!(catalog.load("   "), Err(CatalogError::EmptyName)));
    }

    #[test]
    fn test_unknown_skill_is_not_found() {
        let catalog = SkillCatalog::with_defaults();
        assert!(matches!(
            catalog.load("sailing"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_loads_ron_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();

        let data = SkillData {
            skill_name_canonical: String::new(), // filled from filename
            skill_name_display: "Mining".to_string(),
            description: None,
            training_methods: vec![TrainingMethod {
                id: "iron".to_string(),
                name: "Iron ore".to_string(),
                level_req: 15,
                xp_rate: 40_000.0,
                marks_per_hour: None,
                xp_per_action: Some(35.0),
                action_name: Some("ore".to_string()),
                alternative_xp_rate: Vec::new(),
                location: None,
                items_required: Vec::new(),
                quests_required: Vec::new(),
                notes: None,
                tags: Vec::new(),
                kind: None,
            }],
        };
        let ron = ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::default()).unwrap();
        let mut file = fs::File::create(dir.path().join("mining.ron")).unwrap();
        file.write_all(ron.as_bytes()).unwrap();

        let catalog = SkillCatalog::new(dir.path());
        let mining = catalog.load("mining").unwrap();
        assert_eq!(mining.skill_name_canonical, "mining");
        assert_eq!(mining.training_methods[0].id, "iron");
        assert_eq!(catalog.list().unwrap(), vec!["mining".to_string()]);

        assert!(matches!(
            catalog.load("agility"),
            Err(CatalogError::NotFound(_))
        ));
    }
}
