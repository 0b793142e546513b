use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::pipeline::error::SheetError;

pub const DRAGON_BASE_URL: &str = "https://raw.githubusercontent.com/oracl8/Slay-the-Dragon-Media/main/END_USER_DRAGON_LORD_BASIC/Spritesheets/";
pub const KNIGHT_BASE_URL: &str =
    "https://raw.githubusercontent.com/oracl8/Slay-the-Dragon-Media/main/Sprites/without_outline/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub remote_filename: String,
    pub frame_count: u32,
    pub output_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_width: Option<u32>,
}

impl SheetSpec {
    pub fn new(
        remote_filename: impl Into<String>,
        frame_count: u32,
        output_prefix: impl Into<String>,
    ) -> Self {
        Self {
            remote_filename: remote_filename.into(),
            frame_count,
            output_prefix: output_prefix.into(),
            expected_width: None,
        }
    }

    pub fn with_expected_width(mut self, width: u32) -> Self {
        self.expected_width = Some(width);
        self
    }

    pub fn validate(&self) -> Result<(), SheetError> {
        let reason = if self.remote_filename.trim().is_empty() {
            "remote filename is empty"
        } else if self.output_prefix.trim().is_empty() {
            "output prefix is empty"
        } else if self.frame_count == 0 {
            "frame count must be at least 1"
        } else {
            return Ok(());
        };

        Err(SheetError::InvalidSpec {
            filename: self.remote_filename.clone(),
            reason: reason.to_string(),
        })
    }
}

/// A base location plus the sheets fetched from it, in processing order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub base_url: String,
    #[serde(default)]
    pub sheets: Vec<SheetSpec>,
}

impl Catalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, sheet: SheetSpec) -> Self {
        self.sheets.push(sheet);
        self
    }

    pub fn dragon() -> Self {
        Self::new(DRAGON_BASE_URL)
            .with_sheet(SheetSpec::new("dragon_lord_death_160x160.png", 36, "dragon_death"))
            .with_sheet(SheetSpec::new(
                "dragon_lord_idle_basic_74x74.png",
                4,
                "dragon_idle",
            ))
    }

    pub fn knight() -> Self {
        let sheets = [
            ("ATTACK 1.png", 6, "attack1"),
            ("ATTACK 2.png", 5, "attack2"),
            ("ATTACK 3.png", 6, "attack3"),
            ("IDLE.png", 7, "idle"),
            ("WALK.png", 8, "walk"),
            ("RUN.png", 8, "run"),
            ("JUMP.png", 5, "jump"),
            ("DEFEND.png", 6, "defend"),
            ("HURT.png", 4, "hurt"),
            ("DEATH.png", 12, "death"),
        ];

        // Knight strips are 96px per frame.
        sheets
            .into_iter()
            .fold(Self::new(KNIGHT_BASE_URL), |catalog, (file, frames, name)| {
                catalog.with_sheet(
                    SheetSpec::new(file, frames, format!("knight_{}", name))
                        .with_expected_width(frames * 96),
                )
            })
    }

    pub fn validate(&self) -> Result<(), SheetError> {
        self.sheets.iter().try_for_each(SheetSpec::validate)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        catalog.validate()?;
        Ok(catalog)
    }
}

/// Named built-in catalogs selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Dragon,
    Knight,
    All,
}

impl Preset {
    pub fn catalogs(self) -> Vec<Catalog> {
        match self {
            Preset::Dragon => vec![Catalog::dragon()],
            Preset::Knight => vec![Catalog::knight()],
            Preset::All => vec![Catalog::dragon(), Catalog::knight()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_dragon_preset() {
        let catalog = Catalog::dragon();
        assert_eq!(catalog.base_url, DRAGON_BASE_URL);
        assert_eq!(catalog.sheets.len(), 2);
        assert_eq!(catalog.sheets[0].frame_count, 36);
        assert_eq!(catalog.sheets[0].output_prefix, "dragon_death");
        assert_eq!(catalog.sheets[1].output_prefix, "dragon_idle");
        assert!(catalog.sheets.iter().all(|s| s.expected_width.is_none()));
    }

    #[test]
    fn test_knight_preset_order_and_widths() {
        let catalog = Catalog::knight();
        assert_eq!(catalog.sheets.len(), 10);

        let first = &catalog.sheets[0];
        assert_eq!(first.remote_filename, "ATTACK 1.png");
        assert_eq!(first.output_prefix, "knight_attack1");
        assert_eq!(first.expected_width, Some(576));

        let last = &catalog.sheets[9];
        assert_eq!(last.remote_filename, "DEATH.png");
        assert_eq!(last.frame_count, 12);
        assert_eq!(last.expected_width, Some(1152));

        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_preset_all_runs_dragon_first() {
        let catalogs = Preset::All.catalogs();
        assert_eq!(catalogs.len(), 2);
        assert_eq!(catalogs[0].base_url, DRAGON_BASE_URL);
        assert_eq!(catalogs[1].base_url, KNIGHT_BASE_URL);
    }

    #[test]
    fn test_parse_catalog_toml() {
        let toml_str = r#"
            base_url = "http://localhost/sheets/"

            [[sheets]]
            remote_filename = "HURT.png"
            frame_count = 4
            output_prefix = "knight_hurt"
            expected_width = 384

            [[sheets]]
            remote_filename = "slime.png"
            frame_count = 3
            output_prefix = "slime"
        "#;

        let catalog = Catalog::from_toml_str(toml_str).unwrap();
        assert_eq!(catalog.sheets.len(), 2);
        assert_eq!(catalog.sheets[0].expected_width, Some(384));
        assert_eq!(catalog.sheets[1].expected_width, None);
        assert_eq!(catalog.sheets[1].output_prefix, "slime");
    }

    #[test]
    fn test_zero_frame_count_is_rejected() {
        let catalog = Catalog::new("http://localhost/").with_sheet(SheetSpec::new("a.png", 0, "a"));
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, SheetError::InvalidSpec { .. }));
        assert!(err.to_string().contains("a.png"));
    }

    #[test]
    fn test_load_from_file_validates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "base_url = \"http://x/\"\n[[sheets]]\nremote_filename = \"a.png\"\nframe_count = 2\noutput_prefix = \"\"\n",
        )
        .unwrap();

        assert!(Catalog::load_from_file(&path).is_err());
    }

    #[test]
    fn test_dumped_catalog_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("knight.toml");

        std::fs::write(&path, Catalog::knight().to_toml_string().unwrap()).unwrap();
        let loaded = Catalog::load_from_file(&path).unwrap();
        assert_eq!(loaded, Catalog::knight());
    }
}
