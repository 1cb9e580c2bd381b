use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, Result};
use crate::layout::PageLayout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: String,
    pub template_path: String,
    pub output_dir: String,
    pub default_data: String,
    pub first_page_rows: usize,
    pub second_page_rows: usize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        let layout = PageLayout::default();
        Self {
            data_dir: "data".to_string(),
            template_path: "templates/estimate-template.html".to_string(),
            output_dir: "output".to_string(),
            default_data: "charles-johnson".to_string(),
            first_page_rows: layout.first_page_rows,
            second_page_rows: layout.second_page_rows,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn layout(&self) -> PageLayout {
        PageLayout {
            first_page_rows: self.first_page_rows,
            second_page_rows: self.second_page_rows,
        }
    }

    pub fn data_path(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.data_dir).join(format!("{name}.json"))
    }

    pub fn template_path(&self) -> PathBuf {
        PathBuf::from(&self.template_path)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("rooflink")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Settings from `path`. A missing file yields defaults; an unreadable one is
/// an error the caller may choose to downgrade.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| EstimateError::Settings(format!("{}: {e}", path.display())))
}

pub fn load_settings() -> Result<Settings> {
    load_settings_from(&settings_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            data_dir: "/srv/estimates".to_string(),
            first_page_rows: 20,
            ..Settings::default()
        };
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, format!("{json}\n")).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.default_data, "charles-johnson");
        assert_eq!(s.layout(), PageLayout::default());
        assert_eq!(s.layout().first_page_rows, 17);
        assert_eq!(s.log_level, "warn");
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"output_dir": "/tmp/pdfs", "first_page_rows": 15}"#).unwrap();
        let s = load_settings_from(&path).unwrap();
        assert_eq!(s.output_dir, "/tmp/pdfs");
        assert_eq!(s.first_page_rows, 15);
        assert_eq!(s.second_page_rows, 17);
        assert_eq!(s.template_path, "templates/estimate-template.html");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(load_settings_from(&missing).unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_file_is_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "not json").unwrap();
        let err = load_settings_from(&broken).unwrap_err();
        assert!(matches!(err, EstimateError::Settings(_)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_data_path() {
        let s = Settings::default();
        assert_eq!(s.data_path("jane-doe"), PathBuf::from("data").join("jane-doe.json"));
    }
}
