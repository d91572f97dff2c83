use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::engine::WineApp;
use crate::i18n;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 界面语言：zh_TW / en_US
    pub language: String,
    pub dark_mode: bool,
    /// 附加的 Wine 应用条目，启动时并入内置注册表
    pub wine_apps: Vec<WineApp>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: i18n::LANG_ZH_TW.to_string(),
            dark_mode: true,
            wine_apps: Vec::new(),
        }
    }
}

fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config/youmu-appstore/config.toml")
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.language, i18n::LANG_ZH_TW);
        assert!(config.dark_mode);
        assert!(config.wine_apps.is_empty());
    }

    #[test]
    fn test_language_round_trip() {
        let mut config = Config::default();
        config.language = i18n::LANG_EN_US.to_string();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.language, i18n::LANG_EN_US);
    }

    #[test]
    fn test_extra_wine_apps_parse() {
        let config: Config = toml::from_str(
            r#"
            language = "en_US"

            [[wine_apps]]
            id = "Notepad"
            name_en = "Notepad++"
            install_cmd = "wine ~/Downloads/npp.exe"
            check_cmd = "ls ~/.wine/drive_c/npp"
            "#,
        )
        .unwrap();
        assert_eq!(config.wine_apps.len(), 1);
        let app = &config.wine_apps[0];
        assert_eq!(app.id, "Notepad");
        assert_eq!(app.display_name("zh_TW"), "Notepad++");
        assert_eq!(app.install_cmd, "wine ~/Downloads/npp.exe");
    }
}
