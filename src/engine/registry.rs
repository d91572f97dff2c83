//! Wine 应用注册表：内置条目加配置扩展，合并一次后只读

use super::types::WineApp;

/// 内置条目
pub fn builtin() -> Vec<WineApp> {
    vec![
        WineApp {
            id: "LINE".to_string(),
            name_zh: "LINE".to_string(),
            name_en: "LINE".to_string(),
            desc_zh: "通訊軟體".to_string(),
            desc_en: "Messenger".to_string(),
            install_cmd: "wine ~/Downloads/LineInst.exe".to_string(),
            check_cmd: "ls ~/.wine".to_string(),
        },
        WineApp {
            id: "PvZ".to_string(),
            name_zh: "植物大戰殭屍".to_string(),
            name_en: "Plants vs Zombies".to_string(),
            desc_zh: "經典遊戲".to_string(),
            desc_en: "Classic Game".to_string(),
            install_cmd: "wine ~/Downloads/PvZ.exe".to_string(),
            check_cmd: "ls ~/.wine".to_string(),
        },
    ]
}

/// 合并内置条目与配置中的附加条目；id 必须唯一，重复的跳过并告警
pub fn build_registry(extra: Vec<WineApp>) -> Vec<WineApp> {
    let mut apps = builtin();
    for app in extra {
        if apps.iter().any(|a| a.id == app.id) {
            log::warn!("忽略重复的 Wine 应用条目: {}", app.id);
            continue;
        }
        apps.push(app);
    }
    apps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> WineApp {
        WineApp {
            id: id.to_string(),
            name_zh: String::new(),
            name_en: String::new(),
            desc_zh: String::new(),
            desc_en: String::new(),
            install_cmd: format!("wine ~/Downloads/{id}.exe"),
            check_cmd: String::new(),
        }
    }

    #[test]
    fn test_merge_appends_new_entries() {
        let apps = build_registry(vec![entry("Notepad")]);
        assert!(apps.iter().any(|a| a.id == "Notepad"));
        assert_eq!(apps.len(), builtin().len() + 1);
    }

    #[test]
    fn test_merge_skips_duplicate_id() {
        let apps = build_registry(vec![entry("LINE")]);
        assert_eq!(apps.len(), builtin().len());
        // 内置条目保持原样
        let line = apps.iter().find(|a| a.id == "LINE").unwrap();
        assert_eq!(line.install_cmd, "wine ~/Downloads/LineInst.exe");
    }

    #[test]
    fn test_display_name_fallback_chain() {
        let mut app = entry("QQ");
        assert_eq!(app.display_name("zh_TW"), "QQ");
        app.name_en = "Tencent QQ".to_string();
        assert_eq!(app.display_name("zh_TW"), "Tencent QQ");
        app.name_zh = "騰訊 QQ".to_string();
        assert_eq!(app.display_name("zh_TW"), "騰訊 QQ");
        assert_eq!(app.display_name("en_US"), "Tencent QQ");
    }
}
