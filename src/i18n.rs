//! 界面文案查询：按 (语言, 键) 取显示字符串
//!
//! 请求语言缺失该键时回退 en_US，仍缺失则原样返回键名。

use std::collections::HashMap;
use std::sync::OnceLock;

pub const LANG_ZH_TW: &str = "zh_TW";
pub const LANG_EN_US: &str = "en_US";

type Table = HashMap<&'static str, HashMap<&'static str, &'static str>>;

fn table() -> &'static Table {
    static TABLE: OnceLock<Table> = OnceLock::new();
    TABLE.get_or_init(|| {
        let zh_tw: HashMap<&str, &str> = [
            ("title", "FreeBSD 應用程式商店"),
            ("pkg_apps", "PKG 應用程式"),
            ("wine_apps", "Wine 應用程式"),
            ("search", "搜尋..."),
            ("install", "安裝"),
            ("uninstall", "移除"),
            ("refresh", "重新整理"),
            ("language", "語言"),
            ("status", "狀態"),
            ("install_log", "安裝日誌"),
            ("installed", "已安裝"),
            ("not_installed", "未安裝"),
            ("wine_support", "Wine 支援的 Windows 應用程式"),
            ("info_unavailable", "無法取得資訊"),
            ("checking", "檢測中..."),
            ("running", "正在執行..."),
            ("theme", "主題"),
            ("quit", "離開"),
            ("empty_catalog", "目錄是空的，按 r 重新整理"),
        ]
        .into_iter()
        .collect();

        let en_us: HashMap<&str, &str> = [
            ("title", "FreeBSD App Store"),
            ("pkg_apps", "PKG Applications"),
            ("wine_apps", "Wine Applications"),
            ("search", "Search..."),
            ("install", "Install"),
            ("uninstall", "Uninstall"),
            ("refresh", "Refresh"),
            ("language", "Language"),
            ("status", "Status"),
            ("install_log", "Installation Log"),
            ("installed", "Installed"),
            ("not_installed", "Not Installed"),
            ("wine_support", "Wine Supported Windows Apps"),
            ("info_unavailable", "Info unavailable"),
            ("checking", "Checking..."),
            ("running", "Running..."),
            ("theme", "Theme"),
            ("quit", "Quit"),
            ("empty_catalog", "Catalog is empty, press r to refresh"),
        ]
        .into_iter()
        .collect();

        let mut table = HashMap::new();
        table.insert(LANG_ZH_TW, zh_tw);
        table.insert(LANG_EN_US, en_us);
        table
    })
}

/// 翻译查询
pub fn tr(lang: &str, key: &'static str) -> &'static str {
    let table = table();
    if let Some(entries) = table.get(lang) {
        if let Some(text) = entries.get(key) {
            return text;
        }
    }
    table
        .get(LANG_EN_US)
        .and_then(|entries| entries.get(key))
        .copied()
        .unwrap_or(key)
}

/// 在支持的语言间循环切换
pub fn next_lang(lang: &str) -> &'static str {
    if lang == LANG_ZH_TW {
        LANG_EN_US
    } else {
        LANG_ZH_TW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_per_language() {
        assert_eq!(tr(LANG_ZH_TW, "install"), "安裝");
        assert_eq!(tr(LANG_EN_US, "install"), "Install");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(tr("ja_JP", "install"), "Install");
    }

    #[test]
    fn test_missing_key_returns_key_itself() {
        assert_eq!(tr(LANG_EN_US, "no_such_key"), "no_such_key");
        assert_eq!(tr("ja_JP", "no_such_key"), "no_such_key");
    }

    #[test]
    fn test_next_lang_cycles() {
        assert_eq!(next_lang(LANG_ZH_TW), LANG_EN_US);
        assert_eq!(next_lang(LANG_EN_US), LANG_ZH_TW);
        assert_eq!(next_lang("ja_JP"), LANG_ZH_TW);
    }
}
