//! 目录存储：pkg 原生套件目录与 Wine 应用注册表

use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};

use super::types::WineApp;

/// 解析 pkg query 的输出：按空白分割、升序排序，重复条目原样保留
fn parse_package_list(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = raw.split_whitespace().map(|s| s.to_string()).collect();
    names.sort_unstable();
    names
}

/// 枚举全部已安装套件名 (pkg query %n)
pub(crate) fn query_native_packages() -> Result<Vec<String>> {
    let output = Command::new("pkg")
        .args(["query", "%n"])
        .output()
        .context("无法执行 pkg query")?;
    if !output.status.success() {
        bail!("pkg query %n 执行失败");
    }
    Ok(parse_package_list(&String::from_utf8_lossy(&output.stdout)))
}

/// 查询单个套件的详情 (pkg info)，失败时返回 None
pub(crate) fn query_native_info(name: &str) -> Option<String> {
    let output = Command::new("pkg").args(["info", name]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).to_string())
}

/// 通过 sh 运行检测命令，以退出码判断 Wine 应用环境是否存在
pub(crate) fn run_check_command(cmd: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// 两份独立目录：动态查询的原生套件目录，与启动时固定的 Wine 应用注册表
#[derive(Debug)]
pub struct CatalogStore {
    native: Vec<String>,
    wine: Vec<WineApp>,
}

impl CatalogStore {
    pub fn new(wine: Vec<WineApp>) -> Self {
        Self {
            native: Vec::new(),
            wine,
        }
    }

    pub fn native(&self) -> &[String] {
        &self.native
    }

    pub fn wine(&self) -> &[WineApp] {
        &self.wine
    }

    pub fn wine_app(&self, id: &str) -> Option<&WineApp> {
        self.wine.iter().find(|a| a.id == id)
    }

    /// 重建原生目录；查询失败时保留旧目录并返回错误（调用方告警，不致命）
    pub fn refresh_native(&mut self) -> Result<&[String]> {
        self.apply_native_query(query_native_packages())
    }

    fn apply_native_query(&mut self, result: Result<Vec<String>>) -> Result<&[String]> {
        match result {
            Ok(names) => {
                self.native = names;
                Ok(&self.native)
            }
            Err(e) => {
                log::warn!("刷新 pkg 目录失败: {e:#}");
                Err(e)
            }
        }
    }

    /// 运行条目的 check_cmd 探测安装状态；id 不存在时返回 None
    pub fn wine_installed(&self, id: &str) -> Option<bool> {
        let app = self.wine_app(id)?;
        if app.check_cmd.is_empty() {
            return None;
        }
        Some(run_check_command(&app.check_cmd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sorts_lexicographically() {
        assert_eq!(
            parse_package_list("bash\nvim\ncurl"),
            vec!["bash", "curl", "vim"]
        );
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        assert_eq!(
            parse_package_list("vim\nbash\nvim\n"),
            vec!["bash", "vim", "vim"]
        );
    }

    #[test]
    fn test_parse_tolerates_blank_lines() {
        assert_eq!(parse_package_list("\n\nzsh\n  \nbash\n"), vec!["bash", "zsh"]);
        assert!(parse_package_list("").is_empty());
    }

    #[test]
    fn test_check_command_exit_status() {
        assert!(run_check_command("true"));
        assert!(!run_check_command("false"));
    }

    #[test]
    fn test_wine_installed_unknown_id() {
        let store = CatalogStore::new(Vec::new());
        assert_eq!(store.wine_installed("nope"), None);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_catalog() {
        let mut store = CatalogStore::new(Vec::new());
        store
            .apply_native_query(Ok(vec!["bash".to_string(), "vim".to_string()]))
            .unwrap();
        let err = store.apply_native_query(Err(anyhow::anyhow!("查询失败")));
        assert!(err.is_err());
        assert_eq!(store.native(), ["bash", "vim"]);
    }
}
