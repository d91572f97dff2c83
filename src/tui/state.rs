use std::collections::HashMap;

use crate::config::Config;
use crate::engine::{Action, Catalog, Engine};
use crate::i18n;

// ========== 枚举 ==========

/// 当前分页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Packages,
    Wine,
}

// ========== 事件 ==========

/// 界面内部的异步事件（引擎总线事件另行订阅）
#[derive(Debug)]
pub enum AppEvent {
    /// Wine 应用安装状态探测结果
    WineStatusProbed { id: String, installed: bool },
}

// ========== App ==========

pub struct App {
    pub engine: Engine,
    pub config: Config,
    pub tab: Tab,
    // PKG 分页
    pub pkg_cursor: usize,
    pub pkg_info: Option<String>,
    // Wine 分页
    pub wine_cursor: usize,
    pub wine_info: Option<String>,
    pub wine_status: HashMap<String, bool>,
    /// 正在探测安装状态的条目 id
    pub probing: Option<String>,
    // 日志面板
    pub log_lines: Vec<String>,
    pub log_scroll: usize,
    // 状态栏
    pub status_message: Option<String>,
    /// 当前操作面向的目录，结束后据此刷新状态
    pub active_catalog: Option<Catalog>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, engine: Engine) -> Self {
        Self {
            engine,
            config,
            tab: Tab::Packages,
            pkg_cursor: 0,
            pkg_info: None,
            wine_cursor: 0,
            wine_info: None,
            wine_status: HashMap::new(),
            probing: None,
            log_lines: Vec::new(),
            log_scroll: 0,
            status_message: None,
            active_catalog: None,
            should_quit: false,
        }
    }

    pub fn lang(&self) -> &str {
        &self.config.language
    }

    /// 追加日志行并跟随到最新
    pub fn push_log(&mut self, line: String) {
        self.log_lines.push(line);
        if self.log_lines.len() > 1 {
            self.log_scroll = self.log_lines.len().saturating_sub(1);
        }
    }

    pub fn clear_log(&mut self) {
        self.log_lines.clear();
        self.log_scroll = 0;
    }

    /// 切换界面语言并重新解析已加载的本地化内容
    pub fn toggle_language(&mut self) {
        self.config.language = i18n::next_lang(&self.config.language).to_string();
        if let Some(id) = self.engine.selected(Catalog::Wine).map(|s| s.to_string()) {
            self.wine_info = self.engine.wine_info(&id, &self.config.language);
        }
        if let Err(e) = self.config.save() {
            log::warn!("保存配置失败: {e:#}");
        }
    }

    pub fn toggle_theme(&mut self) {
        self.config.dark_mode = !self.config.dark_mode;
        if let Err(e) = self.config.save() {
            log::warn!("保存配置失败: {e:#}");
        }
    }

    /// 调度并启动当前选中条目的动作；调度失败或引擎忙时写入状态栏
    pub fn start_action(&mut self, catalog: Catalog, action: Action) {
        let command = match self.engine.dispatch(catalog, action) {
            Ok(command) => command,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return;
            }
        };
        match self.engine.execute(command) {
            Ok(op) => {
                self.clear_log();
                self.push_log(format!("$ {}", op.command()));
                self.status_message = None;
                self.active_catalog = Some(catalog);
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
            }
        }
    }
}
