//! 引擎相关数据类型定义

use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 目录类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    /// pkg 原生套件目录
    Native,
    /// Wine 应用注册表
    Wine,
}

/// 对选中条目可执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Uninstall,
}

/// Wine 应用注册表条目，启动后只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineApp {
    pub id: String,
    #[serde(default)]
    pub name_zh: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub desc_zh: String,
    #[serde(default)]
    pub desc_en: String,
    pub install_cmd: String,
    #[serde(default)]
    pub check_cmd: String,
}

impl WineApp {
    /// 按语言取显示名，回退链：请求语言 → 英文 → id
    pub fn display_name(&self, lang: &str) -> &str {
        let name = if lang.starts_with("zh") {
            &self.name_zh
        } else {
            &self.name_en
        };
        if !name.is_empty() {
            return name;
        }
        if !self.name_en.is_empty() {
            return &self.name_en;
        }
        &self.id
    }

    /// 按语言取描述，回退链同 display_name
    pub fn description(&self, lang: &str) -> &str {
        let desc = if lang.starts_with("zh") {
            &self.desc_zh
        } else {
            &self.desc_en
        };
        if !desc.is_empty() {
            return desc;
        }
        &self.desc_en
    }
}

/// 总线事件：一次操作的流式输出行，以及最终结果
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// 子进程 stdout 的一行，按产生顺序投递
    OutputLine(String),
    /// 操作结束，整个操作只投递一次且必然是最后一个事件
    Finished { success: bool, message: String },
}

/// 操作的最终结果
#[derive(Debug, Clone)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

/// 一次命令执行的记录：命令原文、只增的输出行日志、至多一次的最终结果
#[derive(Debug)]
pub struct Operation {
    command: String,
    lines: Mutex<Vec<String>>,
    outcome: OnceLock<Outcome>,
}

impl Operation {
    pub(crate) fn new(command: String) -> Self {
        Self {
            command,
            lines: Mutex::new(Vec::new()),
            outcome: OnceLock::new(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// 当前输出行快照
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome.get().cloned()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// 追加一行输出；结束后到达的行直接丢弃
    pub(crate) fn push_line(&self, line: String) {
        if self.outcome.get().is_some() {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }

    /// 写入最终结果，只有第一次调用生效，返回是否写入成功
    pub(crate) fn finish(&self, success: bool, message: String) -> bool {
        self.outcome.set(Outcome { success, message }).is_ok()
    }
}

/// 调度失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("当前目录没有选中的条目")]
    NoSelection,
    #[error("该目录不支持此动作")]
    UnsupportedAction,
}

/// 已有操作在运行时又发起新操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("已有操作正在运行")]
pub struct BusyError;
