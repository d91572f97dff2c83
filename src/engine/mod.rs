//! 套件操作引擎：目录维护、条目选中与命令调度、异步执行
//!
//! 引擎不感知界面；界面通过 subscribe 订阅总线事件观察进度与结果。
//! 目录与选中状态只在协调线程上变更，跨线程的只有 Operation 记录与总线。

pub mod catalog;
pub mod registry;
mod runner;
pub mod types;

pub use types::{
    Action, BusyError, Catalog, DispatchError, EngineEvent, Operation, Outcome, WineApp,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast;

use catalog::CatalogStore;
use crate::i18n;

pub struct Engine {
    store: CatalogStore,
    selected_native: Option<String>,
    selected_wine: Option<String>,
    bus: broadcast::Sender<EngineEvent>,
    running: Arc<AtomicBool>,
    current: Option<Arc<Operation>>,
}

impl Engine {
    pub fn new(wine_registry: Vec<WineApp>) -> Self {
        let (bus, _) = broadcast::channel(1024);
        Self {
            store: CatalogStore::new(wine_registry),
            selected_native: None,
            selected_wine: None,
            bus,
            running: Arc::new(AtomicBool::new(false)),
            current: None,
        }
    }

    /// 订阅进度与结果事件；订阅之前发出的事件不会补发
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.bus.subscribe()
    }

    // ===== 目录 =====

    /// 重新查询原生套件目录；失败时目录保持不变，错误交由调用方告警
    pub fn refresh_native(&mut self) -> Result<&[String]> {
        self.store.refresh_native()
    }

    pub fn native_packages(&self) -> &[String] {
        self.store.native()
    }

    /// 套件详情文本；套件不存在或查询失败时返回"无法取得资讯"占位文案
    pub fn native_info(&self, name: &str, lang: &str) -> String {
        catalog::query_native_info(name)
            .unwrap_or_else(|| i18n::tr(lang, "info_unavailable").to_string())
    }

    /// Wine 应用列表：(id, 按语言解析的显示名)，顺序与注册表一致
    pub fn wine_apps(&self, lang: &str) -> Vec<(String, String)> {
        self.store
            .wine()
            .iter()
            .map(|a| (a.id.clone(), a.display_name(lang).to_string()))
            .collect()
    }

    /// Wine 应用的本地化描述
    pub fn wine_info(&self, id: &str, lang: &str) -> Option<String> {
        self.store.wine_app(id).map(|a| a.description(lang).to_string())
    }

    pub fn wine_app(&self, id: &str) -> Option<&WineApp> {
        self.store.wine_app(id)
    }

    /// 运行条目的检测命令探测安装状态
    pub fn wine_installed(&self, id: &str) -> Option<bool> {
        self.store.wine_installed(id)
    }

    // ===== 选中与调度 =====

    /// 记录当前选中条目；不校验条目是否仍然存在，调度时再解析
    pub fn select(&mut self, catalog: Catalog, id: impl Into<String>) {
        match catalog {
            Catalog::Native => self.selected_native = Some(id.into()),
            Catalog::Wine => self.selected_wine = Some(id.into()),
        }
    }

    pub fn selected(&self, catalog: Catalog) -> Option<&str> {
        match catalog {
            Catalog::Native => self.selected_native.as_deref(),
            Catalog::Wine => self.selected_wine.as_deref(),
        }
    }

    /// 把 (目录, 动作, 选中条目) 解析为具体命令字符串，不执行
    pub fn dispatch(&self, catalog: Catalog, action: Action) -> Result<String, DispatchError> {
        match catalog {
            Catalog::Native => {
                let name = self
                    .selected_native
                    .as_deref()
                    .ok_or(DispatchError::NoSelection)?;
                Ok(match action {
                    Action::Install => format!("sudo pkg install -y {name}"),
                    Action::Uninstall => format!("sudo pkg remove -y {name}"),
                })
            }
            Catalog::Wine => {
                let id = self
                    .selected_wine
                    .as_deref()
                    .ok_or(DispatchError::NoSelection)?;
                match action {
                    // 注册表没有为 Wine 应用定义卸载命令
                    Action::Uninstall => Err(DispatchError::UnsupportedAction),
                    Action::Install => self
                        .store
                        .wine_app(id)
                        .map(|a| a.install_cmd.clone())
                        // 选中的 id 已不在注册表中（防御性处理）
                        .ok_or(DispatchError::NoSelection),
                }
            }
        }
    }

    // ===== 执行 =====

    /// 启动一次命令执行；同一时间只允许一个操作在运行
    pub fn execute(&mut self, command: String) -> Result<Arc<Operation>, BusyError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(BusyError);
        }
        let op = Arc::new(Operation::new(command));
        self.current = Some(op.clone());
        runner::spawn_operation(op.clone(), self.bus.clone(), self.running.clone());
        Ok(op)
    }

    pub fn is_busy(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// 最近一次（可能仍在运行的）操作记录
    pub fn last_operation(&self) -> Option<&Arc<Operation>> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_engine() -> Engine {
        Engine::new(registry::builtin())
    }

    /// 收取事件直到 Finished，返回 (输出行, 是否成功, 结果消息)
    fn drain_until_finished(
        rx: &mut broadcast::Receiver<EngineEvent>,
    ) -> (Vec<String>, bool, String) {
        let mut lines = Vec::new();
        loop {
            match rx.blocking_recv() {
                Ok(EngineEvent::OutputLine(line)) => lines.push(line),
                Ok(EngineEvent::Finished { success, message }) => {
                    return (lines, success, message)
                }
                Err(e) => panic!("总线提前关闭: {e}"),
            }
        }
    }

    #[test]
    fn test_dispatch_without_selection_fails() {
        let engine = test_engine();
        assert_eq!(
            engine.dispatch(Catalog::Native, Action::Install),
            Err(DispatchError::NoSelection)
        );
        assert_eq!(
            engine.dispatch(Catalog::Wine, Action::Install),
            Err(DispatchError::NoSelection)
        );
        assert_eq!(
            engine.dispatch(Catalog::Wine, Action::Uninstall),
            Err(DispatchError::NoSelection)
        );
    }

    #[test]
    fn test_dispatch_native_resolves_pkg_commands() {
        let mut engine = test_engine();
        engine.select(Catalog::Native, "vim");
        assert_eq!(
            engine.dispatch(Catalog::Native, Action::Install).unwrap(),
            "sudo pkg install -y vim"
        );
        assert_eq!(
            engine.dispatch(Catalog::Native, Action::Uninstall).unwrap(),
            "sudo pkg remove -y vim"
        );
    }

    #[test]
    fn test_dispatch_wine_install_uses_registered_command() {
        let mut engine = test_engine();
        engine.select(Catalog::Wine, "LINE");
        assert_eq!(
            engine.dispatch(Catalog::Wine, Action::Install).unwrap(),
            "wine ~/Downloads/LineInst.exe"
        );
    }

    #[test]
    fn test_dispatch_wine_uninstall_unsupported() {
        let mut engine = test_engine();
        engine.select(Catalog::Wine, "LINE");
        assert_eq!(
            engine.dispatch(Catalog::Wine, Action::Uninstall),
            Err(DispatchError::UnsupportedAction)
        );
    }

    #[test]
    fn test_selection_replaced_by_new_select() {
        let mut engine = test_engine();
        engine.select(Catalog::Native, "bash");
        engine.select(Catalog::Native, "curl");
        assert_eq!(engine.selected(Catalog::Native), Some("curl"));
        assert_eq!(engine.selected(Catalog::Wine), None);
    }

    #[test]
    fn test_execute_streams_lines_in_order_then_finishes() {
        let mut engine = test_engine();
        let mut rx = engine.subscribe();
        let op = engine
            .execute("printf 'one\\ntwo\\nthree\\n'".to_string())
            .unwrap();
        let (lines, success, message) = drain_until_finished(&mut rx);
        assert_eq!(lines, vec!["one", "two", "three"]);
        assert!(success);
        assert_eq!(message, "operation succeeded");
        // 操作记录与总线事件一致，且已封口
        assert_eq!(op.lines(), lines);
        assert!(op.is_finished());
        assert!(op.outcome().unwrap().success);
        let last = engine.last_operation().unwrap();
        assert_eq!(last.command(), "printf 'one\\ntwo\\nthree\\n'");
        assert!(last.is_finished());
        // 结束事件只投递一次，之后总线静默
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn test_execute_failure_reports_stderr_text() {
        let mut engine = test_engine();
        let mut rx = engine.subscribe();
        engine
            .execute("printf 'package not found' >&2; exit 1".to_string())
            .unwrap();
        let (lines, success, message) = drain_until_finished(&mut rx);
        assert!(lines.is_empty());
        assert!(!success);
        assert_eq!(message, "package not found");
    }

    #[test]
    fn test_busy_until_terminal_then_ready_again() {
        let mut engine = test_engine();
        let mut rx = engine.subscribe();
        engine.execute("sleep 1".to_string()).unwrap();
        assert!(engine.is_busy());
        assert_eq!(engine.execute("true".to_string()).unwrap_err(), BusyError);
        let (_, success, _) = drain_until_finished(&mut rx);
        assert!(success);
        assert!(!engine.is_busy());
        engine.execute("true".to_string()).unwrap();
        let (_, success, _) = drain_until_finished(&mut rx);
        assert!(success);
    }

    #[test]
    fn test_native_info_falls_back_to_sentinel() {
        let engine = test_engine();
        let text = engine.native_info("not-a-real-package-xyz", "en_US");
        assert_eq!(text, crate::i18n::tr("en_US", "info_unavailable"));
    }

    #[test]
    fn test_wine_installed_probe_availability() {
        let engine = test_engine();
        // 内置条目定义了检测命令，探测必然得到结果；未知 id 没有
        assert!(engine.wine_installed("LINE").is_some());
        assert!(engine.wine_installed("nope").is_none());
    }

    #[test]
    fn test_wine_apps_localized_listing() {
        let engine = test_engine();
        let zh: Vec<String> = engine.wine_apps("zh_TW").into_iter().map(|(_, n)| n).collect();
        let en: Vec<String> = engine.wine_apps("en_US").into_iter().map(|(_, n)| n).collect();
        assert!(zh.contains(&"植物大戰殭屍".to_string()));
        assert!(en.contains(&"Plants vs Zombies".to_string()));
    }
}
