//! TUI 入口与主循环
//!
//! 主循环是协调线程：目录与选中状态只在这里变更；
//! 命令执行的进度与结果通过引擎总线订阅获得。

mod layout;
mod packages;
pub mod state;
mod theme;
mod wine;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::engine::{registry, Catalog, Engine, EngineEvent};
use crate::i18n::tr;
use state::{App, AppEvent, Tab};

pub async fn run(config: Config) -> Result<()> {
    // 终端初始化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 注册表合并一次后只读，随后填充原生目录
    let wine_registry = registry::build_registry(config.wine_apps.clone());
    let mut engine = Engine::new(wine_registry);
    let startup_warning = engine.refresh_native().err().map(|e| format!("⚠ {e:#}"));

    let mut bus_rx = engine.subscribe();
    let mut app = App::new(config, engine);
    if let Some(warning) = startup_warning {
        app.push_log(warning);
    }

    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    // 主循环
    loop {
        terminal.draw(|f| ui(f, &app))?;

        // 处理按键
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, &mut app, &tx);
            }
        }

        // 界面内部异步事件
        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::WineStatusProbed { id, installed } => {
                    if app.probing.as_deref() == Some(id.as_str()) {
                        app.probing = None;
                    }
                    app.wine_status.insert(id, installed);
                }
            }
        }

        // 引擎总线事件
        loop {
            match bus_rx.try_recv() {
                Ok(EngineEvent::OutputLine(line)) => app.push_log(line),
                Ok(EngineEvent::Finished { success, message }) => {
                    handle_finished(&mut app, &tx, success, message);
                }
                Err(TryRecvError::Lagged(n)) => {
                    log::warn!("事件总线落后 {n} 条");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        if app.should_quit {
            break;
        }
    }

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn handle_key(key: KeyEvent, app: &mut App, tx: &mpsc::Sender<AppEvent>) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Tab => {
            app.tab = match app.tab {
                Tab::Packages => Tab::Wine,
                Tab::Wine => Tab::Packages,
            };
            app.status_message = None;
        }
        KeyCode::Char('l') => {
            app.toggle_language();
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
        }
        KeyCode::PageUp => {
            app.log_scroll = app.log_scroll.saturating_sub(5);
        }
        KeyCode::PageDown => {
            let max = app.log_lines.len().saturating_sub(1);
            app.log_scroll = (app.log_scroll + 5).min(max);
        }
        _ => {
            match app.tab {
                Tab::Packages => {
                    packages::handle_packages_key(key, app);
                }
                Tab::Wine => {
                    wine::handle_wine_key(key, app, tx);
                }
            };
        }
    }
}

/// 操作结束：写入结果行，并按操作面向的目录刷新显示状态
fn handle_finished(app: &mut App, tx: &mpsc::Sender<AppEvent>, success: bool, message: String) {
    if success {
        app.push_log("─── 操作成功 ───".to_string());
    } else {
        for line in message.lines() {
            if !line.trim().is_empty() {
                app.push_log(format!("⚠ {line}"));
            }
        }
        app.push_log("─── 操作失敗 ───".to_string());
    }
    app.status_message = Some(message);

    match app.active_catalog.take() {
        Some(Catalog::Native) => {
            // 安装/移除之后重新查询目录，失败时目录保持不变
            if let Err(e) = app.engine.refresh_native() {
                app.push_log(format!("⚠ {e:#}"));
            }
            let max = app.engine.native_packages().len().saturating_sub(1);
            app.pkg_cursor = app.pkg_cursor.min(max);
        }
        Some(Catalog::Wine) => {
            if let Some(id) = app.engine.selected(Catalog::Wine).map(|s| s.to_string()) {
                wine::spawn_status_probe(app, tx, id);
            }
        }
        None => {}
    }
}

fn ui(f: &mut Frame, app: &App) {
    let theme = theme::current(app.config.dark_mode);
    let zones = layout::main_layout(f.area());
    let lang = app.lang();

    // 标题栏同时充当分页指示
    let pkg_tab = tr(lang, "pkg_apps");
    let wine_tab = tr(lang, "wine_apps");
    let title = match app.tab {
        Tab::Packages => format!("{} | [{pkg_tab}]  {wine_tab}", tr(lang, "title")),
        Tab::Wine => format!("{} | {pkg_tab}  [{wine_tab}]", tr(lang, "title")),
    };
    layout::render_header(f, &title, &theme, zones[0]);

    match app.tab {
        Tab::Packages => packages::render_packages(f, app, &theme, zones[1]),
        Tab::Wine => wine::render_wine(f, app, &theme, zones[1]),
    }

    layout::render_scrollable_content(
        f,
        tr(lang, "install_log"),
        &app.log_lines,
        app.log_scroll,
        &theme,
        zones[2],
    );

    let footer = if app.engine.is_busy() {
        tr(lang, "running").to_string()
    } else {
        match &app.status_message {
            Some(message) => message.clone(),
            None => format!(
                "Tab  ↑↓  Enter  i {}  u {}  r {}  l {}  t {}  q {}",
                tr(lang, "install"),
                tr(lang, "uninstall"),
                tr(lang, "refresh"),
                tr(lang, "language"),
                tr(lang, "theme"),
                tr(lang, "quit"),
            ),
        }
    };
    layout::render_footer(f, &footer, &theme, zones[3]);
}
