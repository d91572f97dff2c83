//! PKG 分页：原生套件列表、详情面板与安装/移除动作

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::layout;
use super::state::App;
use super::theme::Theme;
use crate::engine::{Action, Catalog};
use crate::i18n::tr;

/// 处理 PKG 分页按键，返回 true 表示已消费该按键
pub fn handle_packages_key(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Up => {
            app.pkg_cursor = app.pkg_cursor.saturating_sub(1);
            true
        }
        KeyCode::Down => {
            let max = app.engine.native_packages().len().saturating_sub(1);
            if app.pkg_cursor < max {
                app.pkg_cursor += 1;
            }
            true
        }
        KeyCode::Enter => {
            select_under_cursor(app);
            true
        }
        KeyCode::Char('i') => {
            app.start_action(Catalog::Native, Action::Install);
            true
        }
        KeyCode::Char('u') => {
            app.start_action(Catalog::Native, Action::Uninstall);
            true
        }
        KeyCode::Char('r') => {
            refresh_catalog(app);
            true
        }
        _ => false,
    }
}

/// 选中光标下的套件并加载详情
fn select_under_cursor(app: &mut App) {
    let Some(name) = app.engine.native_packages().get(app.pkg_cursor).cloned() else {
        return;
    };
    app.engine.select(Catalog::Native, name.clone());
    app.pkg_info = Some(app.engine.native_info(&name, &app.config.language));
}

/// 重建目录；失败时目录保持不变，告警写入日志面板
fn refresh_catalog(app: &mut App) {
    match app.engine.refresh_native() {
        Ok(_) => {
            let count = app.engine.native_packages().len();
            app.status_message = Some(format!("{} ({count})", tr(app.lang(), "refresh")));
        }
        Err(e) => {
            app.push_log(format!("⚠ {e:#}"));
        }
    }
    let max = app.engine.native_packages().len().saturating_sub(1);
    app.pkg_cursor = app.pkg_cursor.min(max);
}

pub fn render_packages(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let panes = layout::split_content(area);
    render_pkg_list(f, app, theme, panes[0]);
    render_pkg_info(f, app, theme, panes[1]);
}

fn render_pkg_list(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let packages = app.engine.native_packages();
    if packages.is_empty() {
        let hint = Paragraph::new(tr(app.lang(), "empty_catalog"))
            .style(Style::default().fg(theme.dim))
            .block(
                Block::default()
                    .title(format!(" {} ", tr(app.lang(), "pkg_apps")))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            );
        f.render_widget(hint, area);
        return;
    }
    layout::render_list(
        f,
        tr(app.lang(), "pkg_apps"),
        packages,
        app.pkg_cursor,
        theme,
        area,
    );
}

fn render_pkg_info(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let title = app
        .engine
        .selected(Catalog::Native)
        .unwrap_or_else(|| tr(app.lang(), "status"));
    let text = app.pkg_info.as_deref().unwrap_or_default();
    let info = Paragraph::new(text)
        .style(Style::default().fg(theme.fg))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
    f.render_widget(info, area);
}
