//! Wine 分页：应用列表、本地化描述与安装状态显示
//!
//! 安装状态来自各条目的检测命令，在后台探测，不阻塞界面。

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use super::layout;
use super::state::{App, AppEvent};
use super::theme::Theme;
use crate::engine::{catalog, Action, Catalog};
use crate::i18n::tr;

/// 处理 Wine 分页按键，返回 true 表示已消费该按键
pub fn handle_wine_key(key: KeyEvent, app: &mut App, tx: &mpsc::Sender<AppEvent>) -> bool {
    match key.code {
        KeyCode::Up => {
            app.wine_cursor = app.wine_cursor.saturating_sub(1);
            true
        }
        KeyCode::Down => {
            let max = app.engine.wine_apps(app.lang()).len().saturating_sub(1);
            if app.wine_cursor < max {
                app.wine_cursor += 1;
            }
            true
        }
        KeyCode::Enter => {
            select_under_cursor(app, tx);
            true
        }
        KeyCode::Char('i') => {
            app.start_action(Catalog::Wine, Action::Install);
            true
        }
        KeyCode::Char('u') => {
            // 注册表没有卸载命令，引擎会回报 UnsupportedAction
            app.start_action(Catalog::Wine, Action::Uninstall);
            true
        }
        _ => false,
    }
}

/// 选中光标下的应用，加载描述并启动安装状态探测
fn select_under_cursor(app: &mut App, tx: &mpsc::Sender<AppEvent>) {
    let Some((id, _)) = app.engine.wine_apps(app.lang()).into_iter().nth(app.wine_cursor)
    else {
        return;
    };
    app.engine.select(Catalog::Wine, id.clone());
    app.wine_info = app.engine.wine_info(&id, &app.config.language);
    spawn_status_probe(app, tx, id);
}

/// 在后台运行检测命令，结果通过 AppEvent 送回协调线程
pub fn spawn_status_probe(app: &mut App, tx: &mpsc::Sender<AppEvent>, id: String) {
    let Some(check_cmd) = app.engine.wine_app(&id).map(|a| a.check_cmd.clone()) else {
        return;
    };
    if check_cmd.is_empty() {
        return;
    }
    app.probing = Some(id.clone());
    let tx = tx.clone();
    tokio::spawn(async move {
        let installed =
            tokio::task::spawn_blocking(move || catalog::run_check_command(&check_cmd))
                .await
                .unwrap_or(false);
        let _ = tx.send(AppEvent::WineStatusProbed { id, installed }).await;
    });
}

pub fn render_wine(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let panes = layout::split_content(area);
    let names: Vec<String> = app
        .engine
        .wine_apps(app.lang())
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    layout::render_list(
        f,
        tr(app.lang(), "wine_apps"),
        &names,
        app.wine_cursor,
        theme,
        panes[0],
    );
    render_wine_info(f, app, theme, panes[1]);
}

fn render_wine_info(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let lang = app.lang();
    let mut lines: Vec<Line> = Vec::new();

    if let Some(id) = app.engine.selected(Catalog::Wine) {
        let name = app
            .engine
            .wine_app(id)
            .map(|a| a.display_name(lang).to_string())
            .unwrap_or_else(|| id.to_string());
        lines.push(Line::styled(
            name,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::from(""));
        if let Some(desc) = &app.wine_info {
            lines.push(Line::styled(desc.clone(), Style::default().fg(theme.fg)));
            lines.push(Line::from(""));
        }

        // 安装状态行：探测中 / 已安装 / 未安装 / 未知（无检测命令）
        let (text, color) = if app.probing.as_deref() == Some(id) {
            (tr(lang, "checking"), theme.dim)
        } else {
            match app.wine_status.get(id) {
                Some(true) => (tr(lang, "installed"), theme.ok),
                Some(false) => (tr(lang, "not_installed"), theme.warn),
                None => ("-", theme.dim),
            }
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", tr(lang, "status")),
                Style::default().fg(theme.dim),
            ),
            Span::styled(text, Style::default().fg(color)),
        ]));
    } else {
        lines.push(Line::styled(
            tr(lang, "wine_support"),
            Style::default().fg(theme.dim),
        ));
    }

    let info = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(format!(" {} ", tr(lang, "wine_support")))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(info, area);
}
