use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use super::theme::Theme;

/// 标准布局：Header(3) + Content(弹性) + Log(8) + Footer(3)
pub fn main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(8),
            Constraint::Length(3),
        ])
        .split(area)
        .to_vec()
}

/// 内容区左右分栏：列表 + 详情
pub fn split_content(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area)
        .to_vec()
}

/// 渲染通用 header
pub fn render_header(f: &mut Frame, title: &str, theme: &Theme, area: Rect) {
    let header = Paragraph::new(title)
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// 渲染通用 footer
pub fn render_footer(f: &mut Frame, text: &str, theme: &Theme, area: Rect) {
    let footer = Paragraph::new(format!(" {}", text))
        .style(Style::default().fg(theme.fg))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)))
        .alignment(Alignment::Left);
    f.render_widget(footer, area);
}

/// 渲染可滚动的带边框列表，当前行高亮，滚动跟随光标
pub fn render_list(
    f: &mut Frame,
    title: &str,
    items: &[String],
    cursor: usize,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = inner.height as usize;
    let offset = cursor.saturating_sub(visible.saturating_sub(1));
    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, item)| {
            let style = if i == cursor {
                Style::default()
                    .fg(theme.sel_fg)
                    .bg(theme.sel_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg)
            };
            Line::styled(format!(" {item}"), style)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

/// 渲染带滚动条的文本内容区域
pub fn render_scrollable_content(
    f: &mut Frame,
    title: &str,
    lines: &[String],
    scroll_offset: usize,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let padded = inner.inner(Margin {
        horizontal: 1,
        vertical: 0,
    });

    let total_lines = lines.len();
    let visible_height = padded.height as usize;
    let max_scroll = total_lines.saturating_sub(visible_height);
    let actual_scroll = scroll_offset.min(max_scroll);

    let visible_content: Vec<Line> = lines
        .iter()
        .skip(actual_scroll)
        .take(visible_height)
        .map(|line| Line::styled(line.clone(), Style::default().fg(theme.fg)))
        .collect();

    let paragraph = Paragraph::new(visible_content).wrap(Wrap { trim: false });
    f.render_widget(paragraph, padded);

    if total_lines > visible_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state = ScrollbarState::new(total_lines).position(actual_scroll);
        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                horizontal: 0,
                vertical: 1,
            }),
            &mut scrollbar_state,
        );
    }
}
