//! 主题色定义：深色与浅色两套

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub sel_bg: Color,
    pub sel_fg: Color,
    pub ok: Color,
    pub warn: Color,
    pub err: Color,
}

pub const DARK: Theme = Theme {
    fg: Color::Rgb(230, 230, 230),
    dim: Color::Rgb(130, 130, 140),
    accent: Color::Cyan,
    border: Color::Rgb(85, 85, 85),
    sel_bg: Color::Rgb(61, 61, 61),
    sel_fg: Color::Rgb(255, 255, 255),
    ok: Color::Green,
    warn: Color::Yellow,
    err: Color::Red,
};

pub const LIGHT: Theme = Theme {
    fg: Color::Rgb(30, 30, 30),
    dim: Color::Rgb(110, 110, 110),
    accent: Color::Blue,
    border: Color::Rgb(160, 160, 160),
    sel_bg: Color::Rgb(210, 220, 235),
    sel_fg: Color::Rgb(0, 0, 0),
    ok: Color::Green,
    warn: Color::Rgb(160, 120, 0),
    err: Color::Red,
};

pub fn current(dark_mode: bool) -> Theme {
    if dark_mode {
        DARK
    } else {
        LIGHT
    }
}
