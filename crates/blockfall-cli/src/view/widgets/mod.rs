use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, piece_display::*,
    session_display::*, session_stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod piece_display;
mod session_display;
mod session_stats_display;

mod color {
    use ratatui::style::Color;

    pub const CORAL: Color = Color::Rgb(0xFF, 0x6B, 0x6B);
    pub const TEAL: Color = Color::Rgb(0x4E, 0xCD, 0xC4);
    pub const SKY_BLUE: Color = Color::Rgb(0x45, 0xB7, 0xD1);
    pub const SUNFLOWER: Color = Color::Rgb(0xF9, 0xCA, 0x24);
    pub const PURPLE: Color = Color::Rgb(0x6C, 0x5C, 0xE7);
    pub const LAVENDER: Color = Color::Rgb(0xA2, 0x9B, 0xFE);
    pub const PINK: Color = Color::Rgb(0xFD, 0x79, 0xA8);

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(51, 51, 51);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);

    pub const I_BLOCK: Style = bg_only(color::CORAL);
    pub const O_BLOCK: Style = bg_only(color::TEAL);
    pub const T_BLOCK: Style = bg_only(color::SKY_BLUE);
    pub const S_BLOCK: Style = bg_only(color::SUNFLOWER);
    pub const Z_BLOCK: Style = bg_only(color::PURPLE);
    pub const J_BLOCK: Style = bg_only(color::LAVENDER);
    pub const L_BLOCK: Style = bg_only(color::PINK);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

/// Converts a cell count to terminal units, saturating on overflow.
fn cells_to_u16(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Formats a score with comma thousands separators (`12,345`).
fn format_score(score: usize) -> String {
    let digits = score.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
