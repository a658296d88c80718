use crate::celebration::{Celebration, Particle};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const PALETTE: [Color; 5] = [
    Color::Magenta,
    Color::LightGreen,
    Color::LightBlue,
    Color::Yellow,
    Color::LightMagenta,
];

fn glyph(particle: &Particle) -> &'static str {
    match particle.angle / 90 {
        0 => "■",
        1 => "◆",
        2 => "▲",
        _ => "●",
    }
}

/// Maps a particle to a cell inside `area`, or `None` while it is still
/// above the top edge.
fn cell_position(particle: &Particle, area: Rect) -> Option<(u16, u16)> {
    if particle.y < 0.0 || particle.y >= 1.0 || area.width == 0 || area.height == 0 {
        return None;
    }
    let x = area.x + ((particle.x * area.width as f32) as u16).min(area.width - 1);
    let y = area.y + ((particle.y * area.height as f32) as u16).min(area.height - 1);
    Some((x, y))
}

/// Paints confetti over whatever is already drawn, plus a small banner.
pub fn draw_celebration(f: &mut Frame, celebration: &Celebration) {
    if !celebration.is_active() {
        return;
    }
    let area = f.area();

    let buffer = f.buffer_mut();
    for particle in celebration.particles() {
        if let Some(position) = cell_position(particle, area)
            && let Some(cell) = buffer.cell_mut(position)
        {
            cell.set_symbol(glyph(particle))
                .set_fg(PALETTE[particle.color % PALETTE.len()]);
        }
    }

    let width = 30.min(area.width);
    let height = 3.min(area.height);
    let banner_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );
    let banner = Paragraph::new("🎉 Section complete! 🎉")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightMagenta)),
        );
    f.render_widget(Clear, banner_area);
    f.render_widget(banner, banner_area);
}
