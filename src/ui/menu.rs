use crate::models::Section;
use crate::progress::ProgressTracker;
use crate::ui::layout::calculate_menu_chunks;
use crate::utils::pad_to_width;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Header shared by the menu and exercise screens: app name plus the
/// completed/total section count.
pub fn progress_line(progress: &ProgressTracker) -> Line<'static> {
    let (done, total) = progress.completion_fraction();
    Line::from(vec![
        Span::styled(
            "Grammar Garden",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from("   "),
        Span::styled(
            format!("★ {}/{}", done, total),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

pub fn draw_menu(f: &mut Frame, progress: &ProgressTracker, selected_index: usize) {
    let layout = calculate_menu_chunks(f.area());

    let title = Paragraph::new(progress_line(progress))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let items: Vec<ListItem> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let done = progress.is_complete(*section);
            let style = if i == selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut spans = vec![
                Span::styled(
                    format!("{}. {} ", i + 1, pad_to_width(section.label(), 12, ' ')),
                    style,
                ),
                Span::styled(section.title(), style.add_modifier(Modifier::DIM)),
            ];
            if done {
                spans.push(Span::styled(
                    "  ✓",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Sections"),
    );
    f.render_widget(list, layout.list_area);

    let help_text = vec![Line::from(vec![
        Span::styled("↑/↓", key_style()),
        Span::from(" Navigate  "),
        Span::styled("Enter/1-7", key_style()),
        Span::from(" Open  "),
        Span::styled("q/Esc", key_style()),
        Span::from(" Quit  "),
        Span::styled("Ctrl+C", key_style()),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame, progress: &ProgressTracker) {
    let layout = calculate_menu_chunks(f.area());

    let title = Paragraph::new("Leave Grammar Garden")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let (done, total) = progress.completion_fraction();
    let message = Paragraph::new(vec![
        Line::from(""),
        Line::from(format!("You finished {} of {} sections.", done, total)),
        Line::from("Progress is not saved. Quit anyway?"),
    ])
    .style(Style::default().fg(Color::White))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, layout.list_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Quit)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Keep Playing)"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
