use crate::models::{
    BlankKey, BlankKind, BlankStatus, ChoiceHint, Question, Speaker, VerbForm,
};
use crate::progress::ProgressTracker;
use crate::session::ExerciseSession;
use crate::ui::layout::calculate_exercise_chunks;
use crate::ui::menu::progress_line;
use crate::ui::section_color;
use crate::utils::{byte_index, pad_to_width};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BLANK_WIDTH: usize = 10;
const HINT_WIDTH: usize = 12;
/// Bracketed blank plus its two-column status marker.
const CELL_WIDTH: usize = BLANK_WIDTH + 4;

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn status_style(status: BlankStatus) -> Style {
    match status {
        BlankStatus::Neutral => Style::default().fg(Color::White),
        BlankStatus::Correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        BlankStatus::Incorrect => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn status_marker(status: BlankStatus) -> Span<'static> {
    match status {
        BlankStatus::Neutral => Span::from("  "),
        BlankStatus::Correct => Span::styled(" ✓", status_style(status)),
        BlankStatus::Incorrect => Span::styled(" ✗", status_style(status)),
    }
}

/// Renders one blank: `[answer____]` followed by its status marker. The
/// focused blank gets cyan brackets and, for text blanks, a block cursor.
fn blank_spans(session: &ExerciseSession, key: BlankKey) -> Vec<Span<'static>> {
    let controller = &session.controller;
    let status = controller.status(key);
    let style = status_style(status);
    let text = controller.answer(key);
    let focused = session.focused_key() == Some(key);
    let bracket = if focused {
        key_style()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::from(" "), Span::styled("[", bracket)];
    match (focused, controller.kind(key)) {
        (true, Some(BlankKind::Text)) => {
            let cursor = byte_index(text, session.cursor);
            let (before, rest) = text.split_at(cursor);
            let mut rest_chars = rest.chars();
            let at = rest_chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
            let after: String = rest_chars.collect();
            let used = before.chars().count() + 1 + after.chars().count();

            spans.push(Span::styled(before.to_string(), style));
            spans.push(Span::styled(at, style.add_modifier(Modifier::REVERSED)));
            spans.push(Span::styled(after, style));
            spans.push(Span::styled(
                "_".repeat(BLANK_WIDTH.saturating_sub(used)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        (true, _) => {
            let shown = if text.is_empty() { "?" } else { text };
            spans.push(Span::styled(
                pad_to_width(&format!("◀ {} ▶", shown), BLANK_WIDTH, ' '),
                style.add_modifier(Modifier::UNDERLINED),
            ));
        }
        (false, _) => {
            spans.push(Span::styled(pad_to_width(text, BLANK_WIDTH, '_'), style));
        }
    }
    spans.push(Span::styled("]", bracket));
    spans.push(status_marker(status));
    spans
}

/// Shows the expected answer next to a blank marked wrong. The verb
/// table only marks the cell, so its columns stay aligned.
fn reveal_span(session: &ExerciseSession, key: BlankKey) -> Option<Span<'static>> {
    if session.controller.status(key) != BlankStatus::Incorrect {
        return None;
    }
    let expected = &session.controller.blank(key)?.expected;
    Some(Span::styled(
        format!("→ {} ", expected),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::ITALIC),
    ))
}

fn verb_header() -> Line<'static> {
    let dim = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::styled(pad_to_width("Meaning", HINT_WIDTH, ' '), dim)];
    for form in VerbForm::ALL {
        spans.push(Span::styled(
            format!(" {}", pad_to_width(form.label(), CELL_WIDTH, ' ')),
            dim,
        ));
    }
    Line::from(spans)
}

fn question_line(session: &ExerciseSession, index: usize, question: &Question) -> Line<'static> {
    let id = question.id();
    let number = Span::styled(
        format!("{:>2}. ", index + 1),
        Style::default().fg(Color::DarkGray),
    );

    let spans = match question {
        Question::Verb(row) => {
            let mut spans = vec![Span::styled(
                pad_to_width(&row.display_hint, HINT_WIDTH, ' '),
                Style::default().fg(Color::Gray),
            )];
            for form in VerbForm::ALL {
                if row.is_hidden(form) {
                    spans.extend(blank_spans(session, BlankKey::new(id, form.index())));
                } else {
                    spans.push(Span::styled(
                        format!(" {}", pad_to_width(row.form(form), CELL_WIDTH, ' ')),
                        Style::default()
                            .fg(Color::LightMagenta)
                            .add_modifier(Modifier::BOLD),
                    ));
                }
            }
            spans
        }
        Question::Vocabulary(q) => {
            let mut spans = vec![number, Span::from(q.sentence_part1.clone())];
            let key = BlankKey::new(id, 0);
            spans.extend(blank_spans(session, key));
            spans.extend(reveal_span(session, key));
            spans.push(Span::from(format!(" {}", q.sentence_part2)));
            spans
        }
        Question::Choice(q) => {
            let mut spans = vec![number];
            if let Some(hint) = q.hint {
                let color = match hint {
                    ChoiceHint::Check => Color::Green,
                    ChoiceHint::Cross => Color::Red,
                };
                spans.push(Span::styled(
                    format!("{} ", hint.symbol()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
            }
            let (before, after) = q.prompt_parts();
            spans.push(Span::from(before.to_string()));
            let key = BlankKey::new(id, 0);
            spans.extend(blank_spans(session, key));
            spans.extend(reveal_span(session, key));
            spans.push(Span::from(after.to_string()));
            spans
        }
        Question::TextFill(q) => {
            let mut spans = vec![number];
            interleave(session, id, &q.parts, |_| None, &mut spans);
            spans
        }
        Question::Dialogue(line) => {
            let color = match line.speaker {
                Speaker::Alice => Color::LightMagenta,
                Speaker::Grandpa => Color::LightBlue,
            };
            let mut spans = vec![Span::styled(
                format!("{:>8}: ", line.speaker.name()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )];
            interleave(
                session,
                id,
                &line.text_parts,
                |idx| line.hints.get(idx).cloned(),
                &mut spans,
            );
            spans
        }
    };
    Line::from(spans)
}

/// Text segments with a blank between each pair. Blank `i` sits after
/// segment `i`.
fn interleave(
    session: &ExerciseSession,
    id: u32,
    parts: &[String],
    hint: impl Fn(usize) -> Option<String>,
    spans: &mut Vec<Span<'static>>,
) {
    for (idx, part) in parts.iter().enumerate() {
        spans.push(Span::from(part.clone()));
        if idx + 1 == parts.len() {
            break;
        }
        let key = BlankKey::new(id, idx);
        spans.extend(blank_spans(session, key));
        if let Some(hint) = hint(idx) {
            spans.push(Span::styled(
                format!("({}) ", hint),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(reveal) = reveal_span(session, key) {
            spans.push(reveal);
        }
    }
}

/// Body lines plus the index of the line holding the focused blank.
fn body_lines(session: &ExerciseSession) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let focused_id = session.focused_key().map(|key| key.question_id);
    let mut focused_line = 0;

    let questions = session.controller.questions();
    if matches!(questions.first(), Some(Question::Verb(_))) {
        lines.push(verb_header());
        lines.push(Line::from(""));
    }
    for (index, question) in questions.iter().enumerate() {
        if Some(question.id()) == focused_id {
            focused_line = lines.len();
        }
        lines.push(question_line(session, index, question));
        lines.push(Line::from(""));
    }
    if questions.is_empty() {
        lines.push(Line::from(Span::styled(
            "No questions in this section.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    (lines, focused_line)
}

pub fn draw_exercise(f: &mut Frame, session: &mut ExerciseSession, progress: &ProgressTracker) {
    let layout = calculate_exercise_chunks(f.area());
    let section = session.controller.section();
    let color = section_color(section);

    let mut header_spans = vec![
        Span::styled(
            section.title(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(
            "   Score {}/{}",
            session.controller.score(),
            session.controller.total()
        )),
    ];
    if session.controller.is_completed() {
        header_spans.push(Span::styled(
            "   ★ Perfect!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(progress_line(progress)),
        );
    f.render_widget(header, layout.header_area);

    let mut instruction = vec![Line::from(section.instruction())];
    let options = session.controller.options();
    if options.is_empty() {
        instruction.push(Line::from(Span::styled(
            "Capitals and spaces don't matter.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let mut spans = Vec::new();
        for (i, option) in options.iter().enumerate() {
            spans.push(Span::styled(format!("{} ", i + 1), key_style()));
            spans.push(Span::from(format!("{}  ", option)));
        }
        instruction.push(Line::from(spans));
    }
    let instruction = Paragraph::new(instruction)
        .block(Block::default().borders(Borders::ALL).title("How to play"));
    f.render_widget(instruction, layout.instruction_area);

    let (lines, focused_line) = body_lines(session);

    // Keep the focused question inside the visible window.
    let visible_height = layout.body_area.height.saturating_sub(2) as usize;
    let mut scroll = session.scroll_y as usize;
    if focused_line < scroll {
        scroll = focused_line;
    } else if visible_height > 0 && focused_line >= scroll + visible_height {
        scroll = focused_line + 1 - visible_height;
    }
    session.scroll_y = scroll as u16;

    let body = Paragraph::new(lines)
        .scroll((session.scroll_y, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(body, layout.body_area);

    let choosing = session
        .focused_key()
        .and_then(|key| session.controller.kind(key))
        == Some(BlankKind::Choice);
    let mut first = vec![
        Span::styled("Tab/↓", key_style()),
        Span::from(" Next  "),
        Span::styled("Shift+Tab/↑", key_style()),
        Span::from(" Previous  "),
    ];
    if choosing {
        first.extend([
            Span::styled("←/→ or 1-9", key_style()),
            Span::from(" Choose"),
        ]);
    } else {
        first.extend([
            Span::styled("←/→", key_style()),
            Span::from(" Move Cursor"),
        ]);
    }
    let help_text = vec![
        Line::from(first),
        Line::from(vec![
            Span::styled("Ctrl+R", key_style()),
            Span::from(" Reset  "),
            Span::styled("Esc", key_style()),
            Span::from(" Menu  "),
            Span::styled("Ctrl+C", key_style()),
            Span::from(" Exit App"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
