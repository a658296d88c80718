use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ExerciseLayout {
    pub header_area: Rect,
    pub instruction_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

pub struct MenuLayout {
    pub header_area: Rect,
    pub list_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_exercise_chunks(area: Rect) -> ExerciseLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(area);

    ExerciseLayout {
        header_area: chunks[0],
        instruction_area: chunks[1],
        body_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_menu_chunks(area: Rect) -> MenuLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(3),
        ])
        .split(area);

    MenuLayout {
        header_area: chunks[0],
        list_area: chunks[1],
        help_area: chunks[2],
    }
}
